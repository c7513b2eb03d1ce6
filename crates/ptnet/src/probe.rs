//! 设备识别
//!
//! 只比较 PCI 厂商/设备 ID，探测可能在大量候选设备上反复进行，必须无副作用且廉价。

use device::{BusDevice, DriverError, ProbePriority};

/// ptnetmap 设备的 PCI 厂商 ID（QEMU 虚拟设备）
pub const PTNETMAP_PCI_VENDOR_ID: u16 = 0x1b36;

/// ptnet 网络接口的 PCI 设备 ID
pub const PTNETMAP_PCI_NETIF_ID: u16 = 0x000d;

/// 匹配成功时设置的设备描述
pub const PTNET_DESC: &str = "ptnet network adapter";

/// 判断厂商/设备 ID 是否属于 ptnet
pub const fn ptnet_match(vendor: u16, device: u16) -> bool {
    vendor == PTNETMAP_PCI_VENDOR_ID && device == PTNETMAP_PCI_NETIF_ID
}

/// 探测设备
///
/// 匹配时设置设备描述并返回 [`ProbePriority::Default`]，否则返回 [`DriverError::NoSuchDevice`]。
pub fn ptnet_probe(dev: &dyn BusDevice) -> Result<ProbePriority, DriverError> {
    log::debug!("ptnet: probe {:04x}:{:04x}", dev.vendor_id(), dev.device_id());

    if !ptnet_match(dev.vendor_id(), dev.device_id()) {
        return Err(DriverError::NoSuchDevice);
    }

    dev.set_desc(PTNET_DESC);

    Ok(ProbePriority::Default)
}
