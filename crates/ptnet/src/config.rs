//! ptnet 配置
//!
//! 编译期常量以及 attach 时使用的可调参数。

use device::net::{ETHER_ADDR_LEN, if_gbps};
use device::{IfCapabilities, IfFlags};

/// 发送队列默认长度
pub const PTNET_SND_QUEUE_LEN: usize = 255;

/// 标称链路速率（10 Gbps）
pub const PTNET_BAUDRATE: u64 = if_gbps(10);

/// 接口标志
pub const PTNET_IF_FLAGS: IfFlags = IfFlags::BROADCAST
    .union(IfFlags::MULTICAST)
    .union(IfFlags::SIMPLEX);

/// 设备声明支持的能力
pub const PTNET_CAPABILITIES: IfCapabilities =
    IfCapabilities::JUMBO_MTU.union(IfCapabilities::VLAN_MTU);

/// 驱动配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtnetConfig {
    /// 发布接口时使用的链路层地址
    ///
    /// 后端尚未提供地址协商，默认全零。
    pub hwaddr: [u8; ETHER_ADDR_LEN],
    /// 发送队列长度
    pub snd_queue_len: usize,
    /// 启用的能力，`None` 表示启用全部支持的能力
    pub capenable: Option<IfCapabilities>,
}

impl Default for PtnetConfig {
    fn default() -> Self {
        Self {
            hwaddr: [0; ETHER_ADDR_LEN],
            snd_queue_len: PTNET_SND_QUEUE_LEN,
            capenable: None,
        }
    }
}

impl PtnetConfig {
    /// 指定链路层地址
    pub fn with_hwaddr(mut self, hwaddr: [u8; ETHER_ADDR_LEN]) -> Self {
        self.hwaddr = hwaddr;
        self
    }

    /// 指定启用的能力
    pub fn with_capenable(mut self, caps: IfCapabilities) -> Self {
        self.capenable = Some(caps);
        self
    }

    /// 实际启用的能力（不会超出 `PTNET_CAPABILITIES`）
    pub fn effective_capenable(&self) -> IfCapabilities {
        self.capenable.unwrap_or(PTNET_CAPABILITIES) & PTNET_CAPABILITIES
    }
}
