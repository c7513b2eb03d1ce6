//! 总线设备的 Mock 实现

use std::sync::Mutex;

use device::BusDevice;

/// Mock 的 PCI 设备
pub struct MockPciDevice {
    pub vendor: u16,
    pub device: u16,
    pub name: String,
    pub unit: u32,
    desc: Mutex<Option<&'static str>>,
}

impl MockPciDevice {
    pub fn new(vendor: u16, device: u16, name: &str, unit: u32) -> Self {
        Self {
            vendor,
            device,
            name: String::from(name),
            unit,
            desc: Mutex::new(None),
        }
    }
}

impl BusDevice for MockPciDevice {
    fn vendor_id(&self) -> u16 {
        self.vendor
    }

    fn device_id(&self) -> u16 {
        self.device
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn unit(&self) -> u32 {
        self.unit
    }

    fn set_desc(&self, desc: &'static str) {
        *self.desc.lock().unwrap() = Some(desc);
    }

    fn desc(&self) -> Option<&'static str> {
        *self.desc.lock().unwrap()
    }
}
