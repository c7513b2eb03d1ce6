//! 设备驱动框架接口
//!
//! 此 crate 定义驱动与宿主内核之间的契约，驱动只依赖这里的 trait，
//! 由宿主（或测试中的 mock）提供实现：
//!
//! - [`BusDevice`] trait - 总线上发现的设备记录
//! - [`DeviceMethods`] trait - 驱动的 probe/attach/detach/suspend/resume/shutdown 方法表
//! - [`NetStack`] trait - 网络接口的分配与注册
//! - [`IfNet`] - 操作系统可见的网络接口对象
//! - [`IfMedia`] - 链路介质注册表
//! - [`DriverError`] - 驱动回调返回的错误

#![no_std]

extern crate alloc;

pub mod driver;
pub mod error;
pub mod net;

// Re-export driver
pub use driver::{BusDevice, DeviceMethods, ModuleDepend, ModuleInfo, ProbePriority};

// Re-export error
pub use error::DriverError;

// Re-export net
pub use net::{
    IfCapabilities, IfFlags, IfMedia, IfMediaReq, IfNet, IfType, IfnetOps, MediaStatus,
    MediaWord, NetStack, ether_ifattach, ether_ifdetach, format_mac_address,
};
