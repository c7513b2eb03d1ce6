//! ptnet 半虚拟化网卡驱动
//!
//! ptnet 是 netmap passthrough 方案中由宿主暴露给虚拟机的网络接口设备。
//! 此 crate 实现驱动的控制面：
//!
//! - [`probe`] - 按 PCI 厂商/设备 ID 识别设备
//! - [`driver`] - attach/detach/suspend/resume/shutdown 状态机
//! - [`softc`] - 每个设备实例的上下文与共享核心
//! - [`lock`] - 以设备名命名的核心锁
//! - [`media`] - 链路介质协商（单一 10GBASE-T 全双工介质）
//! - [`datapath`] - 收发数据通路扩展点（目前为空实现）
//! - [`config`] - 常量与驱动配置
//!
//! 驱动只依赖 `device` crate 定义的 trait，总线与网络栈由宿主注入。
//! 收发环处理依赖单独的 netmap 后端模块，见 [`MODULE`]。

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod datapath;
pub mod driver;
pub mod lock;
pub mod media;
pub mod probe;
pub mod softc;

#[cfg(test)]
mod tests;

use device::{ModuleDepend, ModuleInfo};

pub use config::PtnetConfig;
pub use datapath::{Datapath, NullDatapath};
pub use driver::{DatapathFactory, PtnetDriver};
pub use lock::CoreLock;
pub use media::PTNET_MEDIA;
pub use probe::{PTNET_DESC, PTNETMAP_PCI_NETIF_ID, PTNETMAP_PCI_VENDOR_ID, ptnet_probe};
pub use softc::{CoreState, PtnetCore, PtnetSoftc, PtnetState};

/// 模块元数据
pub const MODULE: ModuleInfo = ModuleInfo {
    name: "ptnet",
    bus: "pci",
    version: 1,
    depends: &[ModuleDepend {
        name: "netmap",
        min_version: 1,
        pref_version: 1,
        max_version: 1,
    }],
};
