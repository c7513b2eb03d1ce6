//! 数据通路扩展点
//!
//! 收发环与宿主后端的共享内存同步将通过 [`Datapath`] 接入。
//! 目前只有空实现 [`NullDatapath`]。

use device::IfNet;

use crate::softc::PtnetCore;

/// 数据通路
///
/// 所有方法都不得阻塞或失败。
pub trait Datapath: Send + Sync {
    /// 初始化数据通路（接口被启用时调用）
    fn init(&self, core: &PtnetCore);

    /// 发送队列中有待发送的数据
    fn start(&self, ifp: &IfNet);

    /// 链路是否连接
    fn link_up(&self) -> bool;
}

/// 空数据通路
///
/// 不做任何事情，链路始终报告为已连接。
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDatapath;

impl Datapath for NullDatapath {
    fn init(&self, _core: &PtnetCore) {}

    fn start(&self, _ifp: &IfNet) {}

    fn link_up(&self) -> bool {
        true
    }
}
