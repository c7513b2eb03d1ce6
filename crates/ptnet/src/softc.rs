//! 设备上下文
//!
//! [`PtnetSoftc`] 由总线框架为每个设备实例创建，驱动在 attach/detach 中填充和清理它。
//! 接口回调需要访问的部分放在 [`PtnetCore`] 中，由上下文和接口对象共享。

use alloc::{
    boxed::Box,
    sync::{Arc, Weak},
};

use device::net::ETHER_ADDR_LEN;
use device::{BusDevice, DriverError, IfMedia, IfMediaReq, IfNet, IfnetOps, MediaWord};

use crate::datapath::Datapath;
use crate::lock::{CoreGuard, CoreLock};
use crate::media;

/// 设备生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PtnetState {
    /// 尚未 attach（或 attach 失败）
    #[default]
    Uninitialized,
    /// 接口已创建并发布
    Attached,
    /// 已挂起，资源归属不变
    Suspended,
    /// 已 detach，不可再使用
    Detached,
}

/// 受核心锁保护的状态
#[derive(Debug)]
pub struct CoreState {
    /// 介质注册表
    pub media: IfMedia,
}

/// 上下文与接口回调共享的部分
pub struct PtnetCore {
    lock: CoreLock<CoreState>,
    datapath: Box<dyn Datapath>,
}

impl PtnetCore {
    /// 初始化核心锁并建立默认介质
    pub fn new(nameunit: &str, datapath: Box<dyn Datapath>) -> Result<Self, DriverError> {
        let media = media::media_init()?;
        Ok(Self {
            lock: CoreLock::new(nameunit, CoreState { media }),
            datapath,
        })
    }

    /// 获取核心锁
    pub fn lock(&self) -> CoreGuard<'_, CoreState> {
        self.lock.lock()
    }

    /// 核心锁名
    pub fn lock_name(&self) -> &str {
        self.lock.name()
    }

    /// 核心锁是否被占用
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl IfnetOps for PtnetCore {
    fn init(&self) {
        log::debug!("{}: init", self.lock_name());
        self.datapath.init(self);
    }

    fn start(&self, ifp: &IfNet) {
        self.datapath.start(ifp);
    }

    fn media_change(&self, requested: MediaWord) -> Result<(), DriverError> {
        let mut state = self.lock();
        media::media_change(&mut state.media, requested)
    }

    fn media_status(&self, req: &mut IfMediaReq) {
        media::media_status(self.datapath.link_up(), req);
    }
}

impl core::fmt::Debug for PtnetCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PtnetCore")
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}

/// ptnet 设备上下文
#[derive(Default)]
pub struct PtnetSoftc {
    pub(crate) dev: Option<Arc<dyn BusDevice>>,
    pub(crate) ifp: Option<Box<IfNet>>,
    pub(crate) core: Option<Arc<PtnetCore>>,
    pub(crate) hwaddr: [u8; ETHER_ADDR_LEN],
    pub(crate) state: PtnetState,
}

impl PtnetSoftc {
    /// 当前状态
    pub fn state(&self) -> PtnetState {
        self.state
    }

    /// 借用的总线设备
    pub fn dev(&self) -> Option<&Arc<dyn BusDevice>> {
        self.dev.as_ref()
    }

    /// 网络接口（仅在 attach 成功后存在）
    pub fn ifnet(&self) -> Option<&IfNet> {
        self.ifp.as_deref()
    }

    /// 共享核心（核心锁存活期间存在）
    pub fn core(&self) -> Option<&Arc<PtnetCore>> {
        self.core.as_ref()
    }

    /// 核心锁是否已初始化
    pub fn is_lock_initialized(&self) -> bool {
        self.core.is_some()
    }

    /// 对共享核心的弱引用，用于检查 detach 后核心锁是否真正销毁
    pub fn core_weak(&self) -> Weak<PtnetCore> {
        self.core.as_ref().map(Arc::downgrade).unwrap_or_default()
    }

    /// 发布接口时使用的链路层地址
    pub fn hwaddr(&self) -> [u8; ETHER_ADDR_LEN] {
        self.hwaddr
    }

    /// 查询介质状态
    pub fn media_status(&self) -> Option<IfMediaReq> {
        self.ifnet().map(IfNet::media_status)
    }

    /// 请求切换介质
    pub fn media_change(&self, requested: MediaWord) -> Result<(), DriverError> {
        match self.ifnet() {
            Some(ifp) => ifp.media_change(requested),
            None => Err(DriverError::InvalidArgument),
        }
    }

    /// 当前选中的介质
    pub fn current_media(&self) -> Option<MediaWord> {
        self.core.as_ref().and_then(|core| core.lock().media.current())
    }
}

impl core::fmt::Debug for PtnetSoftc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PtnetSoftc")
            .field("state", &self.state)
            .field("ifp", &self.ifp)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}
