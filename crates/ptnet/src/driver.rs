//! ptnet 驱动方法表
//!
//! 实现 [`DeviceMethods`]，负责设备上下文的状态机以及资源获取/释放的顺序：
//!
//! ```text
//! Uninitialized --attach--> Attached --detach--> Detached
//!                            |    ^
//!                    suspend |    | resume
//!                            v    |
//!                          Suspended
//! ```
//!
//! 资源顺序：核心锁最先初始化、最后销毁；接口对象在发布前分配、撤销发布后释放。

use alloc::{boxed::Box, sync::Arc};

use device::net::{ETHER_VLAN_HDR_LEN, format_mac_address};
use device::{
    BusDevice, DeviceMethods, DriverError, IfNet, IfType, IfnetOps, NetStack, ProbePriority,
    ether_ifattach, ether_ifdetach,
};

use crate::config::{PTNET_BAUDRATE, PTNET_CAPABILITIES, PTNET_IF_FLAGS, PtnetConfig};
use crate::datapath::{Datapath, NullDatapath};
use crate::probe::ptnet_probe;
use crate::softc::{PtnetCore, PtnetSoftc, PtnetState};

/// 为每个设备实例构造数据通路
pub type DatapathFactory = Box<dyn Fn() -> Box<dyn Datapath> + Send + Sync>;

/// ptnet 驱动
pub struct PtnetDriver {
    stack: Arc<dyn NetStack>,
    config: PtnetConfig,
    new_datapath: DatapathFactory,
}

impl PtnetDriver {
    /// 以默认配置和空数据通路创建驱动
    pub fn new(stack: Arc<dyn NetStack>) -> Self {
        Self::with_config(stack, PtnetConfig::default())
    }

    /// 以指定配置创建驱动
    pub fn with_config(stack: Arc<dyn NetStack>, config: PtnetConfig) -> Self {
        Self {
            stack,
            config,
            new_datapath: Box::new(|| Box::new(NullDatapath)),
        }
    }

    /// 替换数据通路实现
    pub fn with_datapath<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Datapath> + Send + Sync + 'static,
    {
        self.new_datapath = Box::new(factory);
        self
    }

    /// 驱动配置
    pub fn config(&self) -> &PtnetConfig {
        &self.config
    }

    /// 填充接口的身份信息并安装回调
    fn setup_ifnet(&self, ifp: &mut IfNet, dev: &dyn BusDevice, core: Arc<PtnetCore>) {
        ifp.init_name(dev.name(), dev.unit());
        ifp.init_baudrate(PTNET_BAUDRATE);
        ifp.flags = PTNET_IF_FLAGS;
        ifp.set_ops(core as Arc<dyn IfnetOps>);

        ifp.snd.set_maxlen(self.config.snd_queue_len);
        ifp.snd.set_ready();
    }
}

impl DeviceMethods for PtnetDriver {
    type Softc = PtnetSoftc;

    fn name(&self) -> &'static str {
        "ptnet"
    }

    fn probe(&self, dev: &dyn BusDevice) -> Result<ProbePriority, DriverError> {
        ptnet_probe(dev)
    }

    fn attach(&self, sc: &mut PtnetSoftc, dev: Arc<dyn BusDevice>) -> Result<(), DriverError> {
        log::debug!("ptnet: attach {}", dev.nameunit());

        if sc.state != PtnetState::Uninitialized {
            log::warn!(
                "{}: attach in state {:?} ignored",
                dev.nameunit(),
                sc.state
            );
            return Ok(());
        }

        sc.dev = Some(dev.clone());

        let core = Arc::new(PtnetCore::new(&dev.nameunit(), (self.new_datapath)())?);

        // 分配失败时 core 在此处被丢弃，核心锁随之销毁
        let Some(mut ifp) = self.stack.if_alloc(IfType::Ether) else {
            log::error!("{}: Failed to allocate ifnet", dev.nameunit());
            return Err(DriverError::ResourceExhausted);
        };

        self.setup_ifnet(&mut ifp, dev.as_ref(), core.clone());

        sc.hwaddr = self.config.hwaddr;
        if sc.hwaddr == [0; 6] {
            log::warn!("{}: publishing with unset hardware address", ifp.name());
        }
        ether_ifattach(self.stack.as_ref(), &mut ifp, &sc.hwaddr);

        // ether_ifattach 会把帧头长度重置为普通以太网帧头
        ifp.hdrlen = ETHER_VLAN_HDR_LEN;
        ifp.capabilities |= PTNET_CAPABILITIES;
        ifp.capenable = self.config.effective_capenable();

        log::info!(
            "{}: {} attached, lladdr {}",
            ifp.name(),
            dev.desc().unwrap_or("ptnet"),
            format_mac_address(sc.hwaddr)
        );

        sc.ifp = Some(ifp);
        sc.core = Some(core);
        sc.state = PtnetState::Attached;

        Ok(())
    }

    fn detach(&self, sc: &mut PtnetSoftc) -> Result<(), DriverError> {
        log::debug!("ptnet: detach ({:?})", sc.state);

        if let Some(ifp) = sc.ifp.as_deref_mut() {
            ether_ifdetach(self.stack.as_ref(), ifp);
        }

        if let Some(core) = &sc.core {
            core.lock().media.remove_all();
        }

        if let Some(mut ifp) = sc.ifp.take() {
            ifp.clear_ops();
            self.stack.if_free(ifp);
        }

        // 最后销毁核心锁
        sc.core = None;
        sc.dev = None;
        sc.state = PtnetState::Detached;

        Ok(())
    }

    fn suspend(&self, sc: &mut PtnetSoftc) -> Result<(), DriverError> {
        match sc.state {
            PtnetState::Attached => sc.state = PtnetState::Suspended,
            PtnetState::Suspended => {}
            state => log::warn!("ptnet: suspend in state {:?} ignored", state),
        }
        Ok(())
    }

    fn resume(&self, sc: &mut PtnetSoftc) -> Result<(), DriverError> {
        match sc.state {
            PtnetState::Suspended => sc.state = PtnetState::Attached,
            PtnetState::Attached => {}
            state => log::warn!("ptnet: resume in state {:?} ignored", state),
        }
        Ok(())
    }

    fn shutdown(&self, sc: &mut PtnetSoftc) -> Result<(), DriverError> {
        // 与 suspend 相同，只是之后不会再 resume
        self.suspend(sc)
    }
}
