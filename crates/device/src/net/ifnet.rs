//! 网络接口对象
//!
//! [`IfNet`] 是操作系统可见的网络接口，由驱动分配并持有，发布到网络栈后才对外可见。

use alloc::{string::String, sync::Arc};
use core::fmt::Write;

use crate::error::DriverError;
use crate::net::media::{IfMediaReq, MediaWord};

/// 接口名最大长度（含结尾 NUL）
pub const IFNAMSIZ: usize = 16;

/// 以太网地址长度
pub const ETHER_ADDR_LEN: usize = 6;

/// 以太网帧头长度
pub const ETHER_HDR_LEN: u8 = 14;

/// 802.1Q VLAN 标签长度
pub const ETHER_VLAN_ENCAP_LEN: u8 = 4;

/// 带 VLAN 标签的以太网帧头长度
pub const ETHER_VLAN_HDR_LEN: u8 = ETHER_HDR_LEN + ETHER_VLAN_ENCAP_LEN;

/// 以太网默认 MTU
pub const ETHERMTU: u32 = 1500;

/// 以 Gbps 表示的速率换算为 bps
pub const fn if_gbps(n: u64) -> u64 {
    n * 1_000_000_000
}

/// 接口类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfType {
    /// 以太网
    Ether,
    /// 回环
    Loop,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// 接口标志
    pub struct IfFlags: u32 {
        /// 接口已启用
        const UP        = 0x1;
        /// 支持广播
        const BROADCAST = 0x2;
        /// 回环接口
        const LOOPBACK  = 0x8;
        /// 驱动正在运行
        const RUNNING   = 0x40;
        /// 无法收到自己发出的帧
        const SIMPLEX   = 0x800;
        /// 支持组播
        const MULTICAST = 0x8000;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// 接口能力
    pub struct IfCapabilities: u32 {
        /// 接收校验和卸载
        const RXCSUM        = 0x1;
        /// 发送校验和卸载
        const TXCSUM        = 0x2;
        /// 支持 VLAN 大小的 MTU
        const VLAN_MTU      = 0x8;
        /// 硬件 VLAN 标签处理
        const VLAN_HWTAGGING = 0x10;
        /// 支持巨型帧
        const JUMBO_MTU     = 0x20;
    }
}

/// 接口回调
///
/// 驱动在 attach 时安装，网络栈和管理面通过 [`IfNet`] 调用。
pub trait IfnetOps: Send + Sync {
    /// 初始化数据通路
    fn init(&self);

    /// 开始发送队列中的数据
    fn start(&self, ifp: &IfNet);

    /// 管理面请求切换介质
    fn media_change(&self, requested: MediaWord) -> Result<(), DriverError>;

    /// 查询当前介质状态
    fn media_status(&self, req: &mut IfMediaReq);
}

/// 发送队列参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendQueue {
    /// 队列最大长度
    pub maxlen: usize,
    /// 驱动侧队列最大长度
    pub drv_maxlen: usize,
    /// 队列是否可用
    pub ready: bool,
}

impl SendQueue {
    /// 设置队列长度
    pub fn set_maxlen(&mut self, len: usize) {
        self.maxlen = len;
        self.drv_maxlen = len;
    }

    /// 标记队列可用
    pub fn set_ready(&mut self) {
        self.ready = true;
    }
}

/// 网络接口
pub struct IfNet {
    if_type: IfType,
    name: String,
    unit: u32,
    /// 链路速率（bps）
    pub baudrate: u64,
    /// 接口标志
    pub flags: IfFlags,
    /// 设备支持的能力
    pub capabilities: IfCapabilities,
    /// 当前启用的能力
    pub capenable: IfCapabilities,
    /// 链路层头长度
    pub hdrlen: u8,
    /// 链路层地址长度
    pub addrlen: u8,
    /// MTU
    pub mtu: u32,
    /// 发送队列
    pub snd: SendQueue,
    lladdr: [u8; ETHER_ADDR_LEN],
    published: bool,
    ops: Option<Arc<dyn IfnetOps>>,
}

impl IfNet {
    /// 创建一个未命名、未发布的接口
    pub fn new(if_type: IfType) -> Self {
        Self {
            if_type,
            name: String::new(),
            unit: 0,
            baudrate: 0,
            flags: IfFlags::empty(),
            capabilities: IfCapabilities::empty(),
            capenable: IfCapabilities::empty(),
            hdrlen: 0,
            addrlen: 0,
            mtu: 0,
            snd: SendQueue::default(),
            lladdr: [0; ETHER_ADDR_LEN],
            published: false,
            ops: None,
        }
    }

    /// 由驱动名和单元号设置接口名
    ///
    /// 超过 `IFNAMSIZ - 1` 的部分被截断。
    pub fn init_name(&mut self, name: &str, unit: u32) {
        self.name.clear();
        let _ = write!(self.name, "{}{}", name, unit);
        if self.name.len() >= IFNAMSIZ {
            let mut end = IFNAMSIZ - 1;
            while !self.name.is_char_boundary(end) {
                end -= 1;
            }
            self.name.truncate(end);
        }
        self.unit = unit;
    }

    /// 设置链路速率
    pub fn init_baudrate(&mut self, bps: u64) {
        self.baudrate = bps;
    }

    /// 安装接口回调
    pub fn set_ops(&mut self, ops: Arc<dyn IfnetOps>) {
        self.ops = Some(ops);
    }

    /// 卸下接口回调
    pub fn clear_ops(&mut self) {
        self.ops = None;
    }

    /// 接口类型
    pub fn if_type(&self) -> IfType {
        self.if_type
    }

    /// 接口名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 单元号
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// 链路层地址
    pub fn lladdr(&self) -> [u8; ETHER_ADDR_LEN] {
        self.lladdr
    }

    /// 是否已发布到网络栈
    pub fn is_published(&self) -> bool {
        self.published
    }

    /// 是否已安装回调
    pub fn has_ops(&self) -> bool {
        self.ops.is_some()
    }

    /// 调用驱动的初始化回调
    pub fn init(&self) {
        if let Some(ops) = &self.ops {
            ops.init();
        }
    }

    /// 调用驱动的发送回调
    pub fn start(&self) {
        if let Some(ops) = &self.ops {
            ops.start(self);
        }
    }

    /// 请求切换介质
    pub fn media_change(&self, requested: MediaWord) -> Result<(), DriverError> {
        match &self.ops {
            Some(ops) => ops.media_change(requested),
            None => Err(DriverError::InvalidArgument),
        }
    }

    /// 查询介质状态
    pub fn media_status(&self) -> IfMediaReq {
        let mut req = IfMediaReq::default();
        if let Some(ops) = &self.ops {
            ops.media_status(&mut req);
        }
        req
    }

    pub(crate) fn ether_setup(&mut self, lla: &[u8; ETHER_ADDR_LEN]) {
        self.addrlen = ETHER_ADDR_LEN as u8;
        self.hdrlen = ETHER_HDR_LEN;
        self.mtu = ETHERMTU;
        self.lladdr = *lla;
    }

    pub(crate) fn set_published(&mut self, published: bool) {
        self.published = published;
    }
}

impl core::fmt::Debug for IfNet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IfNet")
            .field("name", &self.name)
            .field("if_type", &self.if_type)
            .field("baudrate", &self.baudrate)
            .field("flags", &self.flags)
            .field("capenable", &self.capenable)
            .field("published", &self.published)
            .finish_non_exhaustive()
    }
}
