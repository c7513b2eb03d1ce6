//! 以太网接口与网络栈的对接
//!
//! 网络栈本身由宿主内核实现，这里只定义驱动需要的最小接口，
//! 并提供以太网接口发布/撤销的通用流程。

use alloc::boxed::Box;

use crate::net::format_mac_address;
use crate::net::ifnet::{ETHER_ADDR_LEN, IfNet, IfType};

/// 宿主网络栈
///
/// 负责接口对象的分配、释放以及在接口注册表中的登记。
pub trait NetStack: Send + Sync {
    /// 分配接口对象，内存不足时返回 `None`
    fn if_alloc(&self, if_type: IfType) -> Option<Box<IfNet>>;

    /// 将接口登记到注册表
    fn if_attach(&self, ifp: &IfNet);

    /// 从注册表中移除接口
    fn if_detach(&self, ifp: &IfNet);

    /// 释放接口对象
    fn if_free(&self, ifp: Box<IfNet>);
}

/// 以太网通用初始化并发布接口
///
/// 设置地址长度、帧头长度和 MTU 后登记到网络栈。
/// 调用方可以在之后覆盖帧头长度等字段。
pub fn ether_ifattach(stack: &dyn NetStack, ifp: &mut IfNet, lla: &[u8; ETHER_ADDR_LEN]) {
    ifp.ether_setup(lla);
    stack.if_attach(ifp);
    ifp.set_published(true);
    log::info!("{}: Ethernet address: {}", ifp.name(), format_mac_address(*lla));
}

/// 撤销已发布的以太网接口
///
/// 未发布的接口直接忽略。
pub fn ether_ifdetach(stack: &dyn NetStack, ifp: &mut IfNet) {
    if !ifp.is_published() {
        return;
    }
    stack.if_detach(ifp);
    ifp.set_published(false);
    log::debug!("{}: detached from network stack", ifp.name());
}
