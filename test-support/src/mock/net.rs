//! 网络栈的 Mock 实现

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use device::{IfNet, IfType, NetStack};

/// 网络栈收到的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetEvent {
    /// 分配接口对象
    Alloc,
    /// 登记接口
    Attach(String),
    /// 移除接口
    Detach(String),
    /// 释放接口对象
    Free(String),
}

/// Mock 的网络栈
///
/// 可以通过 [`MockNetStack::fail_next_alloc`] 模拟内存不足。
pub struct MockNetStack {
    fail_alloc: AtomicBool,
    allocated: AtomicUsize,
    freed: AtomicUsize,
    registry: Mutex<Vec<String>>,
    events: Mutex<Vec<NetEvent>>,
}

impl MockNetStack {
    pub fn new() -> Self {
        Self {
            fail_alloc: AtomicBool::new(false),
            allocated: AtomicUsize::new(0),
            freed: AtomicUsize::new(0),
            registry: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// 下一次 `if_alloc` 返回 `None`
    pub fn fail_next_alloc(&self) {
        self.fail_alloc.store(true, Ordering::SeqCst);
    }

    /// 已分配但尚未释放的接口数
    pub fn live_interfaces(&self) -> usize {
        self.allocated.load(Ordering::SeqCst) - self.freed.load(Ordering::SeqCst)
    }

    /// 当前登记在注册表中的接口名
    pub fn registered(&self) -> Vec<String> {
        self.registry.lock().unwrap().clone()
    }

    /// 至今收到的全部调用
    pub fn events(&self) -> Vec<NetEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: NetEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Default for MockNetStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NetStack for MockNetStack {
    fn if_alloc(&self, if_type: IfType) -> Option<Box<IfNet>> {
        if self.fail_alloc.swap(false, Ordering::SeqCst) {
            return None;
        }
        self.allocated.fetch_add(1, Ordering::SeqCst);
        self.record(NetEvent::Alloc);
        Some(Box::new(IfNet::new(if_type)))
    }

    fn if_attach(&self, ifp: &IfNet) {
        self.registry.lock().unwrap().push(String::from(ifp.name()));
        self.record(NetEvent::Attach(String::from(ifp.name())));
    }

    fn if_detach(&self, ifp: &IfNet) {
        self.registry.lock().unwrap().retain(|n| n != ifp.name());
        self.record(NetEvent::Detach(String::from(ifp.name())));
    }

    fn if_free(&self, ifp: Box<IfNet>) {
        self.freed.fetch_add(1, Ordering::SeqCst);
        self.record(NetEvent::Free(String::from(ifp.name())));
    }
}
