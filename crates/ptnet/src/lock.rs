//! 设备核心锁
//!
//! 基于 `lock_api` 的自旋互斥锁，每个设备实例一把，以设备的 nameunit 命名便于诊断。
//!
//! 锁的生命周期与 [`CoreLock`] 值绑定：构造即初始化，`Drop` 即销毁，
//! 因此设备上下文的任何拆除路径（包括 attach 中途失败）都不会遗留未销毁的锁。

use alloc::string::String;
use core::{
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

use lock_api::{GuardSend, RawMutex};

/// 锁名最大长度（含结尾 NUL）
pub const CORE_LOCK_NAME_LEN: usize = 16;

/// 锁类型描述
pub const CORE_LOCK_TYPE: &str = "ptnet core lock";

/// 原始自旋锁
///
/// 不可重入。
#[derive(Debug)]
pub struct RawCoreLock {
    locked: AtomicBool,
}

unsafe impl RawMutex for RawCoreLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawCoreLock {
        locked: AtomicBool::new(false),
    };

    type GuardMarker = GuardSend;

    fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.is_locked() {
                hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// 核心锁保护的互斥量
pub type CoreMutex<T> = lock_api::Mutex<RawCoreLock, T>;

/// 核心锁的 RAII 保护器
pub type CoreGuard<'a, T> = lock_api::MutexGuard<'a, RawCoreLock, T>;

/// 带名字的设备核心锁
///
/// # 示例
/// ```
/// use ptnet::CoreLock;
///
/// let lock = CoreLock::new("ptnet0", 0u32);
/// assert_eq!(lock.name(), "ptnet0");
/// {
///     let mut guard = lock.lock();
///     *guard += 1;
/// }
/// assert_eq!(*lock.lock(), 1);
/// ```
pub struct CoreLock<T> {
    name: String,
    mutex: CoreMutex<T>,
}

impl<T> CoreLock<T> {
    /// 以设备的 nameunit 命名并初始化锁
    ///
    /// 名字超过 `CORE_LOCK_NAME_LEN - 1` 字节时被截断。
    pub fn new(nameunit: &str, data: T) -> Self {
        let mut end = nameunit.len().min(CORE_LOCK_NAME_LEN - 1);
        while !nameunit.is_char_boundary(end) {
            end -= 1;
        }
        let name = String::from(&nameunit[..end]);
        log::trace!("{}: {} initialized", name, CORE_LOCK_TYPE);
        Self {
            name,
            mutex: CoreMutex::new(data),
        }
    }

    /// 锁名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取锁
    pub fn lock(&self) -> CoreGuard<'_, T> {
        self.mutex.lock()
    }

    /// 尝试获取锁
    pub fn try_lock(&self) -> Option<CoreGuard<'_, T>> {
        self.mutex.try_lock()
    }

    /// 锁是否被占用 (仅用于调试/测试)
    pub fn is_locked(&self) -> bool {
        self.mutex.is_locked()
    }
}

impl<T> Drop for CoreLock<T> {
    fn drop(&mut self) {
        log::trace!("{}: {} destroyed", self.name, CORE_LOCK_TYPE);
    }
}

impl<T> core::fmt::Debug for CoreLock<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoreLock")
            .field("name", &self.name)
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}
