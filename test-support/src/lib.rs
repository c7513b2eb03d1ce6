//! 测试支持 crate
//!
//! 提供宿主总线与网络栈的 Mock 实现，供驱动在主机上运行 `cargo test`。
//! Mock 会记录每一次调用，便于检查调用顺序和资源泄漏。

pub mod mock;
