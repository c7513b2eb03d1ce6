//! Mock 实现模块
//!
//! 提供总线和网络栈的 Mock 实现，用于测试

pub mod bus;
pub mod net;
