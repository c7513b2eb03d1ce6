//! 驱动错误类型
//!
//! 驱动回调向总线框架返回的错误码，可通过 [`DriverError::to_errno()`] 转换为 POSIX errno。

use core::fmt;

/// 驱动错误类型
///
/// 错误总是同步返回给调用该回调的总线框架，驱动内部不做重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// 设备不属于此驱动 (-ENXIO)
    ///
    /// 探测阶段的正常跳过，并非故障。
    NoSuchDevice,
    /// 资源分配失败 (-ENOMEM)
    ResourceExhausted,
    /// 无效参数 (-EINVAL)
    InvalidArgument,
}

impl DriverError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            DriverError::NoSuchDevice => -6,
            DriverError::ResourceExhausted => -12,
            DriverError::InvalidArgument => -22,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DriverError::NoSuchDevice => "no such device",
            DriverError::ResourceExhausted => "cannot allocate memory",
            DriverError::InvalidArgument => "invalid argument",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_values() {
        assert_eq!(DriverError::NoSuchDevice.to_errno(), -6);
        assert_eq!(DriverError::ResourceExhausted.to_errno(), -12);
        assert_eq!(DriverError::InvalidArgument.to_errno(), -22);
    }
}
