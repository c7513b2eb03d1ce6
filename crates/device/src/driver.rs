//! 总线驱动基础类型
//!
//! 包含 [`BusDevice`]、[`DeviceMethods`] trait 以及探测优先级和模块元数据。

use alloc::{format, string::String, sync::Arc};

use crate::error::DriverError;

/// 探测优先级
///
/// 多个驱动同时声明支持某个设备时，总线框架选择优先级最高（数值最大）的驱动。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePriority {
    /// 专属驱动，只可能匹配这一种设备
    Specific,
    /// 厂商提供的驱动
    Vendor,
    /// 基于厂商/设备 ID 匹配的普通驱动
    Default,
    /// 较低优先级的通用实现
    LowPriority,
    /// 通用类驱动
    Generic,
    /// 仅用于挂钩的伪驱动
    Hooks,
}

impl ProbePriority {
    /// 转换为总线框架使用的数值
    pub fn value(&self) -> i32 {
        match self {
            ProbePriority::Specific => 0,
            ProbePriority::Vendor => -10,
            ProbePriority::Default => -20,
            ProbePriority::LowPriority => -40,
            ProbePriority::Generic => -100,
            ProbePriority::Hooks => -500,
        }
    }
}

/// 总线设备
///
/// 由总线框架持有的设备记录，驱动在设备上下文的生命周期内借用它。
pub trait BusDevice: Send + Sync {
    /// PCI 厂商 ID
    fn vendor_id(&self) -> u16;

    /// PCI 设备 ID
    fn device_id(&self) -> u16;

    /// 驱动名称（例如 "ptnet"）
    fn name(&self) -> &str;

    /// 设备单元号
    fn unit(&self) -> u32;

    /// 设置设备描述字符串
    fn set_desc(&self, desc: &'static str);

    /// 获取设备描述字符串
    fn desc(&self) -> Option<&'static str>;

    /// 名称与单元号拼接的唯一标识（例如 "ptnet0"）
    fn nameunit(&self) -> String {
        format!("{}{}", self.name(), self.unit())
    }
}

/// 设备驱动方法表
///
/// 总线框架对每个设备实例按 probe → attach → (suspend ⇄ resume) → shutdown/detach 的顺序调用这些方法。
/// 同一设备实例上的管理回调不会并发执行，因此上下文以 `&mut` 传入。
pub trait DeviceMethods: Send + Sync {
    /// 每个设备实例的驱动私有上下文
    ///
    /// 由框架在 attach 之前以默认值创建。
    type Softc: Default + Send;

    /// 驱动名称
    fn name(&self) -> &'static str;

    /// 判断设备是否属于此驱动
    ///
    /// 不匹配时返回 [`DriverError::NoSuchDevice`]。不得修改设备状态。
    fn probe(&self, dev: &dyn BusDevice) -> Result<ProbePriority, DriverError>;

    /// 挂载设备
    fn attach(&self, sc: &mut Self::Softc, dev: Arc<dyn BusDevice>) -> Result<(), DriverError>;

    /// 卸载设备
    ///
    /// 即使 attach 中途失败也必须可以安全调用。
    fn detach(&self, sc: &mut Self::Softc) -> Result<(), DriverError>;

    /// 挂起设备
    fn suspend(&self, _sc: &mut Self::Softc) -> Result<(), DriverError> {
        Ok(())
    }

    /// 恢复设备
    fn resume(&self, _sc: &mut Self::Softc) -> Result<(), DriverError> {
        Ok(())
    }

    /// 系统关机前的处理
    fn shutdown(&self, _sc: &mut Self::Softc) -> Result<(), DriverError> {
        Ok(())
    }
}

/// 模块依赖声明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDepend {
    /// 被依赖的模块名
    pub name: &'static str,
    /// 可接受的最低版本
    pub min_version: u32,
    /// 首选版本
    pub pref_version: u32,
    /// 可接受的最高版本
    pub max_version: u32,
}

impl ModuleDepend {
    /// 检查给定版本是否满足依赖
    pub fn accepts(&self, version: u32) -> bool {
        (self.min_version..=self.max_version).contains(&version)
    }
}

/// 驱动模块元数据
#[derive(Debug, Clone, Copy)]
pub struct ModuleInfo {
    /// 模块名
    pub name: &'static str,
    /// 挂载的总线
    pub bus: &'static str,
    /// 模块版本
    pub version: u32,
    /// 依赖的其他模块
    pub depends: &'static [ModuleDepend],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_priority_ordering() {
        assert!(ProbePriority::Specific.value() > ProbePriority::Default.value());
        assert!(ProbePriority::Default.value() > ProbePriority::Generic.value());
        assert_eq!(ProbePriority::Default.value(), -20);
    }

    #[test]
    fn test_module_depend_accepts() {
        let dep = ModuleDepend {
            name: "netmap",
            min_version: 1,
            pref_version: 1,
            max_version: 2,
        };
        assert!(!dep.accepts(0));
        assert!(dep.accepts(1));
        assert!(dep.accepts(2));
        assert!(!dep.accepts(3));
    }
}
