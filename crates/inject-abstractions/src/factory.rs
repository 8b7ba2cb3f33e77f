//! 构造策略抽象接口
//!
//! 构造策略把构造器描述符和参数解析器组合成一个产出实例的闭包。

use crate::descriptor::{ConstructorDescriptor, Instance};
use crate::resolver::InstanceResolver;
use inject_common::DependencyResult;
use std::sync::Arc;

/// 实例工厂函数类型
///
/// 每次调用都构造新实例，缓存由生命周期策略负责。
pub type InstanceFactory = Arc<dyn Fn() -> DependencyResult<Instance> + Send + Sync>;

/// 构造策略 trait
pub trait ConstructionStrategy: Send + Sync + std::fmt::Debug {
    /// 创建实例工厂
    ///
    /// - `constructor` 为空时返回 `InvalidBinding`
    /// - `arguments` 为空时按无参构造处理
    ///
    /// 自定义策略可以返回 `Ok(None)`，调用方会把它视为构造失败。
    fn build(
        &self,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Option<InstanceFactory>>;
}
