//! 生命周期策略抽象接口

use crate::descriptor::ConstructorDescriptor;
use crate::factory::ConstructionStrategy;
use crate::registry::Binding;
use crate::resolver::InstanceResolver;
use inject_common::{DependencyResult, Lifetime};
use std::sync::Arc;

/// 生命周期策略 trait
///
/// 决定实例如何产出以及是否缓存。策略对象是共享且不可变的，
/// 绑定只持有它的引用。
pub trait LifetimePolicy: Send + Sync + std::fmt::Debug {
    /// 策略对应的生命周期类型
    fn kind(&self) -> Lifetime;

    /// 为绑定创建实例解析器
    ///
    /// 构造策略或构造器为空时返回 `InvalidBinding`；
    /// 构造策略没有产出工厂时返回 `ConstructionFailure`。
    fn create_instance_resolver(
        &self,
        strategy: Option<&dyn ConstructionStrategy>,
        binding: &Binding,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Arc<dyn InstanceResolver>>;
}
