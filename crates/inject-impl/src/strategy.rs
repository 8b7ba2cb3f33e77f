//! 默认构造策略

use inject_abstractions::{
    ConstructionStrategy, ConstructorDescriptor, InstanceFactory, InstanceResolver,
};
use inject_common::{DependencyError, DependencyResult};
use std::sync::Arc;

/// 基于构造器描述符的构造策略
///
/// 产出的工厂每次调用都按声明顺序解析参数，然后调用构造器，不做缓存。
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorConstructionStrategy;

impl ConstructionStrategy for DescriptorConstructionStrategy {
    fn build(
        &self,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Option<InstanceFactory>> {
        let constructor = constructor.cloned().ok_or_else(|| {
            DependencyError::invalid_binding("<未知>", "<未知>", "构造器描述符为空")
        })?;
        let arguments = arguments.unwrap_or_default();

        let factory: InstanceFactory = Arc::new(move || {
            let values = arguments
                .iter()
                .map(|argument| argument.resolve())
                .collect::<DependencyResult<Vec<_>>>()?;
            constructor.invoke(values)
        });

        Ok(Some(factory))
    }
}
