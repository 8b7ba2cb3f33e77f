//! 构造器选择器抽象接口

use crate::descriptor::{ConstructorDescriptor, TypeDescriptor};
use inject_common::DependencyResult;

/// 构造器选择器 trait
///
/// 从实现类型的构造器中选出用于构建实例的那一个。
/// 返回 `Ok(None)` 时解析器会报告 `InvalidConstructorSelection`。
pub trait ConstructorSelector: Send + Sync + std::fmt::Debug {
    /// 选择构造器
    fn select(
        &self,
        implementation: &TypeDescriptor,
    ) -> DependencyResult<Option<ConstructorDescriptor>>;
}
