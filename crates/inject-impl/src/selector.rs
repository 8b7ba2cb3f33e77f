//! 默认构造器选择器

use inject_abstractions::{ConstructorDescriptor, ConstructorSelector, TypeDescriptor};
use inject_common::{DependencyError, DependencyResult};

/// 要求实现类型有且只有一个公开构造器
#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePublicConstructorSelector;

impl ConstructorSelector for SinglePublicConstructorSelector {
    fn select(&self, implementation: &TypeDescriptor) -> DependencyResult<Option<ConstructorDescriptor>> {
        let public: Vec<&ConstructorDescriptor> = implementation
            .constructors()
            .iter()
            .filter(|constructor| constructor.is_public())
            .collect();

        match public.as_slice() {
            [constructor] => Ok(Some((*constructor).clone())),
            _ => Err(DependencyError::AmbiguousOrMissingConstructor {
                implementation: implementation.key().name.to_string(),
                found: public.len(),
            }),
        }
    }
}
