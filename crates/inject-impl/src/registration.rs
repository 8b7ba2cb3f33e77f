//! 服务注册表
//!
//! 每个服务类型最多一个绑定，冲突处理在同一个分片锁内完成。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use inject_abstractions::Binding;
use inject_common::{ConflictBehavior, DependencyError, DependencyResult, ServiceKey};
use std::any::TypeId;
use std::sync::Arc;

/// 注册结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// 新增绑定
    Inserted,
    /// 替换了已有绑定
    Replaced,
    /// 保留已有绑定，新绑定被丢弃
    Kept,
}

/// 服务注册表
#[derive(Debug, Default)]
pub struct RegistrationTable {
    bindings: DashMap<TypeId, Arc<Binding>>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入绑定
    ///
    /// 服务类型已有绑定时，`behavior` 为 `Default` 则按 `container_default` 处理。
    pub fn insert(
        &self,
        binding: Binding,
        behavior: ConflictBehavior,
        container_default: ConflictBehavior,
    ) -> DependencyResult<RegistrationOutcome> {
        let service = binding.service();

        match self.bindings.entry(service.id) {
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(binding));
                Ok(RegistrationOutcome::Inserted)
            }
            Entry::Occupied(mut entry) => match behavior.resolve_against(container_default) {
                ConflictBehavior::Keep => Ok(RegistrationOutcome::Kept),
                ConflictBehavior::Replace => {
                    entry.insert(Arc::new(binding));
                    Ok(RegistrationOutcome::Replaced)
                }
                ConflictBehavior::Throw | ConflictBehavior::Default => {
                    Err(DependencyError::DuplicateRegistration {
                        service: service.name.to_string(),
                    })
                }
            },
        }
    }

    pub fn get(&self, service: &ServiceKey) -> Option<Arc<Binding>> {
        self.bindings.get(&service.id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, service: &ServiceKey) -> bool {
        self.bindings.contains_key(&service.id)
    }

    /// 所有已注册的服务类型
    pub fn keys(&self) -> Vec<ServiceKey> {
        self.bindings.iter().map(|entry| entry.value().service()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&self) {
        self.bindings.clear();
    }
}
