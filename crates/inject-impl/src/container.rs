//! 依赖注入容器
//!
//! 组合根：持有注册表、解析器缓存和不可变配置。

use crate::lifecycle;
use crate::options::{ContainerConfig, ContainerOptions};
use crate::registration::{RegistrationOutcome, RegistrationTable};
use crate::resolver::{ResolverCache, ResolverEngine};
use inject_abstractions::{
    Binding, ContainerStats, DependencyStack, DiContainer, Instance, LifetimePolicy, Registrator,
    Resolver, ServiceProvider, TypeDescriptor,
};
use inject_common::{
    ConflictBehavior, ContainerSettings, DependencyError, DependencyResult, Lifetime, ServiceKey,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 依赖注入容器
///
/// 多个容器之间完全独立。释放后继续使用是未定义行为，
/// 当前实现会记录警告并表现为空容器。
pub struct Container {
    id: Uuid,
    config: ContainerConfig,
    registrations: RegistrationTable,
    resolvers: ResolverCache,
    dispose_lock: Mutex<()>,
    disposed: AtomicBool,
}

impl Container {
    /// 使用默认选项创建容器
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// 使用指定选项创建容器
    pub fn with_options(options: ContainerOptions) -> Self {
        let config = options.into_config();
        let id = Uuid::new_v4();

        debug!(
            "创建容器: {}, 默认生命周期: {}, 默认冲突策略: {:?}",
            id,
            config.default_lifetime().kind(),
            config.default_conflict_behavior()
        );

        Self {
            id,
            config,
            registrations: RegistrationTable::new(),
            resolvers: ResolverCache::new(),
            dispose_lock: Mutex::new(()),
            disposed: AtomicBool::new(false),
        }
    }

    /// 从可序列化设置创建容器
    pub fn from_settings(settings: &ContainerSettings) -> Self {
        Self::with_options(ContainerOptions::from_settings(settings))
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 是否已释放
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn engine(&self) -> ResolverEngine<'_> {
        ResolverEngine::new(&self.registrations, &self.resolvers, &self.config)
    }

    fn warn_if_disposed(&self, operation: &str) {
        if self.is_disposed() {
            warn!("容器 {} 已释放, 仍在调用: {}", self.id, operation);
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrator for Container {
    fn register(
        &self,
        service: Option<ServiceKey>,
        implementation: Option<Arc<TypeDescriptor>>,
        lifetime: Option<Arc<dyn LifetimePolicy>>,
        behavior: ConflictBehavior,
    ) -> DependencyResult<()> {
        self.warn_if_disposed("register");

        let service = service.ok_or(DependencyError::InvalidArgument { argument: "service" })?;
        let implementation = implementation.ok_or(DependencyError::InvalidArgument {
            argument: "implementation",
        })?;
        let lifetime = lifetime.unwrap_or_else(|| self.config.default_lifetime().clone());
        let kind = lifetime.kind();

        let binding = Binding::new(service, implementation, lifetime)?;
        let implementation = binding.implementation().key();

        match self.registrations.insert(
            binding,
            behavior,
            self.config.default_conflict_behavior(),
        )? {
            RegistrationOutcome::Inserted => {
                info!("注册服务: {} -> {} ({})", service, implementation, kind);
            }
            RegistrationOutcome::Replaced => {
                let evicted = self.resolvers.evict(&service);
                info!(
                    "替换服务注册: {} -> {} ({}), 淘汰解析器数量: {}",
                    service, implementation, kind, evicted
                );
            }
            RegistrationOutcome::Kept => {
                warn!("服务已注册, 保留原有注册: {}, 丢弃: {}", service, implementation);
            }
        }

        Ok(())
    }

    fn lifetime_policy(&self, lifetime: Lifetime) -> Arc<dyn LifetimePolicy> {
        lifecycle::policy_for(lifetime)
    }
}

impl Resolver for Container {
    fn resolve_service(&self, service: Option<ServiceKey>) -> DependencyResult<Instance> {
        self.warn_if_disposed("resolve");
        self.engine().resolve(service)
    }
}

impl ServiceProvider for Container {
    fn get_service(&self, service: &ServiceKey) -> DependencyResult<Option<Instance>> {
        self.warn_if_disposed("get_service");
        self.engine().try_resolve(service)
    }
}

impl DiContainer for Container {
    fn is_registered_key(&self, service: &ServiceKey) -> bool {
        self.registrations.contains(service)
    }

    fn registered_services(&self) -> Vec<ServiceKey> {
        self.registrations.keys()
    }

    fn validate(&self) -> Result<(), Vec<DependencyError>> {
        info!("验证容器依赖关系: {}", self.id);

        let engine = self.engine();
        let errors: Vec<DependencyError> = self
            .registrations
            .keys()
            .into_iter()
            .filter_map(|service| {
                let mut stack = DependencyStack::new();
                engine.resolve_or_fail(&mut stack, service, true).err()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            warn!("容器验证失败: {}, 错误数量: {}", self.id, errors.len());
            Err(errors)
        }
    }

    fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_services: self.registrations.len(),
            cached_resolvers: self.resolvers.len(),
            active_singletons: self.resolvers.active_singletons(),
        }
    }

    fn dispose(&self) {
        let _guard = self.dispose_lock.lock();
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let resolvers = self.resolvers.snapshot();
        let released = resolvers.iter().filter(|r| r.holds_instance()).count();
        for resolver in &resolvers {
            resolver.dispose();
        }

        self.resolvers.clear();
        self.registrations.clear();

        info!("容器已释放: {}, 释放单例数量: {}", self.id, released);
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        if !self.is_disposed() {
            self.dispose();
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("registrations", &self.registrations.len())
            .field("resolvers", &self.resolvers.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
