//! 依赖解析引擎
//!
//! 递归解析构造器参数，为每个服务类型创建并缓存实例解析器。
//! 解析器的创建从不构造实例，实例只在顶层调用 `resolve()` 时产出。
//! 一次解析中新建的解析器先暂存，整个依赖图成功后才写入缓存，
//! 因此依赖图中任何一处失败都不会留下半成品。

use crate::options::ContainerConfig;
use crate::registration::RegistrationTable;
use dashmap::DashMap;
use inject_abstractions::{DependencyStack, Instance, InstanceResolver};
use inject_common::{DependencyError, DependencyResult, Lifetime, ServiceKey};
use parking_lot::{Mutex, MutexGuard};
use std::any::TypeId;
use std::sync::Arc;
use tracing::{debug, trace};

/// 缓存条目：解析器及其构造器参数
#[derive(Clone)]
struct CachedResolver {
    service: ServiceKey,
    resolver: Arc<dyn InstanceResolver>,
    dependencies: Vec<ServiceKey>,
}

/// 一次顶层解析中新建、尚未提交的解析器
#[derive(Default)]
struct PendingResolvers {
    entries: Vec<CachedResolver>,
}

impl PendingResolvers {
    fn get(&self, service: &ServiceKey) -> Option<Arc<dyn InstanceResolver>> {
        self.entries
            .iter()
            .find(|entry| entry.service == *service)
            .map(|entry| entry.resolver.clone())
    }

    fn push(
        &mut self,
        service: ServiceKey,
        resolver: Arc<dyn InstanceResolver>,
        dependencies: Vec<ServiceKey>,
    ) {
        self.entries.push(CachedResolver {
            service,
            resolver,
            dependencies,
        });
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 实例解析器缓存
///
/// 每个服务类型只保留第一个写入的解析器。
/// 被替换注册淘汰的解析器转入退役列表，容器释放时一并释放。
#[derive(Default)]
pub struct ResolverCache {
    resolvers: DashMap<TypeId, CachedResolver>,
    retired: Mutex<Vec<Arc<dyn InstanceResolver>>>,
    creation: Mutex<()>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, service: &ServiceKey) -> Option<Arc<dyn InstanceResolver>> {
        self.resolvers
            .get(&service.id)
            .map(|entry| entry.value().resolver.clone())
    }

    /// 创建锁：解析器的创建、提交和淘汰互斥执行
    fn lock_creation(&self) -> MutexGuard<'_, ()> {
        self.creation.lock()
    }

    /// 提交一次成功解析中新建的解析器
    fn commit(&self, pending: PendingResolvers) {
        for entry in pending.entries {
            self.resolvers.entry(entry.service.id).or_insert(entry);
        }
    }

    /// 淘汰服务的解析器以及所有直接或间接依赖它的解析器
    ///
    /// 返回淘汰的解析器数量。
    pub fn evict(&self, service: &ServiceKey) -> usize {
        let _creation = self.lock_creation();

        let mut evicted = vec![*service];
        let mut retired = Vec::new();
        let mut index = 0;
        while index < evicted.len() {
            let key = evicted[index];
            index += 1;

            if let Some((_, entry)) = self.resolvers.remove(&key.id) {
                retired.push(entry.resolver);
            }

            let dependents: Vec<ServiceKey> = self
                .resolvers
                .iter()
                .filter(|entry| entry.value().dependencies.contains(&key))
                .map(|entry| entry.value().service)
                .collect();
            for dependent in dependents {
                if !evicted.contains(&dependent) {
                    evicted.push(dependent);
                }
            }
        }

        let count = retired.len();
        self.retired.lock().extend(retired);
        count
    }

    /// 所有解析器的快照，包括已退役的，不持有分片锁
    pub fn snapshot(&self) -> Vec<Arc<dyn InstanceResolver>> {
        let mut resolvers: Vec<_> = self
            .resolvers
            .iter()
            .map(|entry| entry.value().resolver.clone())
            .collect();
        resolvers.extend(self.retired.lock().iter().cloned());
        resolvers
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// 已创建实例的单例数量
    pub fn active_singletons(&self) -> usize {
        self.resolvers
            .iter()
            .filter(|entry| {
                let resolver = &entry.value().resolver;
                resolver.lifetime() == Lifetime::Singleton && resolver.holds_instance()
            })
            .count()
    }

    pub fn clear(&self) {
        self.resolvers.clear();
        self.retired.lock().clear();
    }
}

impl std::fmt::Debug for ResolverCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverCache")
            .field("resolvers", &self.resolvers.len())
            .field("retired", &self.retired.lock().len())
            .finish()
    }
}

/// 解析引擎
///
/// 借用容器的注册表、缓存和配置，本身不持有状态。
pub struct ResolverEngine<'a> {
    registrations: &'a RegistrationTable,
    cache: &'a ResolverCache,
    config: &'a ContainerConfig,
}

impl<'a> ResolverEngine<'a> {
    pub fn new(
        registrations: &'a RegistrationTable,
        cache: &'a ResolverCache,
        config: &'a ContainerConfig,
    ) -> Self {
        Self {
            registrations,
            cache,
            config,
        }
    }

    /// 解析服务实例
    pub fn resolve(&self, service: Option<ServiceKey>) -> DependencyResult<Instance> {
        let service = service.ok_or(DependencyError::ServiceTypeRequired)?;
        let mut stack = DependencyStack::new();

        let resolver = self
            .resolve_or_fail(&mut stack, service, true)?
            .ok_or_else(|| unresolved(&service))?;
        resolver.resolve()
    }

    /// 解析服务实例，服务未注册时返回 `None`
    ///
    /// 只有顶层服务未注册会被吞掉，依赖缺失和循环依赖照常报错。
    pub fn try_resolve(&self, service: &ServiceKey) -> DependencyResult<Option<Instance>> {
        let mut stack = DependencyStack::new();

        match self.resolve_or_fail(&mut stack, *service, false)? {
            Some(resolver) => resolver.resolve().map(Some),
            None => Ok(None),
        }
    }

    /// 获取或创建服务的实例解析器
    ///
    /// 缓存未命中时在创建锁内构建整个依赖图，成功后一次性提交。
    pub fn resolve_or_fail(
        &self,
        stack: &mut DependencyStack,
        service: ServiceKey,
        throw_on_missing: bool,
    ) -> DependencyResult<Option<Arc<dyn InstanceResolver>>> {
        if let Some(resolver) = self.cache.get(&service) {
            trace!("解析器缓存命中: {}", service);
            return Ok(Some(resolver));
        }

        let _creation = self.cache.lock_creation();
        let mut pending = PendingResolvers::default();
        let resolver = self.build(stack, &mut pending, service, throw_on_missing)?;

        if !pending.is_empty() {
            trace!("提交解析器: {}, 新建数量: {}", service, pending.len());
            self.cache.commit(pending);
        }
        Ok(resolver)
    }

    fn build(
        &self,
        stack: &mut DependencyStack,
        pending: &mut PendingResolvers,
        service: ServiceKey,
        throw_on_missing: bool,
    ) -> DependencyResult<Option<Arc<dyn InstanceResolver>>> {
        if let Some(resolver) = self.cache.get(&service).or_else(|| pending.get(&service)) {
            return Ok(Some(resolver));
        }

        let Some(binding) = self.registrations.get(&service) else {
            if throw_on_missing {
                return Err(unresolved(&service));
            }
            return Ok(None);
        };

        let implementation = binding.implementation();
        let constructor = self
            .config
            .constructor_selector()
            .select(implementation)?
            .ok_or_else(|| DependencyError::InvalidConstructorSelection {
                implementation: implementation.key().name.to_string(),
            })?;

        let arguments = stack.scoped(service, |stack| {
            let mut arguments = Vec::with_capacity(constructor.parameters().len());
            for parameter in constructor.parameters() {
                let resolver = self
                    .build(stack, pending, *parameter, true)?
                    .ok_or_else(|| unresolved(parameter))?;
                arguments.push(resolver);
            }
            Ok(arguments)
        })?;

        let resolver = binding.lifetime().create_instance_resolver(
            Some(self.config.construction_strategy().as_ref()),
            &binding,
            Some(&constructor),
            Some(arguments),
        )?;
        debug!(
            "创建实例解析器: {} -> {} ({})",
            service,
            implementation.key(),
            binding.lifetime().kind()
        );

        pending.push(service, resolver.clone(), constructor.parameters().to_vec());
        Ok(Some(resolver))
    }
}

fn unresolved(service: &ServiceKey) -> DependencyError {
    DependencyError::UnresolvedService {
        service: service.name.to_string(),
    }
}
