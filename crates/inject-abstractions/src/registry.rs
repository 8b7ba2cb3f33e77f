//! 服务注册抽象接口

use crate::descriptor::{Implements, Injectable, Instance, TypeDescriptor};
use crate::lifecycle::LifetimePolicy;
use inject_common::{ConflictBehavior, DependencyError, DependencyResult, Lifetime, ServiceKey};
use std::sync::Arc;

/// 服务绑定
///
/// 服务类型到实现类型和生命周期策略的映射。创建后不可变。
#[derive(Clone)]
pub struct Binding {
    service: ServiceKey,
    implementation: Arc<TypeDescriptor>,
    lifetime: Arc<dyn LifetimePolicy>,
}

impl Binding {
    /// 创建绑定
    ///
    /// 实现类型不满足服务契约或不是具体类型时返回 `InvalidBinding`。
    pub fn new(
        service: ServiceKey,
        implementation: Arc<TypeDescriptor>,
        lifetime: Arc<dyn LifetimePolicy>,
    ) -> DependencyResult<Self> {
        if !implementation.is_concrete() {
            return Err(DependencyError::invalid_binding(
                service.name,
                implementation.key().name,
                "实现类型不是可构造的具体类型",
            ));
        }

        if !implementation.satisfies(&service) {
            return Err(DependencyError::invalid_binding(
                service.name,
                implementation.key().name,
                "实现类型不满足服务契约",
            ));
        }

        Ok(Self {
            service,
            implementation,
            lifetime,
        })
    }

    /// 服务类型
    pub fn service(&self) -> ServiceKey {
        self.service
    }

    /// 实现类型描述符
    pub fn implementation(&self) -> &Arc<TypeDescriptor> {
        &self.implementation
    }

    /// 生命周期策略
    pub fn lifetime(&self) -> &Arc<dyn LifetimePolicy> {
        &self.lifetime
    }

    /// 将实现实例转换为服务实例
    pub fn cast(&self, raw: &Instance) -> DependencyResult<Instance> {
        self.implementation.cast_to(&self.service, raw)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("service", &self.service.name)
            .field("implementation", &self.implementation.key().name)
            .field("lifetime", &self.lifetime.kind())
            .finish()
    }
}

/// 服务注册 trait
pub trait Registrator: Send + Sync {
    /// 注册服务
    ///
    /// - `service`、`implementation` 为空时返回 `InvalidArgument`
    /// - `lifetime` 为空时使用容器默认生命周期
    /// - 已存在注册时按冲突策略处理
    fn register(
        &self,
        service: Option<ServiceKey>,
        implementation: Option<Arc<TypeDescriptor>>,
        lifetime: Option<Arc<dyn LifetimePolicy>>,
        behavior: ConflictBehavior,
    ) -> DependencyResult<()>;

    /// 获取生命周期类型对应的共享策略
    fn lifetime_policy(&self, lifetime: Lifetime) -> Arc<dyn LifetimePolicy>;

    /// 注册类型化服务
    fn register_type<S, I>(&self) -> DependencyResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<S>,
        Self: Sized,
    {
        self.register_type_with::<S, I>(None, ConflictBehavior::Default)
    }

    /// 注册类型化服务，指定生命周期和冲突策略
    fn register_type_with<S, I>(
        &self,
        lifetime: Option<Lifetime>,
        behavior: ConflictBehavior,
    ) -> DependencyResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<S>,
        Self: Sized,
    {
        let descriptor = I::type_descriptor().with_contract::<I, S>();
        let policy = lifetime.map(|lifetime| self.lifetime_policy(lifetime));
        self.register(
            Some(ServiceKey::of::<S>()),
            Some(Arc::new(descriptor)),
            policy,
            behavior,
        )
    }

    /// 注册单例服务
    fn register_singleton<S, I>(&self) -> DependencyResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<S>,
        Self: Sized,
    {
        self.register_type_with::<S, I>(Some(Lifetime::Singleton), ConflictBehavior::Default)
    }

    /// 注册瞬时服务
    fn register_transient<S, I>(&self) -> DependencyResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<S>,
        Self: Sized,
    {
        self.register_type_with::<S, I>(Some(Lifetime::Transient), ConflictBehavior::Default)
    }

    /// 以实现类型自身作为服务类型注册
    fn register_self<I>(&self) -> DependencyResult<()>
    where
        I: Injectable,
        Self: Sized,
    {
        self.register_type::<I, I>()
    }
}
