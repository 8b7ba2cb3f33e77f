//! 生命周期策略实现
//!
//! 单例策略对每个容器只构造一次实例，瞬时策略每次解析都构造新实例。
//! 两个策略都是无状态的共享对象，绑定只持有它们的引用。

use inject_abstractions::{
    Binding, ConstructionStrategy, ConstructorDescriptor, InstanceFactory, InstanceResolver,
    Instance, LifetimePolicy,
};
use inject_common::{DependencyError, DependencyResult, Lifetime};
use once_cell::sync::{Lazy, OnceCell};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

static SINGLETON: Lazy<Arc<dyn LifetimePolicy>> = Lazy::new(|| Arc::new(SingletonLifetime));
static TRANSIENT: Lazy<Arc<dyn LifetimePolicy>> = Lazy::new(|| Arc::new(TransientLifetime));

/// 共享的单例策略
pub fn singleton() -> Arc<dyn LifetimePolicy> {
    SINGLETON.clone()
}

/// 共享的瞬时策略
pub fn transient() -> Arc<dyn LifetimePolicy> {
    TRANSIENT.clone()
}

/// 获取生命周期类型对应的共享策略
pub fn policy_for(lifetime: Lifetime) -> Arc<dyn LifetimePolicy> {
    match lifetime {
        Lifetime::Singleton => singleton(),
        Lifetime::Transient => transient(),
    }
}

/// 单例生命周期策略
#[derive(Debug, Default, Clone, Copy)]
pub struct SingletonLifetime;

impl LifetimePolicy for SingletonLifetime {
    fn kind(&self) -> Lifetime {
        Lifetime::Singleton
    }

    fn create_instance_resolver(
        &self,
        strategy: Option<&dyn ConstructionStrategy>,
        binding: &Binding,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Arc<dyn InstanceResolver>> {
        let factory = build_factory(strategy, binding, constructor, arguments)?;
        debug!("创建单例解析器: {}", binding.service());
        Ok(Arc::new(SingletonInstanceResolver::new(binding.clone(), factory)))
    }
}

/// 瞬时生命周期策略
#[derive(Debug, Default, Clone, Copy)]
pub struct TransientLifetime;

impl LifetimePolicy for TransientLifetime {
    fn kind(&self) -> Lifetime {
        Lifetime::Transient
    }

    fn create_instance_resolver(
        &self,
        strategy: Option<&dyn ConstructionStrategy>,
        binding: &Binding,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Arc<dyn InstanceResolver>> {
        let factory = build_factory(strategy, binding, constructor, arguments)?;
        debug!("创建瞬时解析器: {}", binding.service());
        Ok(Arc::new(TransientInstanceResolver::new(binding.clone(), factory)))
    }
}

fn build_factory(
    strategy: Option<&dyn ConstructionStrategy>,
    binding: &Binding,
    constructor: Option<&ConstructorDescriptor>,
    arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
) -> DependencyResult<InstanceFactory> {
    let service = binding.service().name;
    let implementation = binding.implementation().key().name;

    let strategy = strategy.ok_or_else(|| {
        DependencyError::invalid_binding(service, implementation, "缺少构造策略")
    })?;
    let constructor = constructor.ok_or_else(|| {
        DependencyError::invalid_binding(service, implementation, "缺少构造器")
    })?;

    strategy
        .build(Some(constructor), arguments)?
        .ok_or_else(|| DependencyError::construction_failure(implementation, "构造策略没有产出实例工厂"))
}

/// 单例状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonState {
    /// 尚未构造
    Uninitialized,
    /// 正在构造
    Initializing,
    /// 已构造
    Initialized,
}

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const INITIALIZED: u8 = 2;

struct SingletonValue {
    /// 实现类型实例，释放器作用于它
    raw: Instance,
    /// 转换为服务类型后的实例
    service: Instance,
}

/// 单例实例解析器
///
/// 并发首次解析时只有一个线程执行构造，其余线程阻塞等待并得到同一个实例。
/// 构造失败时状态回到未构造，下次解析会重试。
pub struct SingletonInstanceResolver {
    binding: Binding,
    factory: InstanceFactory,
    cell: OnceCell<SingletonValue>,
    state: AtomicU8,
    disposed: AtomicBool,
}

impl SingletonInstanceResolver {
    /// 创建单例解析器
    pub fn new(binding: Binding, factory: InstanceFactory) -> Self {
        Self {
            binding,
            factory,
            cell: OnceCell::new(),
            state: AtomicU8::new(UNINITIALIZED),
            disposed: AtomicBool::new(false),
        }
    }

    /// 当前状态
    pub fn state(&self) -> SingletonState {
        match self.state.load(Ordering::Acquire) {
            INITIALIZED => SingletonState::Initialized,
            INITIALIZING => SingletonState::Initializing,
            _ => SingletonState::Uninitialized,
        }
    }

    fn construct(&self) -> DependencyResult<SingletonValue> {
        self.state.store(INITIALIZING, Ordering::Release);

        let result = (self.factory)().and_then(|raw| {
            let service = self.binding.cast(&raw)?;
            Ok(SingletonValue { raw, service })
        });

        match &result {
            Ok(_) => {
                self.state.store(INITIALIZED, Ordering::Release);
                debug!("单例已创建: {}", self.binding.service());
            }
            Err(e) => {
                self.state.store(UNINITIALIZED, Ordering::Release);
                debug!("单例创建失败: {}, 错误: {}", self.binding.service(), e);
            }
        }

        result
    }
}

impl InstanceResolver for SingletonInstanceResolver {
    fn resolve(&self) -> DependencyResult<Instance> {
        let value = self.cell.get_or_try_init(|| self.construct())?;
        Ok(value.service.clone())
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }

    fn holds_instance(&self) -> bool {
        self.cell.get().is_some()
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(value) = self.cell.get() {
            if self.binding.implementation().dispose(&value.raw) {
                info!("释放单例: {}", self.binding.service());
            }
        }
    }
}

impl std::fmt::Debug for SingletonInstanceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonInstanceResolver")
            .field("binding", &self.binding)
            .field("state", &self.state())
            .field("disposed", &self.disposed.load(Ordering::Acquire))
            .finish()
    }
}

/// 瞬时实例解析器
pub struct TransientInstanceResolver {
    binding: Binding,
    factory: InstanceFactory,
}

impl TransientInstanceResolver {
    /// 创建瞬时解析器
    pub fn new(binding: Binding, factory: InstanceFactory) -> Self {
        Self { binding, factory }
    }
}

impl InstanceResolver for TransientInstanceResolver {
    fn resolve(&self) -> DependencyResult<Instance> {
        let raw = (self.factory)()?;
        self.binding.cast(&raw)
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }
}

impl std::fmt::Debug for TransientInstanceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientInstanceResolver")
            .field("binding", &self.binding)
            .finish()
    }
}
