//! 服务解析器抽象接口
//!
//! 提供依赖解析和实例产出的能力

use crate::descriptor::{downcast_instance, Instance};
use inject_common::{DependencyError, DependencyResult, Lifetime, ServiceKey};
use std::sync::Arc;

/// 实例解析器 trait
///
/// 绑定到某个服务类型，每次调用按生命周期策略返回实例。
pub trait InstanceResolver: Send + Sync {
    /// 产出服务实例
    fn resolve(&self) -> DependencyResult<Instance>;

    /// 生命周期类型
    fn lifetime(&self) -> Lifetime;

    /// 是否持有已创建的实例
    fn holds_instance(&self) -> bool {
        false
    }

    /// 释放持有的资源
    fn dispose(&self) {}
}

/// 依赖栈
///
/// 记录一次顶层解析中正在构建的服务类型，只用于循环依赖检测。
/// 每次顶层解析新建一个，沿递归调用以 `&mut` 传递，不会在线程间共享。
#[derive(Debug, Default)]
pub struct DependencyStack {
    chain: Vec<ServiceKey>,
}

impl DependencyStack {
    /// 创建新的依赖栈
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否包含指定类型
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.chain.contains(key)
    }

    /// 当前深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// 压入类型，类型已在栈中时返回循环依赖错误
    pub fn push(&mut self, key: ServiceKey) -> DependencyResult<()> {
        if self.contains(&key) {
            return Err(DependencyError::CircularDependency {
                service: key.name.to_string(),
                dependency_chain: self.describe(&key),
            });
        }
        self.chain.push(key);
        Ok(())
    }

    /// 弹出栈顶类型
    pub fn pop(&mut self) -> Option<ServiceKey> {
        self.chain.pop()
    }

    /// 在压入 `key` 的状态下执行 `f`，无论成功失败都会弹出
    pub fn scoped<T, F>(&mut self, key: ServiceKey, f: F) -> DependencyResult<T>
    where
        F: FnOnce(&mut Self) -> DependencyResult<T>,
    {
        self.push(key)?;
        let result = f(self);
        self.pop();
        result
    }

    fn describe(&self, closing: &ServiceKey) -> String {
        self.chain
            .iter()
            .chain(std::iter::once(closing))
            .map(|key| key.name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// 服务解析 trait
pub trait Resolver: Send + Sync {
    /// 解析服务，服务未注册时返回 `UnresolvedService`
    ///
    /// `service` 为空时返回 `ServiceTypeRequired`。
    fn resolve_service(&self, service: Option<ServiceKey>) -> DependencyResult<Instance>;

    /// 解析指定类型的服务
    fn resolve<S>(&self) -> DependencyResult<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        let instance = self.resolve_service(Some(ServiceKey::of::<S>()))?;
        downcast_instance::<S>(&instance)
    }
}

/// 服务定位 trait
///
/// 供宿主框架集成使用：服务未注册时返回 `None` 而不是错误，
/// 但循环依赖等其它错误照常返回。
pub trait ServiceProvider: Send + Sync {
    /// 获取服务
    fn get_service(&self, service: &ServiceKey) -> DependencyResult<Option<Instance>>;

    /// 尝试解析指定类型的服务
    fn try_resolve<S>(&self) -> DependencyResult<Option<Arc<S>>>
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.get_service(&ServiceKey::of::<S>())?
            .map(|instance| downcast_instance::<S>(&instance))
            .transpose()
    }
}
