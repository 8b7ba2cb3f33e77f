//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::registry::Registrator;
use crate::resolver::{Resolver, ServiceProvider};
use inject_common::{DependencyError, ServiceKey};

/// 依赖注入容器 trait
///
/// 组合根：注册、解析、服务定位和释放。
pub trait DiContainer: Registrator + Resolver + ServiceProvider {
    /// 检查是否已注册服务（使用服务标识）
    fn is_registered_key(&self, service: &ServiceKey) -> bool;

    /// 检查是否已注册服务
    fn is_registered<S>(&self) -> bool
    where
        S: ?Sized + 'static,
        Self: Sized,
    {
        self.is_registered_key(&ServiceKey::of::<S>())
    }

    /// 获取所有已注册的服务类型
    fn registered_services(&self) -> Vec<ServiceKey>;

    /// 验证所有注册的依赖关系，不创建任何实例
    fn validate(&self) -> Result<(), Vec<DependencyError>>;

    /// 获取容器统计信息
    fn stats(&self) -> ContainerStats;

    /// 释放容器
    ///
    /// 已创建的可释放单例各释放一次，然后清空解析器缓存和注册表。
    fn dispose(&self);
}

/// 容器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册服务数量
    pub registered_services: usize,
    /// 已缓存的实例解析器数量
    pub cached_resolvers: usize,
    /// 已创建的单例数量
    pub active_singletons: usize,
}
