//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义服务注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeDescriptor`] - 实现类型的显式描述（构造器、契约、释放器）
//! - [`Registrator`] - 服务注册接口
//! - [`Resolver`] / [`ServiceProvider`] - 服务解析接口
//! - [`LifetimePolicy`] - 生命周期策略
//! - [`ConstructionStrategy`] - 构造策略
//! - [`ConstructorSelector`] - 构造器选择器
//!
//! 这里不使用运行时反射：每个实现类型都通过 [`Injectable`]
//! （手写或 `#[derive(Injectable)]` 生成）提供自己的描述符。

pub mod container;
pub mod descriptor;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
pub mod selector;

pub use container::*;
pub use descriptor::*;
pub use factory::*;
pub use lifecycle::*;
pub use registry::*;
pub use resolver::*;
pub use selector::*;

pub use inject_common::{
    ConflictBehavior, DependencyError, DependencyResult, Lifetime, ServiceKey,
};
