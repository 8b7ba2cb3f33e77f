//! # Inject Common
//!
//! 这个 crate 提供了 Inject 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`ServiceKey`] - 服务类型标识
//! - [`Lifetime`] - 服务生命周期
//! - [`ConflictBehavior`] - 重复注册时的冲突处理策略
//! - [`DependencyError`] - 注册与解析错误
//! - [`ContainerSettings`] - 可序列化的容器设置
//!
//! ## 设计原则
//!
//! - 不依赖运行时反射，类型信息全部来自 `TypeId`
//! - 错误类型集中定义，各层共享
//! - 设置不可变，构建容器时一次性解析

pub mod configuration;
pub mod errors;
pub mod lifetime;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifetime::*;
pub use metadata::*;
