//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器、注册表、解析引擎和生命周期策略实现
//!
//! ```rust
//! use inject_impl::prelude::*;
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! #[derive(Default)]
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         42
//!     }
//! }
//!
//! inject_abstractions::implements!(FixedClock => dyn Clock);
//!
//! impl Injectable for FixedClock {
//!     fn type_descriptor() -> TypeDescriptor {
//!         TypeDescriptor::concrete::<Self>()
//!             .implements::<dyn Clock>()
//!             .default_constructor()
//!             .build()
//!     }
//! }
//!
//! let container = Container::new();
//! container.register_singleton::<dyn Clock, FixedClock>().unwrap();
//!
//! let clock: Arc<dyn Clock> = container.resolve::<dyn Clock>().unwrap();
//! assert_eq!(clock.now(), 42);
//! ```

pub mod container;
pub mod lifecycle;
pub mod options;
pub mod registration;
pub mod resolver;
pub mod selector;
pub mod strategy;

pub use container::Container;
pub use lifecycle::{
    SingletonInstanceResolver, SingletonLifetime, SingletonState, TransientInstanceResolver,
    TransientLifetime,
};
pub use options::{ContainerConfig, ContainerOptions};
pub use registration::{RegistrationOutcome, RegistrationTable};
pub use selector::SinglePublicConstructorSelector;
pub use strategy::DescriptorConstructionStrategy;

/// 常用类型和 trait
pub mod prelude {
    pub use crate::{Container, ContainerOptions};
    pub use inject_abstractions::{
        Arguments, ConstructorDescriptor, DiContainer, Dispose, Implements, Injectable,
        Registrator, Resolver, ServiceProvider, TypeDescriptor,
    };
    pub use inject_common::{
        ConflictBehavior, ContainerSettings, DependencyError, DependencyResult, Lifetime,
        ServiceKey,
    };
}
