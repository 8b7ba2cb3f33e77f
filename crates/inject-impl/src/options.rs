//! 容器选项
//!
//! 选项中未设置的部分在容器创建时补齐默认值，之后配置不再改变。

use crate::lifecycle;
use crate::selector::SinglePublicConstructorSelector;
use crate::strategy::DescriptorConstructionStrategy;
use inject_abstractions::{ConstructionStrategy, ConstructorSelector, LifetimePolicy};
use inject_common::{ConflictBehavior, ContainerSettings, Lifetime};
use std::sync::Arc;

/// 容器选项
#[derive(Debug, Clone, Default)]
pub struct ContainerOptions {
    /// 注册时未指定生命周期使用的策略，默认瞬时
    pub default_lifetime: Option<Arc<dyn LifetimePolicy>>,
    /// 注册时使用 `Default` 冲突策略对应的策略，默认 `Throw`
    pub default_conflict_behavior: Option<ConflictBehavior>,
    /// 构造器选择器，默认要求唯一公开构造器
    pub constructor_selector: Option<Arc<dyn ConstructorSelector>>,
    /// 构造策略，默认调用构造器描述符
    pub construction_strategy: Option<Arc<dyn ConstructionStrategy>>,
}

impl ContainerOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 从可序列化设置创建选项
    pub fn from_settings(settings: &ContainerSettings) -> Self {
        Self::new()
            .with_default_lifetime(settings.default_lifetime)
            .with_default_conflict_behavior(settings.default_conflict_behavior)
    }

    pub fn with_default_lifetime(self, lifetime: Lifetime) -> Self {
        self.with_default_lifetime_policy(lifecycle::policy_for(lifetime))
    }

    pub fn with_default_lifetime_policy(mut self, policy: Arc<dyn LifetimePolicy>) -> Self {
        self.default_lifetime = Some(policy);
        self
    }

    pub fn with_default_conflict_behavior(mut self, behavior: ConflictBehavior) -> Self {
        self.default_conflict_behavior = Some(behavior);
        self
    }

    pub fn with_constructor_selector(mut self, selector: Arc<dyn ConstructorSelector>) -> Self {
        self.constructor_selector = Some(selector);
        self
    }

    pub fn with_construction_strategy(mut self, strategy: Arc<dyn ConstructionStrategy>) -> Self {
        self.construction_strategy = Some(strategy);
        self
    }

    /// 补齐默认值，得到不可变的容器配置
    pub fn into_config(self) -> ContainerConfig {
        ContainerConfig {
            default_lifetime: self.default_lifetime.unwrap_or_else(lifecycle::transient),
            default_conflict_behavior: self
                .default_conflict_behavior
                .unwrap_or(ConflictBehavior::Throw)
                .normalized(),
            constructor_selector: self
                .constructor_selector
                .unwrap_or_else(|| Arc::new(SinglePublicConstructorSelector)),
            construction_strategy: self
                .construction_strategy
                .unwrap_or_else(|| Arc::new(DescriptorConstructionStrategy)),
        }
    }
}

/// 容器配置
///
/// 所有字段都已确定。
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    default_lifetime: Arc<dyn LifetimePolicy>,
    default_conflict_behavior: ConflictBehavior,
    constructor_selector: Arc<dyn ConstructorSelector>,
    construction_strategy: Arc<dyn ConstructionStrategy>,
}

impl ContainerConfig {
    pub fn default_lifetime(&self) -> &Arc<dyn LifetimePolicy> {
        &self.default_lifetime
    }

    /// 默认冲突策略，永远不是 `Default`
    pub fn default_conflict_behavior(&self) -> ConflictBehavior {
        self.default_conflict_behavior
    }

    pub fn constructor_selector(&self) -> &Arc<dyn ConstructorSelector> {
        &self.constructor_selector
    }

    pub fn construction_strategy(&self) -> &Arc<dyn ConstructionStrategy> {
        &self.construction_strategy
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        ContainerOptions::default().into_config()
    }
}
