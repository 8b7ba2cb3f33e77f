//! Centralized integration tests for the inject container

mod fixtures;

use fixtures::*;
use inject_abstractions::{
    ConstructionStrategy, ConstructorDescriptor, InstanceFactory, InstanceResolver, TypeDescriptor,
};
use inject_impl::prelude::*;
use inject_impl::DescriptorConstructionStrategy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn users_container() -> Container {
    let container = Container::new();
    container.register_singleton::<dyn Logger, MemoryLogger>().unwrap();
    container
        .register_transient::<dyn Calculator, LoggingCalculator>()
        .unwrap();
    container
        .register_type::<dyn EmailService, NullEmailService>()
        .unwrap();
    container.register_self::<UsersController>().unwrap();
    container
}

#[test]
fn test_resolve_full_object_graph() {
    let container = users_container();

    let first = container.resolve::<UsersController>().unwrap();
    let second = container.resolve::<UsersController>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!same_instance(&first.calculator, &second.calculator));
    assert!(same_instance(
        first.calculator.logger(),
        second.calculator.logger()
    ));
    assert_eq!(first.email_service.name(), "null");

    assert_eq!(first.calculator.add(2, 3), 5);
    let logger = container.resolve::<dyn Logger>().unwrap();
    assert_eq!(logger.entries(), vec!["add 2 3".to_string()]);
}

#[test]
fn test_singleton_and_transient() {
    let container = Container::new();
    container
        .register_singleton::<dyn EmailService, NullEmailService>()
        .unwrap();
    container.register_transient::<dyn Logger, MemoryLogger>().unwrap();

    let a = container.resolve::<dyn EmailService>().unwrap();
    let b = container.resolve::<dyn EmailService>().unwrap();
    assert!(same_instance(&a, &b));

    let a = container.resolve::<dyn Logger>().unwrap();
    let b = container.resolve::<dyn Logger>().unwrap();
    assert!(!same_instance(&a, &b));
}

#[test]
fn test_independent_containers() {
    let first = Container::new();
    let second = Container::new();
    for container in [&first, &second] {
        container
            .register_singleton::<dyn EmailService, NullEmailService>()
            .unwrap();
    }

    assert_ne!(first.id(), second.id());
    assert!(!same_instance(
        &first.resolve::<dyn EmailService>().unwrap(),
        &second.resolve::<dyn EmailService>().unwrap()
    ));
}

#[test]
fn test_conflict_behaviors() {
    let container = Container::new();
    container
        .register_singleton::<dyn EmailService, NullEmailService>()
        .unwrap();

    let duplicate = container.register_type_with::<dyn EmailService, DisposableEmailService>(
        Some(Lifetime::Singleton),
        ConflictBehavior::Throw,
    );
    assert!(matches!(
        duplicate,
        Err(DependencyError::DuplicateRegistration { .. })
    ));

    let duplicate = container.register_type_with::<dyn EmailService, DisposableEmailService>(
        Some(Lifetime::Singleton),
        ConflictBehavior::Default,
    );
    assert!(matches!(
        duplicate,
        Err(DependencyError::DuplicateRegistration { .. })
    ));

    container
        .register_type_with::<dyn EmailService, DisposableEmailService>(
            Some(Lifetime::Singleton),
            ConflictBehavior::Keep,
        )
        .unwrap();
    assert_eq!(container.resolve::<dyn EmailService>().unwrap().name(), "null");
}

#[test]
fn test_replace_before_first_resolve() {
    let container = Container::new();
    container
        .register_singleton::<dyn EmailService, NullEmailService>()
        .unwrap();
    container
        .register_type_with::<dyn EmailService, DisposableEmailService>(
            Some(Lifetime::Singleton),
            ConflictBehavior::Replace,
        )
        .unwrap();

    assert_eq!(
        container.resolve::<dyn EmailService>().unwrap().name(),
        "disposable"
    );
    assert_eq!(container.stats().registered_services, 1);
}

#[test]
fn test_replace_after_resolve_reaches_dependents() {
    let container = Container::new();
    container.register_singleton::<dyn Logger, MemoryLogger>().unwrap();
    container
        .register_transient::<dyn Calculator, LoggingCalculator>()
        .unwrap();
    container
        .register_singleton::<dyn EmailService, DisposableEmailService>()
        .unwrap();
    container.register_self::<UsersController>().unwrap();

    let controller = container.resolve::<UsersController>().unwrap();
    assert_eq!(controller.email_service.name(), "disposable");
    let replaced = container.resolve::<dyn EmailService>().unwrap();

    container
        .register_type_with::<dyn EmailService, NullEmailService>(
            Some(Lifetime::Singleton),
            ConflictBehavior::Replace,
        )
        .unwrap();

    assert_eq!(container.resolve::<dyn EmailService>().unwrap().name(), "null");
    let controller = container.resolve::<UsersController>().unwrap();
    assert_eq!(controller.email_service.name(), "null");

    // 被替换的单例在容器释放时仍会被释放一次
    assert_eq!(replaced.disposals(), 0);
    container.dispose();
    assert_eq!(replaced.disposals(), 1);
}

#[test]
fn test_failed_graph_caches_no_resolvers() {
    let container = Container::new();
    container.register_singleton::<dyn Logger, MemoryLogger>().unwrap();
    container
        .register_transient::<dyn Calculator, LoggingCalculator>()
        .unwrap();
    container.register_self::<UsersController>().unwrap();

    let result = container.resolve::<UsersController>();
    assert!(matches!(result, Err(DependencyError::UnresolvedService { .. })));
    assert_eq!(container.stats().cached_resolvers, 0);

    container
        .register_transient::<dyn EmailService, NullEmailService>()
        .unwrap();
    container.resolve::<UsersController>().unwrap();
    assert_eq!(container.stats().cached_resolvers, 4);
}

#[test]
fn test_invalid_bindings_rejected() {
    let container = Container::new();

    let result = container.register(
        Some(ServiceKey::of::<dyn EmailService>()),
        Some(Arc::new(MemoryLogger::type_descriptor())),
        None,
        ConflictBehavior::Default,
    );
    assert!(matches!(result, Err(DependencyError::InvalidBinding { .. })));

    let result = container.register(
        Some(ServiceKey::of::<dyn EmailService>()),
        Some(Arc::new(TypeDescriptor::abstract_type::<dyn EmailService>())),
        None,
        ConflictBehavior::Default,
    );
    assert!(matches!(result, Err(DependencyError::InvalidBinding { .. })));

    assert!(container.registered_services().is_empty());
}

#[test]
fn test_missing_arguments() {
    let container = Container::new();

    let result = container.register(
        None,
        Some(Arc::new(NullEmailService::type_descriptor())),
        None,
        ConflictBehavior::Default,
    );
    assert!(matches!(result, Err(DependencyError::InvalidArgument { .. })));

    let result = container.resolve_service(None);
    assert!(matches!(result, Err(DependencyError::ServiceTypeRequired)));
}

#[test]
fn test_circular_dependency() {
    let container = Container::new();
    container.register_self::<CycleA>().unwrap();
    container.register_self::<CycleB>().unwrap();

    match container.resolve::<CycleA>() {
        Err(DependencyError::CircularDependency {
            service,
            dependency_chain,
        }) => {
            assert!(service.ends_with("CycleA"));
            assert!(dependency_chain.contains("CycleB"));
        }
        other => panic!("unexpected result: {:?}", other.err()),
    }

    // 不吞掉循环依赖
    assert!(matches!(
        container.try_resolve::<CycleB>(),
        Err(DependencyError::CircularDependency { .. })
    ));

    let errors = container.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(container.stats().cached_resolvers, 0);
}

#[test]
fn test_unregistered_services() {
    let container = Container::new();

    assert!(matches!(
        container.resolve::<dyn Logger>(),
        Err(DependencyError::UnresolvedService { .. })
    ));
    assert!(container.try_resolve::<dyn Logger>().unwrap().is_none());
    assert!(container
        .get_service(&ServiceKey::of::<dyn Logger>())
        .unwrap()
        .is_none());
}

#[test]
fn test_try_resolve_reports_missing_dependency() {
    let container = Container::new();
    container.register_self::<UsersController>().unwrap();

    let result = container.try_resolve::<UsersController>();
    assert!(matches!(
        result,
        Err(DependencyError::UnresolvedService { .. })
    ));
}

#[test]
fn test_validate_succeeds_without_constructing() {
    let container = users_container();

    container.validate().unwrap();

    let stats = container.stats();
    assert_eq!(stats.registered_services, 4);
    assert_eq!(stats.cached_resolvers, 4);
    assert_eq!(stats.active_singletons, 0);
}

#[test]
fn test_dispose_releases_singletons_once() {
    let container = Container::new();
    container
        .register_singleton::<dyn EmailService, DisposableEmailService>()
        .unwrap();
    let email = container.resolve::<dyn EmailService>().unwrap();

    container.dispose();
    assert_eq!(email.disposals(), 1);

    container.dispose();
    assert_eq!(email.disposals(), 1);

    assert_eq!(container.stats(), inject_abstractions::ContainerStats::default());
    assert!(container.registered_services().is_empty());
}

#[test]
fn test_transients_are_not_disposed() {
    let container = Container::new();
    container
        .register_transient::<dyn EmailService, DisposableEmailService>()
        .unwrap();
    let email = container.resolve::<dyn EmailService>().unwrap();

    container.dispose();

    assert_eq!(email.disposals(), 0);
}

#[test]
fn test_drop_disposes_container() {
    let email = {
        let container = Container::new();
        container
            .register_singleton::<dyn EmailService, DisposableEmailService>()
            .unwrap();
        let email = container.resolve::<dyn EmailService>().unwrap();
        email
    };

    assert_eq!(email.disposals(), 1);
}

/// 统计工厂创建次数的构造策略
#[derive(Debug, Default)]
struct CountingStrategy {
    builds: AtomicUsize,
}

impl ConstructionStrategy for CountingStrategy {
    fn build(
        &self,
        constructor: Option<&ConstructorDescriptor>,
        arguments: Option<Vec<Arc<dyn InstanceResolver>>>,
    ) -> DependencyResult<Option<InstanceFactory>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        DescriptorConstructionStrategy.build(constructor, arguments)
    }
}

#[test]
fn test_custom_construction_strategy() {
    let strategy = Arc::new(CountingStrategy::default());
    let container = Container::with_options(
        ContainerOptions::new().with_construction_strategy(strategy.clone()),
    );
    container.register_singleton::<dyn Logger, MemoryLogger>().unwrap();
    container
        .register_transient::<dyn Calculator, LoggingCalculator>()
        .unwrap();

    for _ in 0..3 {
        container.resolve::<dyn Calculator>().unwrap();
    }

    // 每个服务类型只创建一次解析器
    assert_eq!(strategy.builds.load(Ordering::SeqCst), 2);
}
