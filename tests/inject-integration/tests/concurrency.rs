//! 并发解析与注册测试

mod fixtures;

use fixtures::*;
use inject_abstractions::{ConstructorDescriptor, TypeDescriptor};
use inject_impl::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

static SLOW_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// 构造较慢的服务，用于放大并发首次解析的竞争窗口
struct SlowService {
    logger: Arc<dyn Logger>,
}

impl Injectable for SlowService {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::concrete::<Self>()
            .constructor(
                ConstructorDescriptor::of::<Self>()
                    .param::<dyn Logger>()
                    .build(|args| {
                        SLOW_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(20));
                        Ok(SlowService {
                            logger: args.take::<dyn Logger>()?,
                        })
                    }),
            )
            .build()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_singleton_constructed_once() -> anyhow::Result<()> {
    let container = Arc::new(Container::new());
    container.register_singleton::<dyn Logger, MemoryLogger>()?;
    container.register_singleton::<SlowService, SlowService>()?;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let container = container.clone();
            tokio::task::spawn_blocking(move || container.resolve::<SlowService>())
        })
        .collect();

    let mut services = Vec::new();
    for handle in handles {
        services.push(handle.await??);
    }

    assert_eq!(SLOW_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert!(services.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert!(services
        .windows(2)
        .all(|w| same_instance(&w[0].logger, &w[1].logger)));
    assert_eq!(container.stats().active_singletons, 2);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_transient_resolution() -> anyhow::Result<()> {
    let container = Arc::new(Container::new());
    container.register_singleton::<dyn Logger, MemoryLogger>()?;
    container.register_transient::<dyn Calculator, LoggingCalculator>()?;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let container = container.clone();
            tokio::task::spawn_blocking(move || {
                container
                    .resolve::<dyn Calculator>()
                    .map(|calculator| calculator.add(i, i))
            })
        })
        .collect();

    let mut sum = 0;
    for handle in handles {
        sum += handle.await??;
    }

    assert_eq!(sum, (0..8).map(|i| i * 2).sum::<i64>());
    assert_eq!(container.resolve::<dyn Logger>()?.entries().len(), 8);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_is_atomic() -> anyhow::Result<()> {
    let container = Arc::new(Container::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let container = container.clone();
            tokio::task::spawn_blocking(move || {
                container.register_singleton::<dyn EmailService, NullEmailService>()
            })
        })
        .collect();

    let mut inserted = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await? {
            Ok(()) => inserted += 1,
            Err(DependencyError::DuplicateRegistration { .. }) => duplicates += 1,
            Err(e) => return Err(e.into()),
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(container.registered_services().len(), 1);

    Ok(())
}
