use inject_abstractions::{Dispose, Injectable, Registrator, Resolver};
use inject_impl::Container;
use inject_macros::Injectable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

trait Repository: Send + Sync {
    fn closed(&self) -> bool;
}

#[derive(Default, Injectable)]
#[inject(implements(dyn Repository), dispose)]
struct MemoryRepository {
    #[inject(default)]
    closed: AtomicBool,
}

impl Repository for MemoryRepository {
    fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Dispose for MemoryRepository {
    fn dispose(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Injectable)]
struct Service {
    repository: Arc<dyn Repository>,
}

fn main() {
    assert!(MemoryRepository::type_descriptor().is_disposable());

    let container = Container::new();
    container
        .register_singleton::<dyn Repository, MemoryRepository>()
        .unwrap();
    container.register_self::<Service>().unwrap();

    let service = container.resolve::<Service>().unwrap();
    assert!(!service.repository.closed());
}
