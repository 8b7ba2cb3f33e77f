//! 集成测试共享的服务类型
#![allow(dead_code)]

use inject_abstractions::Dispose;
use inject_macros::Injectable;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 比较两个服务实例是否为同一对象（忽略虚表指针）
pub fn same_instance<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn entries(&self) -> Vec<String>;
}

#[derive(Default, Injectable)]
#[inject(implements(dyn Logger))]
pub struct MemoryLogger {
    #[inject(default)]
    entries: Mutex<Vec<String>>,
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        self.entries.lock().push(message.to_string());
    }

    fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

pub trait Calculator: Send + Sync {
    fn logger(&self) -> &Arc<dyn Logger>;
    fn add(&self, a: i64, b: i64) -> i64;
}

#[derive(Injectable)]
#[inject(implements(dyn Calculator))]
pub struct LoggingCalculator {
    logger: Arc<dyn Logger>,
}

impl Calculator for LoggingCalculator {
    fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    fn add(&self, a: i64, b: i64) -> i64 {
        self.logger.log(&format!("add {a} {b}"));
        a + b
    }
}

pub trait EmailService: Send + Sync {
    fn name(&self) -> &'static str;
    fn disposals(&self) -> usize;
}

#[derive(Default, Injectable)]
#[inject(implements(dyn EmailService))]
pub struct NullEmailService;

impl EmailService for NullEmailService {
    fn name(&self) -> &'static str {
        "null"
    }

    fn disposals(&self) -> usize {
        0
    }
}

#[derive(Default, Injectable)]
#[inject(implements(dyn EmailService), dispose)]
pub struct DisposableEmailService {
    #[inject(default)]
    disposals: AtomicUsize,
}

impl EmailService for DisposableEmailService {
    fn name(&self) -> &'static str {
        "disposable"
    }

    fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

impl Dispose for DisposableEmailService {
    fn dispose(&self) {
        self.disposals.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Injectable)]
pub struct UsersController {
    pub calculator: Arc<dyn Calculator>,
    pub email_service: Arc<dyn EmailService>,
}

#[derive(Injectable)]
pub struct CycleA {
    _b: Arc<CycleB>,
}

#[derive(Injectable)]
pub struct CycleB {
    _a: Arc<CycleA>,
}
