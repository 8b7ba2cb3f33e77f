//! 示例服务

use inject_abstractions::Dispose;
use inject_macros::Injectable;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// 预订记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: usize,
    pub guest: String,
    pub nights: u32,
}

pub trait AuditLog: Send + Sync {
    fn record(&self, event: &str);
    fn events(&self) -> usize;
}

/// 写入 tracing 的审计日志
#[derive(Default, Injectable)]
#[inject(implements(dyn AuditLog))]
pub struct TracingAuditLog {
    #[inject(default)]
    events: AtomicUsize,
}

impl AuditLog for TracingAuditLog {
    fn record(&self, event: &str) {
        self.events.fetch_add(1, Ordering::SeqCst);
        info!("审计: {}", event);
    }

    fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, booking: &Booking);
}

/// 缓冲通知，容器释放时统一发送
#[derive(Default, Injectable)]
#[inject(implements(dyn Notifier), dispose)]
pub struct BufferedNotifier {
    #[inject(default)]
    pending: Mutex<Vec<String>>,
}

impl Notifier for BufferedNotifier {
    fn notify(&self, booking: &Booking) {
        self.pending.lock().push(format!(
            "{} 预订 {} 晚 (#{})",
            booking.guest, booking.nights, booking.id
        ));
    }
}

impl Dispose for BufferedNotifier {
    fn dispose(&self) {
        let pending = std::mem::take(&mut *self.pending.lock());
        for message in &pending {
            info!("发送通知: {}", message);
        }
        info!("通知缓冲已清空, 共 {} 条", pending.len());
    }
}

pub trait BookingRepository: Send + Sync {
    fn save(&self, guest: &str, nights: u32) -> Booking;
    fn count(&self) -> usize;
}

#[derive(Default, Injectable)]
#[inject(implements(dyn BookingRepository))]
pub struct InMemoryBookingRepository {
    #[inject(default)]
    bookings: Mutex<Vec<Booking>>,
}

impl BookingRepository for InMemoryBookingRepository {
    fn save(&self, guest: &str, nights: u32) -> Booking {
        let mut bookings = self.bookings.lock();
        let booking = Booking {
            id: bookings.len() + 1,
            guest: guest.to_string(),
            nights,
        };
        bookings.push(booking.clone());
        booking
    }

    fn count(&self) -> usize {
        self.bookings.lock().len()
    }
}

/// 预订服务，每次解析都是新实例
#[derive(Injectable)]
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
    notifier: Arc<dyn Notifier>,
    audit: Arc<dyn AuditLog>,
}

impl BookingService {
    pub fn book(&self, guest: &str, nights: u32) -> Booking {
        let booking = self.repository.save(guest, nights);
        self.notifier.notify(&booking);
        self.audit.record(&format!("booking #{} created", booking.id));
        booking
    }
}
