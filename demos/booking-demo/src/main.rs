//! # 示例应用程序
//!
//! 演示如何使用 Inject 容器组装一个预订服务

mod services;

use anyhow::Context;
use clap::Parser;
use inject_impl::prelude::*;
use services::{
    AuditLog, BookingRepository, BookingService, BufferedNotifier, InMemoryBookingRepository,
    Notifier, TracingAuditLog,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "booking-demo")]
#[command(about = "Inject 容器示例应用")]
struct Args {
    /// 容器设置文件路径
    #[arg(short, long, default_value = "config/inject.toml")]
    config: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 并发预订数量
    #[arg(long, default_value_t = 4)]
    guests: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动 Inject 示例应用");

    let container = Arc::new(build_container(&args)?);

    if let Err(errors) = container.validate() {
        for error in &errors {
            warn!("依赖验证失败: {}", error);
        }
        anyhow::bail!("容器验证失败, 共 {} 个错误", errors.len());
    }

    let handles: Vec<_> = (1..=args.guests)
        .map(|n| {
            let container = container.clone();
            tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
                let service = container.resolve::<BookingService>()?;
                let booking = service.book(&format!("guest-{n}"), n);
                info!("预订完成: {:?}", booking);
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.await??;
    }

    let repository = container.resolve::<dyn BookingRepository>()?;
    let audit = container.resolve::<dyn AuditLog>()?;
    info!(
        "预订总数: {}, 审计事件: {}, 容器统计: {:?}",
        repository.count(),
        audit.events(),
        container.stats()
    );

    container.dispose();
    info!("应用已关闭");
    Ok(())
}

/// 构建容器
fn build_container(args: &Args) -> anyhow::Result<Container> {
    let path = Path::new(&args.config);
    let settings = if path.exists() {
        ContainerSettings::load(Some(path))
    } else {
        info!("设置文件不存在，将使用默认设置和环境变量");
        ContainerSettings::load(None)
    }
    .with_context(|| format!("加载容器设置失败: {}", args.config))?;

    let container = Container::from_settings(&settings);
    container.register_singleton::<dyn AuditLog, TracingAuditLog>()?;
    container.register_singleton::<dyn Notifier, BufferedNotifier>()?;
    container.register_singleton::<dyn BookingRepository, InMemoryBookingRepository>()?;
    container.register_type::<BookingService, BookingService>()?;

    info!(
        "容器构建完成: {}, 注册服务 {} 个",
        container.id(),
        container.registered_services().len()
    );
    Ok(container)
}
