//! # Inject Macros
//!
//! 这个 crate 提供了在编译时生成类型描述符的过程宏，代替运行时反射。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 为结构体实现 `Injectable`，生成构造器、契约和释放器
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use inject_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! #[inject(implements(dyn Calculator))]
//! pub struct Calculator {
//!     logger: Arc<dyn Logger>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入组件派生宏
///
/// 生成的构造器按字段声明顺序把每个 `Arc<T>` 字段声明为对 `T` 的依赖。
///
/// # 结构体属性
///
/// - `implements(dyn A, dyn B)` - 声明满足的服务契约，同时生成 `Implements` 实现
/// - `dispose` - 容器释放时调用 `Dispose::dispose`
///
/// # 字段属性
///
/// - `default` - 不作为依赖，用 `Default::default()` 初始化
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// #[inject(implements(dyn BookingService), dispose)]
/// pub struct DefaultBookingService {
///     logger: Arc<dyn Logger>,
///     #[inject(default)]
///     bookings: Mutex<Vec<Booking>>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
