//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps are epoch milliseconds.

pub mod account;
pub mod complaint;
pub mod food_item;
pub mod leave;
pub mod order;
pub mod room;

// Re-exports
pub use account::*;
pub use complaint::*;
pub use food_item::*;
pub use leave::*;
pub use order::*;
pub use room::*;
