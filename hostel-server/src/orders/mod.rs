//! Food orders
//!
//! - **service**: transactional purchase (ledger debit, stock decrement, order insert)
//! - **verify**: token lookup for the mess counter
//! - **money**: decimal price arithmetic
//! - **qr**: PNG rendering of order tokens
//!
//! The token text format itself lives in [`shared::token`].

pub mod error;
pub mod money;
pub mod qr;
pub mod service;
pub mod verify;

pub use error::{OrderError, OrderResult};
pub use service::{OrderService, PlaceOrder};
