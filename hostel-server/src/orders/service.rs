//! Order placement
//!
//! A purchase touches three tables. All of it happens in one SQLite
//! transaction whose first statement is a write, so the connection takes the
//! write lock up front and concurrent purchases serialize on it:
//!
//! ```text
//! BEGIN
//!   UPDATE account   SET balance     = balance - total WHERE id = ? AND balance     >= total
//!   UPDATE food_item SET daily_stock = daily_stock - n WHERE id = ? AND daily_stock >= n
//!   INSERT INTO food_order ...
//! COMMIT
//! ```
//!
//! A conditional update that matches no row aborts the purchase; dropping the
//! transaction rolls back whatever already ran.

use shared::models::{MealSlot, Order, VerifyQrResponse};
use shared::token::OrderToken;
use shared::util::is_valid_date;
use sqlx::SqlitePool;

use super::error::{OrderError, OrderResult};
use super::{money, qr, verify};
use crate::db::repository::{account, food_item, order};

/// Input of a purchase
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub account_id: i64,
    pub item_id: i64,
    pub meal: MealSlot,
    pub date: String,
    /// Unit price; the catalog price is used when `None`
    pub unit_price: Option<f64>,
    pub count: i64,
}

/// Places and verifies food orders
#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Debit the account, take stock and record the order, atomically.
    ///
    /// On any error nothing is written.
    pub async fn place_order(&self, req: PlaceOrder) -> OrderResult<Order> {
        money::validate_count(req.count)?;
        if !is_valid_date(&req.date) {
            return Err(OrderError::InvalidDate(req.date));
        }

        // Resolved outside the transaction so the transaction opens with a write
        let unit_price = match req.unit_price {
            Some(price) => money::normalize_unit_price(price)?,
            None => {
                food_item::find_by_id(&self.pool, req.item_id)
                    .await?
                    .ok_or(OrderError::ItemNotFound(req.item_id))?
                    .price
            }
        };
        let total_amount = money::order_total(unit_price, req.count);

        let token = OrderToken {
            account_id: req.account_id,
            item_id: req.item_id,
            meal: req.meal,
            date: req.date,
            count: Some(req.count),
        };
        let qr_text = token.encode()?;
        let qr_code = match qr::render_data_url(&qr_text) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "QR image unavailable, storing token text only");
                None
            }
        };

        let mut tx = self.pool.begin().await?;

        if !account::debit_if_sufficient(&mut *tx, req.account_id, total_amount).await? {
            return match account::balance(&mut *tx, req.account_id).await? {
                None => Err(OrderError::AccountNotFound(req.account_id)),
                Some(available) => Err(OrderError::InsufficientBalance {
                    required: total_amount,
                    available,
                }),
            };
        }

        if !food_item::decrement_stock_if_available(&mut *tx, req.item_id, req.count).await? {
            return match food_item::stock(&mut *tx, req.item_id).await? {
                None => Err(OrderError::ItemNotFound(req.item_id)),
                Some(available) => Err(OrderError::InsufficientStock {
                    requested: req.count,
                    available,
                }),
            };
        }

        let placed = Order {
            id: shared::util::snowflake_id(),
            account_id: token.account_id,
            item_id: token.item_id,
            meal: token.meal,
            date: token.date,
            count: req.count,
            unit_price,
            total_amount,
            qr_text,
            qr_code,
            created_at: shared::util::now_millis(),
        };
        order::insert(&mut *tx, &placed).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = placed.id,
            account_id = placed.account_id,
            item_id = placed.item_id,
            meal = %placed.meal,
            date = %placed.date,
            count = placed.count,
            total = placed.total_amount,
            "Order placed"
        );

        Ok(placed)
    }

    /// Look up the order a scanned token refers to
    pub async fn verify(&self, qr_text: &str) -> OrderResult<VerifyQrResponse> {
        verify::verify_token(&self.pool, qr_text).await
    }
}
