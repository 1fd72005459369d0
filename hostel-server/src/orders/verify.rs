//! Token verification lookup
//!
//! Read-only. A token that decodes but matches no order is a normal
//! "not found" answer, not an error. Tokens are not consumed.

use shared::models::VerifyQrResponse;
use shared::token::OrderToken;
use sqlx::SqlitePool;

use super::error::OrderResult;
use crate::db::repository::order;

pub async fn verify_token(pool: &SqlitePool, qr_text: &str) -> OrderResult<VerifyQrResponse> {
    let criteria = OrderToken::decode(qr_text)?;

    match order::find_matching(pool, &criteria).await? {
        Some(found) => {
            tracing::info!(
                order_id = found.id,
                account_id = found.account_id,
                "QR token verified"
            );
            Ok(VerifyQrResponse::valid(found))
        }
        None => {
            tracing::info!(
                account_id = criteria.account_id,
                item_id = criteria.item_id,
                date = %criteria.date,
                "QR token matched no order"
            );
            Ok(VerifyQrResponse::not_found())
        }
    }
}
