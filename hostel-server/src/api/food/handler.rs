//! Food API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{
    FoodItem, FoodItemCreate, Order, PlaceOrderRequest, VerifyQrRequest, VerifyQrResponse,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::food_item;
use crate::orders::{PlaceOrder, money};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/food/daily-menu - every catalog item with its remaining stock
pub async fn daily_menu(State(state): State<ServerState>) -> AppResult<Json<Vec<FoodItem>>> {
    let items = food_item::find_all(&state.pool).await?;
    Ok(Json(items))
}

/// POST /api/food - add a catalog item
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<(StatusCode, Json<FoodItem>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    let Ok(price) = money::normalize_unit_price(payload.price) else {
        return Err(AppError::new(ErrorCode::FoodItemInvalidPrice).with_detail("price", payload.price));
    };
    if payload.daily_stock.is_some_and(|stock| stock < 0) {
        return Err(AppError::validation("daily_stock must not be negative"));
    }

    let payload = FoodItemCreate { price, ..payload };
    let item = food_item::create(&state.pool, payload).await?;

    tracing::info!(
        item_id = item.id,
        name = %item.name,
        price = item.price,
        operator_id = user.id,
        "Food item created"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /api/food/buy - place an order for the current account
pub async fn buy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .place_order(PlaceOrder {
            account_id: user.id,
            item_id: req.item_id,
            meal: req.meal,
            date: req.date,
            unit_price: req.amount,
            count: req.count,
        })
        .await?;
    Ok(Json(order))
}

/// POST /api/food/verify-qr - resolve a scanned token to its order
///
/// An unknown order is `{"valid": false}` with 200, not an error.
pub async fn verify_qr(
    State(state): State<ServerState>,
    Json(req): Json<VerifyQrRequest>,
) -> AppResult<Json<VerifyQrResponse>> {
    if req.qr_string.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "QR string required",
        ));
    }
    let response = state.orders.verify(&req.qr_string).await?;
    Ok(Json(response))
}
