//! Money calculation utilities using rust_decimal for precision
//!
//! Prices arrive and are stored as `f64`; totals are computed in `Decimal`
//! and rounded to 2 decimal places before they touch the ledger.

use super::error::OrderError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (₹1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order
pub const MAX_COUNT: i64 = 999;
/// Maximum allowed single deposit (₹10,000,000)
pub const MAX_DEPOSIT: f64 = 10_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a unit price: finite, strictly positive and within bounds
pub fn validate_unit_price(price: f64) -> Result<(), OrderError> {
    require_finite(price, "amount")?;
    if price <= 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "amount must be positive, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(OrderError::InvalidAmount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate an order quantity
pub fn validate_count(count: i64) -> Result<(), OrderError> {
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(OrderError::InvalidCount(count));
    }
    Ok(())
}

/// Validate a deposit amount: finite, strictly positive and within bounds
pub fn validate_deposit(amount: f64) -> Result<(), OrderError> {
    require_finite(amount, "deposit")?;
    if amount <= 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "deposit must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_DEPOSIT {
        return Err(OrderError::InvalidAmount(format!(
            "deposit exceeds maximum allowed ({}), got {}",
            MAX_DEPOSIT, amount
        )));
    }
    Ok(())
}

/// Validate a unit price and round it to the paisa
pub fn normalize_unit_price(price: f64) -> Result<f64, OrderError> {
    validate_unit_price(price)?;
    let rounded = round_price(price);
    if rounded <= 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "amount rounds to zero, got {}",
            price
        )));
    }
    Ok(rounded)
}

/// Validate a deposit and round it to the paisa.
///
/// Amounts that round to zero are rejected so a deposit always moves the ledger.
pub fn normalize_deposit(amount: f64) -> Result<f64, OrderError> {
    validate_deposit(amount)?;
    let rounded = round_price(amount);
    if rounded <= 0.0 {
        return Err(OrderError::InvalidAmount(format!(
            "deposit rounds to zero, got {}",
            amount
        )));
    }
    Ok(rounded)
}

/// `unit_price × count`, rounded to 2 decimal places
pub fn order_total(unit_price: f64, count: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(count))
}

/// Round a price to 2 decimal places
pub fn round_price(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the boundary.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_is_exact_to_the_paisa() {
        assert_eq!(order_total(50.0, 2), 100.0);
        assert_eq!(order_total(0.1, 3), 0.3);
        assert_eq!(order_total(19.99, 7), 139.93);
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(45.5).is_ok());
        assert!(validate_unit_price(0.0).is_err());
        assert!(validate_unit_price(-1.0).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
        assert!(validate_unit_price(MAX_PRICE + 1.0).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count(1).is_ok());
        assert!(validate_count(MAX_COUNT).is_ok());
        assert!(matches!(validate_count(0), Err(OrderError::InvalidCount(0))));
        assert!(validate_count(-3).is_err());
        assert!(validate_count(MAX_COUNT + 1).is_err());
    }

    #[test]
    fn test_validate_deposit() {
        assert!(validate_deposit(500.0).is_ok());
        assert!(validate_deposit(0.0).is_err());
        assert!(validate_deposit(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_normalize_deposit_rejects_sub_paisa_amounts() {
        assert_eq!(normalize_deposit(12.345).unwrap(), 12.35);
        assert_eq!(normalize_deposit(0.005).unwrap(), 0.01);
        assert!(matches!(
            normalize_deposit(0.001),
            Err(OrderError::InvalidAmount(_))
        ));
        assert!(normalize_deposit(0.0).is_err());
    }

    #[test]
    fn test_normalize_unit_price() {
        assert_eq!(normalize_unit_price(49.999).unwrap(), 50.0);
        assert!(normalize_unit_price(0.004).is_err());
    }
}
