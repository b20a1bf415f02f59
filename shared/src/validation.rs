//! Field validation
//!
//! Checks run before a create/update request is sent. They mirror the
//! backend's own constraints so obvious mistakes never leave the client.
//! Every failure carries a `field` detail naming the offending field.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CustomerPayload, MealPayload};
use rust_decimal::Decimal;

// ── Meal limits ─────────────────────────────────────────────────────

pub const MEAL_NAME_MIN_LEN: usize = 2;
pub const MEAL_NAME_MAX_LEN: usize = 100;

/// 0.01
pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// 9999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);
pub const MAX_PRICE_SCALE: u32 = 2;

/// Minutes
pub const MIN_COOKING_TIME: u32 = 1;
/// 24 hours
pub const MAX_COOKING_TIME: u32 = 1440;

// ── Meal ────────────────────────────────────────────────────────────

/// Name: 2 to 100 characters, ASCII letters, digits and spaces only
///
/// Length and charset apply to the name as sent, surrounding spaces
/// included; only the blank check ignores them.
pub fn validate_meal_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(field_error(ErrorCode::MealInvalidName, "name", "Name is required"));
    }
    let len = name.chars().count();
    if !(MEAL_NAME_MIN_LEN..=MEAL_NAME_MAX_LEN).contains(&len) {
        return Err(field_error(
            ErrorCode::MealInvalidName,
            "name",
            format!("Name must be between {MEAL_NAME_MIN_LEN} and {MEAL_NAME_MAX_LEN} characters"),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        return Err(field_error(
            ErrorCode::MealInvalidName,
            "name",
            "Name can only contain letters, numbers and spaces",
        ));
    }
    Ok(())
}

/// Price: within [0.01, 9999.99] with at most two decimal places
pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price < MIN_PRICE {
        return Err(field_error(
            ErrorCode::MealInvalidPrice,
            "price",
            format!("Price must be at least {MIN_PRICE}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(field_error(
            ErrorCode::MealInvalidPrice,
            "price",
            format!("Price must not exceed {MAX_PRICE}"),
        ));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(field_error(
            ErrorCode::MealInvalidPrice,
            "price",
            "Price can have at most 2 decimal places",
        ));
    }
    Ok(())
}

/// Cooking time: whole minutes within [1, 1440]
pub fn validate_cooking_time(minutes: u32) -> AppResult<()> {
    if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&minutes) {
        return Err(field_error(
            ErrorCode::MealInvalidCookingTime,
            "cookingTime",
            format!(
                "Cooking time must be between {MIN_COOKING_TIME} and {MAX_COOKING_TIME} minutes, got {minutes}"
            ),
        ));
    }
    Ok(())
}

pub fn validate_meal(payload: &MealPayload) -> AppResult<()> {
    validate_meal_name(&payload.name)?;
    validate_price(payload.price)?;
    validate_cooking_time(payload.cooking_time)
}

// ── Customer ────────────────────────────────────────────────────────

/// Name must be non-empty; phone must be present (format is not checked)
pub fn validate_customer(payload: &CustomerPayload) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(field_error(
            ErrorCode::CustomerInvalidName,
            "name",
            "Please enter customer name",
        ));
    }
    if payload.phone_number.trim().is_empty() {
        return Err(field_error(
            ErrorCode::CustomerPhoneRequired,
            "phoneNumber",
            "Please enter phone number",
        ));
    }
    Ok(())
}

// ── Logs ────────────────────────────────────────────────────────────

/// Log dates are `YYYY-MM-DD`; only the shape is checked, the server
/// rejects impossible dates itself
pub fn validate_log_date(date: &str) -> AppResult<()> {
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(field_error(
            ErrorCode::InvalidFormat,
            "date",
            "Date must be in YYYY-MM-DD format",
        ));
    }
    Ok(())
}

fn field_error(code: ErrorCode, field: &str, message: impl Into<String>) -> AppError {
    AppError::with_message(code, message).with_detail("field", field)
}
