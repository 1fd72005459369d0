//! Food Item Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default per-day stock for a new item
pub const DEFAULT_DAILY_STOCK: i64 = 50;

/// Food category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum FoodCategory {
    #[serde(rename = "Vegetarian")]
    #[cfg_attr(feature = "db", sqlx(rename = "Vegetarian"))]
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    #[cfg_attr(feature = "db", sqlx(rename = "Non-Vegetarian"))]
    NonVegetarian,
}

/// Meal slot an item is served in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MealSlot {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a meal slot string is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meal slot: {0}")]
pub struct UnknownMealSlot(pub String);

impl FromStr for MealSlot {
    type Err = UnknownMealSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(UnknownMealSlot(s.to_string())),
        }
    }
}

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: FoodCategory,
    pub image: String,
    pub default_meal: MealSlot,
    /// Remaining stock; decremented by purchases, never negative
    pub daily_stock: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub price: f64,
    pub category: FoodCategory,
    pub image: Option<String>,
    pub default_meal: Option<MealSlot>,
    pub daily_stock: Option<i64>,
}
