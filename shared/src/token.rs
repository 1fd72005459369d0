//! Order token codec
//!
//! An order token is the text printed into an order's QR code and scanned at
//! the mess counter:
//!
//! ```text
//! user:<account_id>|item:<item_id>|meal:<meal>|date:<YYYY-MM-DD>|count:<n>
//! ```
//!
//! Fields are separated by [`FIELD_DELIMITER`], keys from values by
//! [`KEY_DELIMITER`]. Neither may appear inside a value. Decoding ignores
//! unknown keys and treats `count` as optional so that older tokens without
//! it still resolve.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MealSlot;
use crate::util::is_valid_date;

pub const FIELD_DELIMITER: char = '|';
pub const KEY_DELIMITER: char = ':';

const KEY_USER: &str = "user";
const KEY_ITEM: &str = "item";
const KEY_MEAL: &str = "meal";
const KEY_DATE: &str = "date";
const KEY_COUNT: &str = "count";

/// Token codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("value for {0} contains a reserved delimiter")]
    ReservedCharacter(&'static str),
}

/// The identifying fields of an order, as carried by its token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderToken {
    pub account_id: i64,
    pub item_id: i64,
    pub meal: MealSlot,
    pub date: String,
    /// Quantity; absent in tokens that predate it
    pub count: Option<i64>,
}

impl OrderToken {
    /// Render the token text.
    ///
    /// Fails if `date` contains a delimiter or `count` is not positive.
    pub fn encode(&self) -> Result<String, TokenError> {
        if self.date.contains([FIELD_DELIMITER, KEY_DELIMITER]) {
            return Err(TokenError::ReservedCharacter(KEY_DATE));
        }
        if self.date.is_empty() {
            return Err(TokenError::MissingField(KEY_DATE));
        }

        let mut fields = vec![
            field(KEY_USER, &self.account_id),
            field(KEY_ITEM, &self.item_id),
            field(KEY_MEAL, &self.meal),
            field(KEY_DATE, &self.date),
        ];
        if let Some(count) = self.count {
            if count < 1 {
                return Err(TokenError::InvalidField {
                    field: KEY_COUNT,
                    value: count.to_string(),
                });
            }
            fields.push(field(KEY_COUNT, &count));
        }

        Ok(fields.join(&FIELD_DELIMITER.to_string()))
    }

    /// Parse token text back into its fields
    pub fn decode(text: &str) -> Result<Self, TokenError> {
        let parts: HashMap<String, &str> = text
            .split(FIELD_DELIMITER)
            .filter_map(|part| {
                let (key, value) = part.split_once(KEY_DELIMITER)?;
                Some((key.trim().to_ascii_lowercase(), value.trim()))
            })
            .collect();

        let account_id = parse_field(KEY_USER, required(&parts, KEY_USER)?)?;
        let item_id = parse_field(KEY_ITEM, required(&parts, KEY_ITEM)?)?;
        let meal = parse_field(KEY_MEAL, required(&parts, KEY_MEAL)?)?;

        let date = required(&parts, KEY_DATE)?;
        if !is_valid_date(date) {
            return Err(TokenError::InvalidField {
                field: KEY_DATE,
                value: date.to_string(),
            });
        }

        let count = match parts.get(KEY_COUNT).copied().filter(|v| !v.is_empty()) {
            Some(raw) => {
                let count: i64 = parse_field(KEY_COUNT, raw)?;
                if count < 1 {
                    return Err(TokenError::InvalidField {
                        field: KEY_COUNT,
                        value: raw.to_string(),
                    });
                }
                Some(count)
            }
            None => None,
        };

        Ok(Self {
            account_id,
            item_id,
            meal,
            date: date.to_string(),
            count,
        })
    }
}

impl FromStr for OrderToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

fn field(key: &str, value: &dyn fmt::Display) -> String {
    format!("{key}{KEY_DELIMITER}{value}")
}

fn required<'a>(parts: &HashMap<String, &'a str>, key: &'static str) -> Result<&'a str, TokenError> {
    parts
        .get(key)
        .copied()
        .filter(|v| !v.is_empty())
        .ok_or(TokenError::MissingField(key))
}

fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T, TokenError> {
    raw.parse().map_err(|_| TokenError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderToken {
        OrderToken {
            account_id: 1_234_567,
            item_id: 89,
            meal: MealSlot::Dinner,
            date: "2025-03-14".to_string(),
            count: Some(2),
        }
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(
            sample().encode().unwrap(),
            "user:1234567|item:89|meal:dinner|date:2025-03-14|count:2"
        );
    }

    #[test]
    fn test_decode_inverts_encode() {
        for meal in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner] {
            for count in [None, Some(1), Some(40)] {
                let token = OrderToken {
                    meal,
                    count,
                    ..sample()
                };
                let text = token.encode().unwrap();
                assert_eq!(OrderToken::decode(&text).unwrap(), token);
            }
        }
    }

    #[test]
    fn test_decode_tolerates_spacing_case_and_unknown_keys() {
        let token =
            OrderToken::decode("User: 1234567|Item: 89|Meal: Dinner|Date: 2025-03-14|Count: 2|note:x")
                .unwrap();
        assert_eq!(token, sample());
    }

    #[test]
    fn test_decode_without_count() {
        let token = OrderToken::decode("user:1|item:2|meal:lunch|date:2025-01-01").unwrap();
        assert_eq!(token.count, None);
    }

    #[test]
    fn test_decode_missing_field() {
        assert_eq!(
            OrderToken::decode("user:1|item:2|meal:lunch"),
            Err(TokenError::MissingField("date"))
        );
        assert_eq!(
            OrderToken::decode("garbage"),
            Err(TokenError::MissingField("user"))
        );
        assert_eq!(
            OrderToken::decode("user:|item:2|meal:lunch|date:2025-01-01"),
            Err(TokenError::MissingField("user"))
        );
    }

    #[test]
    fn test_decode_rejects_bad_values() {
        assert!(matches!(
            OrderToken::decode("user:1|item:2|meal:lunch|date:2025-01-01|count:zero"),
            Err(TokenError::InvalidField { field: "count", .. })
        ));
        assert!(matches!(
            OrderToken::decode("user:1|item:2|meal:lunch|date:2025-01-01|count:0"),
            Err(TokenError::InvalidField { field: "count", .. })
        ));
        assert!(matches!(
            OrderToken::decode("user:abc|item:2|meal:lunch|date:2025-01-01"),
            Err(TokenError::InvalidField { field: "user", .. })
        ));
        assert!(matches!(
            OrderToken::decode("user:1|item:2|meal:supper|date:2025-01-01"),
            Err(TokenError::InvalidField { field: "meal", .. })
        ));
        assert!(matches!(
            OrderToken::decode("user:1|item:2|meal:lunch|date:tomorrow"),
            Err(TokenError::InvalidField { field: "date", .. })
        ));
    }

    #[test]
    fn test_encode_rejects_delimiters_in_values() {
        let token = OrderToken {
            date: "2025-01-01|count:9".to_string(),
            ..sample()
        };
        assert_eq!(token.encode(), Err(TokenError::ReservedCharacter("date")));
    }

    #[test]
    fn test_encode_rejects_non_positive_count() {
        let token = OrderToken {
            count: Some(0),
            ..sample()
        };
        assert!(token.encode().is_err());
    }
}
