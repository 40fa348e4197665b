//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, bounded
//! descriptions, positive quantities and money values) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters accepted in an order description.
pub const DESCRIPTION_MIN_LEN: usize = 5;
/// Maximum number of characters accepted in an order description.
pub const DESCRIPTION_MAX_LEN: usize = 50;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided page size is zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is shorter or longer than allowed.
    #[error("length must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
    /// Provided quantity or money value is zero or negative.
    #[error("value must be greater than zero")]
    NonPositiveValue,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(OrderId, "Unique identifier for an order.");

/// Number of records requested per page. Always greater than zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            return Err(TypeConstraintError::ZeroPageSize);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// Trimmed order description between [`DESCRIPTION_MIN_LEN`] and
/// [`DESCRIPTION_MAX_LEN`] characters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct OrderDescription(String);

impl OrderDescription {
    /// Trims whitespace and checks the length bounds.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let len = trimmed.chars().count();
        if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&len) {
            return Err(TypeConstraintError::InvalidLength {
                min: DESCRIPTION_MIN_LEN,
                max: DESCRIPTION_MAX_LEN,
            });
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for OrderDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OrderDescription {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OrderDescription {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderDescription> for String {
    fn from(value: OrderDescription) -> Self {
        value.0
    }
}

/// Ordered quantity. Always greater than zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct OrderAmount(i64);

impl OrderAmount {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveValue)
        }
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for OrderAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for OrderAmount {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderAmount> for i64 {
    fn from(value: OrderAmount) -> Self {
        value.0
    }
}

/// Monetary value of an order kept as a decimal string with two fractional
/// digits, which is how the order service stores it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct OrderValue(String);

impl OrderValue {
    /// Builds a value from a floating point amount, rounding to cents.
    pub fn from_f64(value: f64) -> Result<Self, TypeConstraintError> {
        if !value.is_finite() {
            return Err(TypeConstraintError::InvalidValue(value.to_string()));
        }
        let formatted = format!("{value:.2}");
        Self::new(formatted)
    }

    /// Parses a decimal string such as `"12.5"` or `"12.50"`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let parsed: f64 = trimmed
            .parse()
            .map_err(|_| TypeConstraintError::InvalidValue(trimmed.to_string()))?;
        if !parsed.is_finite() {
            return Err(TypeConstraintError::InvalidValue(trimmed.to_string()));
        }
        let cents = format!("{parsed:.2}");
        if !cents.parse::<f64>().is_ok_and(|rounded| rounded > 0.0) {
            return Err(TypeConstraintError::NonPositiveValue);
        }
        Ok(Self(cents))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric representation used by the edit form.
    pub fn as_f64(&self) -> f64 {
        self.0.parse().unwrap_or_default()
    }
}

impl Display for OrderValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OrderValue {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderValue> for String {
    fn from(value: OrderValue) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_rejects_non_positive() {
        assert_eq!(OrderId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(OrderId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(OrderId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn page_size_rejects_zero() {
        assert_eq!(PageSize::new(0), Err(TypeConstraintError::ZeroPageSize));
        assert_eq!(PageSize::default().get(), 10);
    }

    #[test]
    fn description_is_trimmed_and_bounded() {
        let description = OrderDescription::new("  Pencils  ").unwrap();
        assert_eq!(description.as_str(), "Pencils");

        assert_eq!(
            OrderDescription::new("Pen"),
            Err(TypeConstraintError::InvalidLength { min: 5, max: 50 })
        );
        assert_eq!(
            OrderDescription::new("x".repeat(51)),
            Err(TypeConstraintError::InvalidLength { min: 5, max: 50 })
        );
        assert_eq!(
            OrderDescription::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        assert!(OrderDescription::new("Descrição").is_ok());
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(OrderAmount::new(0), Err(TypeConstraintError::NonPositiveValue));
        assert_eq!(OrderAmount::new(3).unwrap().get(), 3);
    }

    #[test]
    fn value_is_normalized_to_cents() {
        assert_eq!(OrderValue::new("12.5").unwrap().as_str(), "12.50");
        assert_eq!(OrderValue::from_f64(3.456).unwrap().as_str(), "3.46");
        assert_eq!(OrderValue::new("0"), Err(TypeConstraintError::NonPositiveValue));
        assert!(matches!(
            OrderValue::new("abc"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }

    #[test]
    fn value_rounding_to_zero_is_rejected() {
        assert_eq!(
            OrderValue::new("0.004"),
            Err(TypeConstraintError::NonPositiveValue)
        );
        assert_eq!(
            OrderValue::from_f64(0.001),
            Err(TypeConstraintError::NonPositiveValue)
        );
        assert_eq!(OrderValue::new("0.005").unwrap().as_str(), "0.01");
    }

    #[test]
    fn value_deserializes_through_validation() {
        let value: OrderValue = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(value.as_str(), "7.00");
        assert!(serde_json::from_str::<OrderValue>("\"-1\"").is_err());
    }
}
