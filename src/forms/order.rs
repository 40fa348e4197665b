//! Create/edit form of the order dialog.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::order::{Order, SaveOrder};
use crate::domain::types::{OrderAmount, OrderDescription, OrderId, OrderValue};
use crate::forms::FormError;

/// Form data submitted by the order dialog.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, PartialEq)]
pub struct SaveOrderForm {
    /// Identifier of the edited order, absent when creating one.
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 5, max = 50))]
    pub description: String,
    /// Ordered quantity.
    #[validate(range(min = 1))]
    pub amount: i64,
    /// Monetary value.
    #[validate(range(exclusive_min = 0.0))]
    pub value: f64,
}

impl From<&Order> for SaveOrderForm {
    /// Prefills the dialog with an existing order.
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id.get()),
            description: order.description.as_str().to_string(),
            amount: order.amount.get(),
            value: order.value.as_f64(),
        }
    }
}

impl TryFrom<SaveOrderForm> for SaveOrder {
    type Error = FormError;

    fn try_from(form: SaveOrderForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = form
            .id
            .map(OrderId::new)
            .transpose()
            .map_err(|_| FormError::InvalidOrderId)?;
        let description =
            OrderDescription::new(form.description).map_err(|_| FormError::InvalidDescription)?;
        let amount = OrderAmount::new(form.amount).map_err(|_| FormError::InvalidAmount)?;
        let value = OrderValue::from_f64(form.value).map_err(|_| FormError::InvalidValue)?;

        Ok(SaveOrder::new(id, description, amount, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SaveOrderForm {
        SaveOrderForm {
            id: None,
            description: "Blue pens".to_string(),
            amount: 4,
            value: 12.5,
        }
    }

    #[test]
    fn test_valid_form_to_payload() {
        let payload = SaveOrder::try_from(valid_form()).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.description.as_str(), "Blue pens");
        assert_eq!(payload.amount.get(), 4);
        assert_eq!(payload.value.as_str(), "12.50");
        assert!(!payload.is_update());
    }

    #[test]
    fn test_form_with_id_updates() {
        let form = SaveOrderForm {
            id: Some(9),
            ..valid_form()
        };

        let payload = SaveOrder::try_from(form).unwrap();

        assert_eq!(payload.id.map(OrderId::get), Some(9));
        assert!(payload.is_update());
    }

    #[test]
    fn test_short_description_fails_validation() {
        let form = SaveOrderForm {
            description: "Pen".to_string(),
            ..valid_form()
        };

        assert!(form.validate().is_err());
        assert!(matches!(
            SaveOrder::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn test_long_description_fails_validation() {
        let form = SaveOrderForm {
            description: "x".repeat(51),
            ..valid_form()
        };

        assert!(form.validate().is_err());
    }

    #[test]
    fn test_non_positive_numbers_fail_validation() {
        let zero_amount = SaveOrderForm {
            amount: 0,
            ..valid_form()
        };
        let zero_value = SaveOrderForm {
            value: 0.0,
            ..valid_form()
        };

        assert!(zero_amount.validate().is_err());
        assert!(zero_value.validate().is_err());
    }

    #[test]
    fn test_padded_description_is_checked_after_trimming() {
        let form = SaveOrderForm {
            description: "  Pen  ".to_string(),
            ..valid_form()
        };

        assert!(matches!(
            SaveOrder::try_from(form),
            Err(FormError::InvalidDescription)
        ));
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let form = SaveOrderForm {
            id: Some(0),
            ..valid_form()
        };

        assert!(matches!(
            SaveOrder::try_from(form),
            Err(FormError::InvalidOrderId)
        ));
    }
}
