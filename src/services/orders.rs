use validator::{Validate, ValidationErrors};

use crate::domain::order::{Order, SaveOrder};
use crate::domain::types::OrderId;
use crate::forms::order::SaveOrderForm;
use crate::repository::OrderWriter;
use crate::services::{ServiceError, ServiceResult};

/// Human readable summary of failed form rules, one entry per field.
fn describe_validation(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let reasons = errors
                .iter()
                .map(|error| match error.code.as_ref() {
                    "length" => "must be between 5 and 50 characters",
                    "range" => "must be greater than zero",
                    "required" => "is required",
                    _ => "is invalid",
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field} {reasons}")
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join("; ")
}

/// Validates the order dialog and creates or updates the order.
pub async fn save_order<R>(repo: &R, form: SaveOrderForm) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(describe_validation(&err)));
    }

    let payload = SaveOrder::try_from(form).map_err(|err| {
        log::error!("Failed to parse order form: {err}");
        ServiceError::from(err)
    })?;

    repo.save_order(&payload).await.map_err(|err| {
        log::error!("Failed to save order: {err}");
        ServiceError::from(err)
    })
}

/// Removes the order with the given identifier.
pub async fn delete_order<R>(repo: &R, id: OrderId) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    repo.delete_order(id).await.map_err(|err| {
        log::error!("Failed to delete order {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{OrderAmount, OrderDescription, OrderValue};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockOrderStore;

    fn sample_order(id: i32) -> Order {
        Order {
            id: OrderId::new(id).unwrap(),
            description: OrderDescription::new("Blue pens").unwrap(),
            amount: OrderAmount::new(4).unwrap(),
            value: OrderValue::new("12.50").unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    fn valid_form() -> SaveOrderForm {
        SaveOrderForm {
            id: None,
            description: "Blue pens".to_string(),
            amount: 4,
            value: 12.5,
        }
    }

    #[tokio::test]
    async fn save_order_persists_valid_form() {
        let mut repo = MockOrderStore::new();
        repo.expect_save_order()
            .withf(|order| order.id.is_none() && order.value.as_str() == "12.50")
            .times(1)
            .returning(|_| Ok(sample_order(1)));

        let saved = save_order(&repo, valid_form()).await.unwrap();

        assert_eq!(saved.id.get(), 1);
    }

    #[tokio::test]
    async fn save_order_rejects_invalid_form_without_calling_repo() {
        let mut repo = MockOrderStore::new();
        repo.expect_save_order().never();

        let form = SaveOrderForm {
            description: "Pen".to_string(),
            amount: 0,
            ..valid_form()
        };

        let result = save_order(&repo, form).await;

        match result {
            Err(ServiceError::Form(message)) => {
                assert_eq!(
                    message,
                    "amount must be greater than zero; description must be between 5 and 50 characters"
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_order_maps_remote_failures() {
        let mut repo = MockOrderStore::new();
        repo.expect_save_order().returning(|_| {
            Err(RepositoryError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let result = save_order(&repo, valid_form()).await;

        assert!(matches!(result, Err(ServiceError::Remote(_))));
    }

    #[tokio::test]
    async fn delete_order_removes_order() {
        let mut repo = MockOrderStore::new();
        repo.expect_delete_order()
            .withf(|id| id.get() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let result = delete_order(&repo, OrderId::new(2).unwrap()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_order_maps_not_found() {
        let mut repo = MockOrderStore::new();
        repo.expect_delete_order()
            .withf(|id| id.get() == 3)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_order(&repo, OrderId::new(3).unwrap()).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
