use thiserror::Error;

use crate::model::{CustomerInfo, DeliveryInfo, DeliveryMethod, MAX_QUANTITY};
use crate::order::OrderDraft;

/// Why an order could not be placed. Only the first broken rule is reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter delivery address and cell number.")]
    MissingDeliveryInfo,
    #[error("Please select at least 1 item.")]
    EmptyOrder,
    #[error("Maximum 10 items allowed per order.")]
    TooManyItems,
}

impl ValidationError {
    /// Over-ordering is shown as an error, the rest as warnings.
    pub fn is_error(self) -> bool {
        matches!(self, ValidationError::TooManyItems)
    }
}

pub fn validate(
    customer: &CustomerInfo,
    delivery: &DeliveryInfo,
    draft: &OrderDraft,
) -> Result<(), ValidationError> {
    if customer.name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if delivery.method == DeliveryMethod::HomeDelivery
        && (delivery.address().is_none() || delivery.phone().is_none())
    {
        return Err(ValidationError::MissingDeliveryInfo);
    }

    let total = draft.total_quantity();
    if total == 0 {
        return Err(ValidationError::EmptyOrder);
    }
    if total > MAX_QUANTITY as u32 {
        return Err(ValidationError::TooManyItems);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantity;
    use rstest::rstest;

    fn draft_with(items: &[(&str, u8)]) -> OrderDraft {
        let mut draft = OrderDraft::new();
        for (name, qty) in items {
            draft
                .set_quantity(name, Quantity::try_from(*qty).unwrap())
                .unwrap();
        }
        draft
    }

    #[test]
    fn name_is_checked_before_anything_else() {
        let draft = OrderDraft::new();
        let delivery = DeliveryInfo::home("", "");
        assert_eq!(
            validate(&CustomerInfo::new(""), &delivery, &draft),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate(&CustomerInfo::new(""), &DeliveryInfo::pickup(), &draft),
            Err(ValidationError::MissingName)
        );
    }

    // only an empty field is missing; whitespace is still an entry
    #[test]
    fn whitespace_name_is_accepted() {
        let draft = draft_with(&[("Tea", 1)]);
        assert_eq!(
            validate(&CustomerInfo::new("   "), &DeliveryInfo::pickup(), &draft),
            Ok(())
        );
    }

    #[test]
    fn whitespace_phone_counts_as_given() {
        let draft = draft_with(&[("Tea", 1)]);
        assert_eq!(
            validate(&CustomerInfo::new("Bob"), &DeliveryInfo::home(" ", "Main St"), &draft),
            Ok(())
        );
    }

    #[rstest]
    #[case(DeliveryInfo::home("123", ""))]
    #[case(DeliveryInfo::home("", "12 Mall Road"))]
    #[case(DeliveryInfo { method: DeliveryMethod::HomeDelivery, phone: None, address: None })]
    fn home_delivery_needs_phone_and_address(#[case] delivery: DeliveryInfo) {
        let draft = draft_with(&[("Tea", 1)]);
        assert_eq!(
            validate(&CustomerInfo::new("Bob"), &delivery, &draft),
            Err(ValidationError::MissingDeliveryInfo)
        );
    }

    #[test]
    fn delivery_info_is_checked_before_quantities() {
        let draft = draft_with(&[("Pizza", 10), ("Burger", 10)]);
        assert_eq!(
            validate(&CustomerInfo::new("Bob"), &DeliveryInfo::home("", ""), &draft),
            Err(ValidationError::MissingDeliveryInfo)
        );
    }

    #[test]
    fn pickup_ignores_missing_contact_details() {
        let draft = draft_with(&[("Tea", 1)]);
        let delivery = DeliveryInfo { method: DeliveryMethod::Pickup, phone: None, address: None };
        assert_eq!(validate(&CustomerInfo::new("Bob"), &delivery, &draft), Ok(()));
    }

    #[rstest]
    #[case(&[], Err(ValidationError::EmptyOrder))]
    #[case(&[("Samosa", 1)], Ok(()))]
    #[case(&[("Samosa", 10)], Ok(()))]
    #[case(&[("Samosa", 6), ("Tea", 4)], Ok(()))]
    #[case(&[("Samosa", 6), ("Tea", 5)], Err(ValidationError::TooManyItems))]
    fn quantity_bounds(#[case] items: &[(&str, u8)], #[case] expected: Result<(), ValidationError>) {
        let draft = draft_with(items);
        assert_eq!(
            validate(&CustomerInfo::new("Alice"), &DeliveryInfo::pickup(), &draft),
            expected
        );
    }

    #[test]
    fn only_too_many_items_is_an_error() {
        assert!(ValidationError::TooManyItems.is_error());
        assert!(!ValidationError::EmptyOrder.is_error());
        assert_eq!(
            ValidationError::TooManyItems.to_string(),
            "Maximum 10 items allowed per order."
        );
    }
}
