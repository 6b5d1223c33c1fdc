use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_QUANTITY: u8 = 10;
pub const HOME_DELIVERY_CHARGE: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity must be between 0 and 10, got {0}")]
    OutOfRange(u32),
}

/// Per-item quantity as the selector allows it: 0..=10.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > MAX_QUANTITY as u32 {
            return Err(QuantityError::OutOfRange(value));
        }
        Ok(Quantity(value as u8))
    }
}

impl TryFrom<u8> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quantity::try_from(value as u32)
    }
}

impl From<Quantity> for u8 {
    fn from(q: Quantity) -> u8 {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMethod {
    #[default]
    Pickup,
    HomeDelivery,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 2] = [DeliveryMethod::Pickup, DeliveryMethod::HomeDelivery];

    pub fn charge(self) -> u32 {
        match self {
            DeliveryMethod::Pickup => 0,
            DeliveryMethod::HomeDelivery => HOME_DELIVERY_CHARGE,
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMethod::Pickup => write!(f, "Pickup from Store"),
            DeliveryMethod::HomeDelivery => write!(f, "Home Delivery"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DeliveryInfo {
    pub method: DeliveryMethod,
    pub phone: Option<String>, // only asked for home delivery
    pub address: Option<String>,
}

impl DeliveryInfo {
    pub fn pickup() -> Self {
        Self::default()
    }

    pub fn home(phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            method: DeliveryMethod::HomeDelivery,
            phone: Some(phone.into()),
            address: Some(address.into()),
        }
    }

    /// Phone as entered; an empty string counts as absent.
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(self.address.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(10)]
    fn quantity_accepts_selector_range(#[case] value: u32) {
        assert_eq!(Quantity::try_from(value).map(u8::from), Ok(value as u8));
    }

    #[rstest]
    #[case(11)]
    #[case(255)]
    #[case(1000)]
    fn quantity_rejects_out_of_range(#[case] value: u32) {
        assert_eq!(Quantity::try_from(value), Err(QuantityError::OutOfRange(value)));
    }

    #[test]
    fn quantity_deserialization_is_range_checked() {
        assert!(serde_json::from_str::<Quantity>("3").is_ok());
        assert!(serde_json::from_str::<Quantity>("11").is_err());
    }

    #[test]
    fn delivery_charge_depends_on_method() {
        assert_eq!(DeliveryMethod::Pickup.charge(), 0);
        assert_eq!(DeliveryMethod::HomeDelivery.charge(), 100);
    }

    #[test]
    fn empty_contact_fields_read_as_absent() {
        let info = DeliveryInfo::home("", "");
        assert_eq!(info.phone(), None);
        assert_eq!(info.address(), None);
        assert_eq!(DeliveryInfo::home("123", "Main St").phone(), Some("123"));
    }

    #[test]
    fn whitespace_contact_fields_are_kept_as_entered() {
        let info = DeliveryInfo::home(" ", "  Main St ");
        assert_eq!(info.phone(), Some(" "));
        assert_eq!(info.address(), Some("  Main St "));
    }
}
