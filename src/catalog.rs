use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub unit_price: u32,
    pub category: &'static str,
}

const fn item(category: &'static str, name: &'static str, unit_price: u32) -> CatalogItem {
    CatalogItem { name, unit_price, category }
}

pub const CATALOG_LEN: usize = 16;

/// Everything the store sells, in menu order. Receipts list lines in this order too.
pub static CATALOG: [CatalogItem; CATALOG_LEN] = [
    item("🍕 Fast Food", "Pizza", 350),
    item("🍕 Fast Food", "Burger", 120),
    item("🍕 Fast Food", "Cold Drink", 150),
    item("🥤 Drinks", "Lassi", 80),
    item("🥤 Drinks", "Fresh Juice", 100),
    item("🥤 Drinks", "Tea", 40),
    item("🍟 Snacks", "Samosa", 30),
    item("🍟 Snacks", "French Fries", 70),
    item("🍟 Snacks", "Nuggets", 100),
    item("🥜 Dry Fruits", "Almonds", 200),
    item("🥜 Dry Fruits", "Cashew Nuts", 250),
    item("🥗 Salads", "Russian Salad", 150),
    item("🥗 Salads", "Green Salad", 90),
    item("🥒 Pickles", "Mango Pickle", 50),
    item("🥒 Pickles", "Mixed Pickle", 60),
    item("🎂 Birthday Special", "Birthday Cake", 500),
];

pub fn lookup(name: &str) -> Result<&'static CatalogItem, CatalogError> {
    position(name).map(|idx| &CATALOG[idx])
}

pub fn price(name: &str) -> Result<u32, CatalogError> {
    lookup(name).map(|i| i.unit_price)
}

pub(crate) fn position(name: &str) -> Result<usize, CatalogError> {
    CATALOG
        .iter()
        .position(|i| i.name == name)
        .ok_or_else(|| CatalogError::UnknownItem(name.to_string()))
}

// Command-line input: "cold drink" should find "Cold Drink"
pub fn find_loose(name: &str) -> Result<&'static CatalogItem, CatalogError> {
    let wanted = name.trim();
    CATALOG
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CatalogError::UnknownItem(wanted.to_string()))
}

/// Categories with their items, keeping first-appearance order.
pub fn categories() -> Vec<(&'static str, Vec<&'static CatalogItem>)> {
    let mut groups: Vec<(&'static str, Vec<&'static CatalogItem>)> = Vec::new();
    for entry in CATALOG.iter() {
        match groups.last_mut() {
            Some((cat, items)) if *cat == entry.category => items.push(entry),
            _ => groups.push((entry.category, vec![entry])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pizza", 350)]
    #[case("Burger", 120)]
    #[case("Tea", 40)]
    #[case("Birthday Cake", 500)]
    fn price_of_known_items(#[case] name: &str, #[case] expected: u32) {
        assert_eq!(price(name), Ok(expected));
    }

    #[test]
    fn unknown_item_is_rejected() {
        assert_eq!(price("Sushi"), Err(CatalogError::UnknownItem("Sushi".into())));
        // exact lookup is case sensitive
        assert!(price("pizza").is_err());
    }

    #[test]
    fn loose_lookup_ignores_case_and_padding() {
        assert_eq!(find_loose("  cold DRINK ").map(|i| i.name), Ok("Cold Drink"));
        assert!(find_loose("cold").is_err());
    }

    #[test]
    fn names_are_unique() {
        for (idx, entry) in CATALOG.iter().enumerate() {
            assert_eq!(position(entry.name), Ok(idx));
        }
    }

    #[test]
    fn categories_cover_every_item_once() {
        let groups = categories();
        assert_eq!(groups.len(), 7);
        assert_eq!(groups[0].0, "🍕 Fast Food");
        assert_eq!(groups[6].1.len(), 1);
        let total: usize = groups.iter().map(|(_, items)| items.len()).sum();
        assert_eq!(total, CATALOG.len());
    }
}
