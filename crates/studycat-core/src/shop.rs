//! Pet shop catalog.

use serde::Serialize;

use crate::error::ValidationError;

/// An accessory that can be bought with catcoins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub icon: &'static str,
    pub description: &'static str,
}

pub static SHOP_ITEMS: [ShopItem; 3] = [
    ShopItem {
        id: "hat",
        name: "Top Hat",
        price: 50,
        icon: "🎩",
        description: "Makes your cat look distinguished",
    },
    ShopItem {
        id: "glasses",
        name: "Glasses",
        price: 30,
        icon: "👓",
        description: "For the scholarly cat",
    },
    ShopItem {
        id: "bowtie",
        name: "Bow Tie",
        price: 40,
        icon: "🎀",
        description: "Ready for formal occasions",
    },
];

pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

/// Like [`find_item`], for user input.
pub fn lookup(id: &str) -> Result<&'static ShopItem, ValidationError> {
    find_item(id).ok_or_else(|| ValidationError::Unknown {
        kind: "shop item",
        value: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_prices() {
        assert_eq!(find_item("hat").map(|i| i.price), Some(50));
        assert_eq!(find_item("glasses").map(|i| i.price), Some(30));
        assert_eq!(find_item("bowtie").map(|i| i.price), Some(40));
        assert!(find_item("cape").is_none());
        assert!(lookup("cape").is_err());
    }
}
