//! crates/oracle_core/src/shop.rs
//!
//! The mock shop: a fixed catalog and the view's own two-level navigation
//! (category list ⇄ product list).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopCategory {
    Gems,
    Rudrakshyas,
    Crystals,
    OnlinePuja,
    Yantras,
    Amulets,
}

impl ShopCategory {
    pub const ALL: [ShopCategory; 6] = [
        ShopCategory::Gems,
        ShopCategory::Rudrakshyas,
        ShopCategory::Crystals,
        ShopCategory::OnlinePuja,
        ShopCategory::Yantras,
        ShopCategory::Amulets,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShopCategory::Gems => "Gems",
            ShopCategory::Rudrakshyas => "Rudrakshyas",
            ShopCategory::Crystals => "Crystals",
            ShopCategory::OnlinePuja => "Online Puja",
            ShopCategory::Yantras => "Yantras",
            ShopCategory::Amulets => "Amulets",
        }
    }

    pub fn products(self) -> &'static [&'static str] {
        match self {
            ShopCategory::Gems => &[
                "Blue Sapphire (Neelam)",
                "Ruby (Manik)",
                "Emerald (Panna)",
                "Yellow Sapphire",
            ],
            ShopCategory::Rudrakshyas => &[
                "1 Mukhi Rudraksha",
                "5 Mukhi Rudraksha Mala",
                "Gauri Shankar",
            ],
            ShopCategory::Crystals => &[
                "Amethyst Cluster",
                "Rose Quartz Tower",
                "Clear Quartz Sphere",
            ],
            ShopCategory::OnlinePuja => &[
                "Navagraha Shanti",
                "Kaal Sarpa Dosha Nivaran",
                "Maha Mrityunjaya",
            ],
            ShopCategory::Yantras => &["Sri Yantra", "Kuber Yantra", "Mahalakshmi Yantra"],
            ShopCategory::Amulets => &[
                "Evil Eye Protection",
                "Wealth Attractor",
                "Health Talisman",
            ],
        }
    }

    /// Looks a category up by display name or snake_case id, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(&name))
    }
}

/// Local navigation inside the shop view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopBrowser {
    category: Option<ShopCategory>,
}

impl ShopBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<ShopCategory> {
        self.category
    }

    pub fn open(&mut self, category: ShopCategory) {
        self.category = Some(category);
    }

    /// Back from a product list to the categories.
    pub fn close(&mut self) {
        self.category = None;
    }

    /// Product names for the open category; empty on the category list.
    pub fn products(&self) -> &'static [&'static str] {
        self.category.map(ShopCategory::products).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browsing_moves_between_categories_and_products() {
        let mut shop = ShopBrowser::new();
        assert_eq!(shop.category(), None);
        assert!(shop.products().is_empty());

        shop.open(ShopCategory::Yantras);
        assert_eq!(shop.products(), &["Sri Yantra", "Kuber Yantra", "Mahalakshmi Yantra"]);

        shop.close();
        assert_eq!(shop, ShopBrowser::new());
    }

    #[test]
    fn every_category_is_stocked() {
        for category in ShopCategory::ALL {
            assert!(!category.products().is_empty(), "{}", category.name());
        }
    }

    #[test]
    fn categories_resolve_by_display_name() {
        assert_eq!(ShopCategory::from_name("online puja"), Some(ShopCategory::OnlinePuja));
        assert_eq!(ShopCategory::from_name("online_puja"), Some(ShopCategory::OnlinePuja));
        assert_eq!(ShopCategory::from_name("Gems"), Some(ShopCategory::Gems));
        assert_eq!(ShopCategory::from_name("Potions"), None);
    }
}
