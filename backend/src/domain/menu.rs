//! Static menu catalogue.
//!
//! The menu is fixed at build time; there is no persistence behind it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::Error;

/// Price of every item on the menu, in whole pesos.
pub const STANDARD_PRICE_PHP: u32 = 100;

/// Menu sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    HotCoffee,
    ColdCoffee,
    Snacks,
    Dessert,
}

impl MenuCategory {
    /// Every category in display order.
    pub const ALL: [Self; 4] = [Self::HotCoffee, Self::ColdCoffee, Self::Snacks, Self::Dessert];

    /// Identifier used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HotCoffee => "hot_coffee",
            Self::ColdCoffee => "cold_coffee",
            Self::Snacks => "snacks",
            Self::Dessert => "dessert",
        }
    }

    /// Heading shown to customers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HotCoffee => "Hot Coffee",
            Self::ColdCoffee => "Cold Coffee",
            Self::Snacks => "Snacks",
            Self::Dessert => "Dessert",
        }
    }

    const fn item_names(self) -> &'static [&'static str] {
        match self {
            Self::HotCoffee => &[
                "Cappuccino",
                "Café Latte",
                "Velvet Coffee",
                "Flat White",
                "Cinnamon Coffee",
                "Espresso",
                "Vanilla Latte",
            ],
            Self::ColdCoffee => &["Cold Brew", "Ice Latte", "Mocha Frappe", "Vanilla Ice Coffee"],
            Self::Snacks => &[
                "Chocolate Chip Cookies",
                "Sandwiches",
                "Banana Bread",
                "Brownies",
            ],
            Self::Dessert => &["Cheesecake", "Chocolate Brownie", "Carrot Cake", "Apple Pie"],
        }
    }

    /// Section contents.
    #[must_use]
    pub fn section(self) -> MenuSection {
        MenuSection {
            category: self,
            title: self.title().to_owned(),
            items: self
                .item_names()
                .iter()
                .map(|name| MenuItem {
                    name: (*name).to_owned(),
                    price: STANDARD_PRICE_PHP,
                })
                .collect(),
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a query names a category the menu does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown menu category: {0}")]
pub struct UnknownMenuCategory(pub String);

impl FromStr for MenuCategory {
    type Err = UnknownMenuCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMenuCategory(wanted.to_owned()))
    }
}

impl From<UnknownMenuCategory> for Error {
    fn from(value: UnknownMenuCategory) -> Self {
        let category = value.0.clone();
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": "category",
            "code": "unknown_category",
            "value": category,
            "allowed": MenuCategory::ALL.map(MenuCategory::as_str),
        }))
    }
}

/// A purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    #[schema(example = "Cappuccino")]
    pub name: String,
    /// Price in Philippine pesos.
    #[schema(example = 100)]
    pub price: u32,
}

/// One titled block of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// The whole menu, or only the requested category.
///
/// # Examples
/// ```
/// use siptalk::domain::menu_sections;
///
/// let all = menu_sections(None).expect("full menu");
/// assert_eq!(all.len(), 4);
/// let snacks = menu_sections(Some("snacks")).expect("known category");
/// assert_eq!(snacks[0].title, "Snacks");
/// assert!(menu_sections(Some("pizza")).is_err());
/// ```
pub fn menu_sections(category: Option<&str>) -> Result<Vec<MenuSection>, Error> {
    match category.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(MenuCategory::ALL.map(MenuCategory::section).to_vec()),
        Some(raw) => Ok(vec![raw.parse::<MenuCategory>()?.section()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(MenuCategory::HotCoffee, 7)]
    #[case(MenuCategory::ColdCoffee, 4)]
    #[case(MenuCategory::Snacks, 4)]
    #[case(MenuCategory::Dessert, 4)]
    fn sections_list_every_item(#[case] category: MenuCategory, #[case] count: usize) {
        let section = category.section();
        assert_eq!(section.items.len(), count);
        assert!(section.items.iter().all(|item| item.price == STANDARD_PRICE_PHP));
    }

    #[rstest]
    #[case("hot_coffee", MenuCategory::HotCoffee)]
    #[case(" Cold_Coffee ", MenuCategory::ColdCoffee)]
    #[case("dessert", MenuCategory::Dessert)]
    fn categories_parse_case_insensitively(#[case] raw: &str, #[case] expected: MenuCategory) {
        assert_eq!(raw.parse::<MenuCategory>(), Ok(expected));
    }

    #[test]
    fn blank_category_returns_full_menu() {
        let sections = menu_sections(Some("  ")).expect("full menu");
        let order: Vec<_> = sections.iter().map(|s| s.category).collect();
        assert_eq!(order, MenuCategory::ALL.to_vec());
    }

    #[test]
    fn unknown_category_is_invalid_request() {
        let err = menu_sections(Some("pizza")).expect_err("unknown category");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["value"], "pizza");
    }

    #[test]
    fn category_serialises_snake_case() {
        let value = serde_json::to_value(MenuCategory::ColdCoffee).expect("serialise");
        assert_eq!(value, "cold_coffee");
    }
}
