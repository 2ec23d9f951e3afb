use serde::{Deserialize, Serialize};

/// One menu item as the frontend and the proxy exchange it.
///
/// Incoming records may carry extra fields (images, timestamps, category
/// ids); serde drops anything not listed here. `available` is optional and
/// an item missing the flag counts as available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl MenuItem {
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    /// Dietary tags are matched as whole tags, not substrings, otherwise
    /// "non-veg" would count as "veg".
    pub fn is_veg(&self) -> bool {
        self.tags.iter().any(|tag| tag == "veg")
    }

    pub fn is_non_veg(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| tag == "non-veg" || tag == "chicken" || tag == "meat")
            || self.name.to_lowercase().contains("chicken")
    }
}

/// Trimmed view of an item for the model prompt.
///
/// Only these four fields go over the wire to the model provider; anything
/// else stays behind the proxy.
#[derive(Serialize)]
pub struct PromptItem<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub tags: &'a [String],
}

impl<'a> From<&'a MenuItem> for PromptItem<'a> {
    fn from(item: &'a MenuItem) -> Self {
        Self {
            id: &item.id,
            name: &item.name,
            price: item.price,
            tags: &item.tags,
        }
    }
}
