/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog API client and the UI layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product as served by the remote catalog
///
/// Read-only from the storefront's point of view: the catalog service owns
/// it and we only ever hold a possibly stale copy for the current page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "WireProduct")]
pub struct Product {
    /// Unique catalog ID (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Top-level category tag (e.g. "battery")
    #[serde(default)]
    pub category: String,
    /// Subcategory used for facets (e.g. "AGM")
    #[serde(default)]
    pub subcategory: String,
    /// Product artwork URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Free-form specification table; values may be strings or numbers
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, serde_json::Value>>,
}

/// Product as it arrives from the API
///
/// Mongo-backed servers may send both `_id` and an `id` virtual; `_id` wins
/// and a bare `id` is only used when `_id` is absent.
#[derive(Deserialize)]
struct WireProduct {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    subcategory: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    specifications: Option<BTreeMap<String, serde_json::Value>>,
}

impl TryFrom<WireProduct> for Product {
    type Error = String;

    fn try_from(wire: WireProduct) -> Result<Self, Self::Error> {
        let id = wire
            .object_id
            .or(wire.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;
        Ok(Product {
            id,
            name: wire.name,
            category: wire.category,
            subcategory: wire.subcategory,
            image: wire.image,
            description: wire.description,
            specifications: wire.specifications,
        })
    }
}

impl Product {
    /// Specification rows as display strings, in key order
    pub fn specification_rows(&self) -> Vec<(String, String)> {
        let Some(specs) = &self.specifications else {
            return Vec::new();
        };
        specs
            .iter()
            .map(|(key, value)| {
                let shown = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

/// Fixed top-level sections of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    /// Path segment under `/products/`
    pub slug: &'static str,
    /// Value of `Product::category` this section shows; `None` shows everything
    pub tag: Option<&'static str>,
    /// Human-readable title
    pub title: &'static str,
}

impl Category {
    pub const ALL: Category = Category {
        slug: "",
        tag: None,
        title: "Products",
    };
    pub const TYRES: Category = Category {
        slug: "tyres",
        tag: Some("tyre"),
        title: "Tires",
    };
    pub const WHEELS: Category = Category {
        slug: "wheels",
        tag: Some("wheel"),
        title: "Wheels",
    };
    pub const BATTERIES: Category = Category {
        slug: "batteries",
        tag: Some("battery"),
        title: "Batteries",
    };

    /// Sections listed in the sidebar, in display order
    pub const SECTIONS: [Category; 3] = [Category::TYRES, Category::WHEELS, Category::BATTERIES];

    /// Look up a section by its URL slug
    pub fn from_slug(slug: &str) -> Option<Category> {
        Self::SECTIONS.into_iter().find(|c| c.slug == slug)
    }

    /// Whether a product belongs to this section
    pub fn contains(&self, product: &Product) -> bool {
        match self.tag {
            Some(tag) => product.category == tag,
            None => true,
        }
    }

    /// Lower-case noun used in messages ("battery products")
    pub fn noun(&self) -> &'static str {
        self.tag.unwrap_or("catalog")
    }
}
