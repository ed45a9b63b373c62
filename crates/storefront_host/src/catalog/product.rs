use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Stable catalog identifier for a product.
///
/// Decodes from a JSON integer or from a string holding an integer (`"12"`).
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawProductId::deserialize(deserializer)? {
            RawProductId::Number(id) => Ok(Self(id)),
            RawProductId::Text(text) => text
                .trim()
                .parse::<u64>()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("product id `{text}` is not an integer"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Catalog product record. Owned by the catalog; consumers copy fields out of it.
pub struct Product {
    /// Stable unique identifier.
    pub id: ProductId,
    /// URL slug used by product detail routes.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Ordered feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Average review rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: u32,
    /// Category label.
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Creates a product with the required fields and empty presentation fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            slug: String::new(),
            name: name.into(),
            price,
            image: String::new(),
            description: String::new(),
            features: Vec::new(),
            rating: 0.0,
            reviews: 0,
            category: String::new(),
        }
    }
}
