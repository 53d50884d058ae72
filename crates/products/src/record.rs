use serde::{Deserialize, Serialize};

use catalogx_core::{Entity, ProductId, ValueObject};

/// One catalog item as served by the product store.
///
/// The store speaks camelCase and names the identifier `_id`; plain `id` is
/// accepted as well. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// Part code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Multi-tag classification, independent of `category`/`sub_category`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
    /// Image locators; the first one is the representative thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ProductRecord {
    /// Build a record with only the required fields set.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sku: None,
            name: name.into(),
            description: description.into(),
            category: None,
            sub_category: None,
            categories: None,
            price: None,
            stock: None,
            images: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: f64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }

    /// Representative image, if any.
    ///
    /// An empty `images` list and an absent one both mean "no thumbnail";
    /// picking a fallback asset is up to the rendering layer.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .map(String::as_str)
            .filter(|locator| !locator.is_empty())
    }

    pub fn price(&self) -> Option<Price> {
        self.price.map(Price)
    }

    /// Category tags, empty when the store sent none.
    pub fn tags(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }
}

impl Entity for ProductRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Currency-agnostic unit price.
///
/// Display renders the bare number the way the store's JSON carries it
/// (`5`, `12.5`); the currency symbol is a formatting choice of the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(pub f64);

impl Price {
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Render with a currency symbol prefix, e.g. `₹49.5`.
    pub fn with_symbol(&self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
