use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product record as held by the store.
///
/// A nil `id` means the record has no identity yet; the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "strictly_positive"))]
    pub price: f64,
}

impl Product {
    /// Build a record without identity.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("name must not be blank".into()));
    }
    Ok(())
}

fn strictly_positive(value: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("price must be greater than zero".into()))
    }
}

/// Request body for create and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductInfo {
    #[schema(example = "Green tea")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Loose leaf, 100g")]
    pub description: String,
    #[schema(example = 4.5)]
    pub price: f64,
}

impl ProductInfo {
    /// Attach an identity; `Uuid::nil()` for records not yet stored.
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Query string of the list endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Case-insensitive substring of the product name; blank lists everything
    pub search_term: Option<String>,
    /// Zero-based page index
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[param(default = 10, minimum = 1)]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    10
}
