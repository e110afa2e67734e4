use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A catalog product record: flat, keyed by id, timestamps maintained by the
/// service layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a product.
#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i32,
}

impl Product {
    pub fn from_new(new: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            price: new.price,
            category: new.category,
            stock: new.stock,
            created_at: now,
            updated_at: now,
        }
    }
}
