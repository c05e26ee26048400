//! Product records and the inventory store they live in.
//!
//! The store owns product identity and timestamps. Sorting and searching only
//! ever see snapshots returned by [`InventoryStore::list`].

use crate::core::{FieldAccessor, FieldValue};
use crate::errors::InventoryError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Store-assigned product identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inventory item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FieldAccessor for Product {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "name" => Some(FieldValue::text(&self.name)),
            "category" => Some(FieldValue::text(&self.category)),
            "price" => Some(FieldValue::Number(self.price)),
            "quantity" => Some(FieldValue::from(self.quantity)),
            "id" => Some(FieldValue::Text(Cow::Owned(self.id.to_string()))),
            "created_at" => Some(FieldValue::Text(Cow::Owned(self.created_at.to_rfc3339()))),
            "updated_at" => Some(FieldValue::Text(Cow::Owned(self.updated_at.to_rfc3339()))),
            _ => None,
        }
    }
}

/// Payload for creating a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Checks the product shape before it reaches the store.
    pub fn validate(&self) -> Result<(), InventoryError> {
        validate_text("name", &self.name)?;
        validate_text("category", &self.category)?;
        validate_price(self.price)
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), InventoryError> {
        if let Some(name) = &self.name {
            validate_text("name", name)?;
        }
        if let Some(category) = &self.category {
            validate_text("category", category)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::InvalidProduct(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), InventoryError> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::InvalidProduct(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/// Persistence boundary for products.
pub trait InventoryStore: Send + Sync {
    /// Returns a snapshot of every product.
    fn list(&self) -> Vec<Product>;

    fn get(&self, id: ProductId) -> Result<Product, InventoryError>;

    fn create(&self, product: NewProduct) -> Result<Product, InventoryError>;

    fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, InventoryError>;

    /// Removes a product and returns it.
    fn delete(&self, id: ProductId) -> Result<Product, InventoryError>;
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    products: BTreeMap<ProductId, Product>,
}

/// Thread-safe in-memory store. Ids are assigned monotonically, so `list`
/// returns products in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-filled with `products`.
    pub fn with_products<I>(products: I) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = NewProduct>,
    {
        let store = Self::new();
        for product in products {
            store.create(product)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InventoryStore for MemoryStore {
    fn list(&self) -> Vec<Product> {
        self.state.read().products.values().cloned().collect()
    }

    fn get(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.state
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(InventoryError::NotFound(id))
    }

    fn create(&self, product: NewProduct) -> Result<Product, InventoryError> {
        product.validate()?;

        let now = Utc::now();
        let mut state = self.state.write();
        state.next_id += 1;
        let id = ProductId(state.next_id);
        let created = Product {
            id,
            name: product.name,
            category: product.category,
            price: product.price,
            quantity: product.quantity,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(id, created.clone());

        debug!(product_id = %id, name = %created.name, "product created");
        Ok(created)
    }

    fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, InventoryError> {
        patch.validate()?;

        let mut state = self.state.write();
        let product = state
            .products
            .get_mut(&id)
            .ok_or(InventoryError::NotFound(id))?;
        patch.apply(product);
        product.updated_at = Utc::now();

        debug!(product_id = %id, "product updated");
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> Result<Product, InventoryError> {
        let removed = self
            .state
            .write()
            .products
            .remove(&id)
            .ok_or(InventoryError::NotFound(id))?;

        debug!(product_id = %id, "product deleted");
        Ok(removed)
    }
}
