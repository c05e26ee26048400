//! Request layer: parameter validation and the inventory service facade.
//!
//! Raw endpoint parameters are checked here, before anything reaches the
//! comparator. The sort and search entry points pull a full snapshot from the
//! store and run it through [`partition_sort`] (and [`exact_search`]).

use crate::algo::{exact_search, partition_sort};
use crate::config::ServiceConfig;
use crate::core::{Direction, FieldValue};
use crate::errors::InventoryError;
use crate::inventory::{InventoryStore, NewProduct, Product, ProductId, ProductPatch};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Product fields that may be used as a sort or search key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Category,
    Price,
    Quantity,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::Category,
        SortField::Price,
        SortField::Quantity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Price => "price",
            SortField::Quantity => "quantity",
        }
    }

    /// Whether search values for this field must parse as numbers.
    pub const fn is_numeric(self) -> bool {
        matches!(self, SortField::Price | SortField::Quantity)
    }

    fn allowed() -> String {
        Self::ALL.map(SortField::as_str).join(", ")
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = InventoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == raw)
            .ok_or_else(|| InventoryError::InvalidField {
                given: raw.to_string(),
                allowed: Self::allowed(),
            })
    }
}

/// Parses an `order` parameter (`asc` / `desc`, any case). Absent means `default`.
pub fn parse_direction(
    raw: Option<&str>,
    default: Direction,
) -> Result<Direction, InventoryError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    if raw.eq_ignore_ascii_case("asc") {
        Ok(Direction::Ascending)
    } else if raw.eq_ignore_ascii_case("desc") {
        Ok(Direction::Descending)
    } else {
        Err(InventoryError::InvalidDirection {
            given: raw.to_string(),
            allowed: "asc, desc".to_string(),
        })
    }
}

/// A validated sort request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortRequest {
    pub field: SortField,
    pub direction: Direction,
}

impl SortRequest {
    /// Validates raw `field` / `order` parameters, defaulting to ascending.
    pub fn parse(field: &str, order: Option<&str>) -> Result<Self, InventoryError> {
        Self::parse_with_default(field, order, Direction::default())
    }

    pub fn parse_with_default(
        field: &str,
        order: Option<&str>,
        default: Direction,
    ) -> Result<Self, InventoryError> {
        Ok(Self {
            field: field.parse()?,
            direction: parse_direction(order, default)?,
        })
    }
}

/// A validated search request.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    pub field: SortField,
    pub value: FieldValue<'static>,
}

impl SearchRequest {
    /// Validates raw `field` / `value` parameters.
    ///
    /// Numeric fields require a finite number; other fields take the value
    /// verbatim as text.
    pub fn parse(field: &str, value: &str) -> Result<Self, InventoryError> {
        let field: SortField = field.parse()?;
        let value = if field.is_numeric() {
            let number = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| InventoryError::NonNumericValue {
                    field: field.to_string(),
                    value: value.to_string(),
                })?;
            FieldValue::Number(number)
        } else {
            FieldValue::from(value.to_string())
        };
        Ok(Self { field, value })
    }
}

/// Result body of a sort request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SortResponse {
    pub field: SortField,
    pub order: Direction,
    pub count: usize,
    pub products: Vec<Product>,
}

/// Result of a search request. A miss is a normal outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "result", content = "product", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Product),
    NoMatch,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn into_product(self) -> Option<Product> {
        match self {
            SearchOutcome::Found(product) => Some(product),
            SearchOutcome::NoMatch => None,
        }
    }
}

/// Endpoint surface over an [`InventoryStore`].
pub struct InventoryService<S> {
    store: S,
    config: ServiceConfig,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.store.list()
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.store.get(id)
    }

    pub fn create_product(&self, product: NewProduct) -> Result<Product, InventoryError> {
        self.store.create(product).inspect_err(|err| {
            warn!(error = %err, "create rejected");
        })
    }

    pub fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, InventoryError> {
        self.store.update(id, patch).inspect_err(|err| {
            warn!(product_id = %id, error = %err, "update rejected");
        })
    }

    pub fn delete_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.store.delete(id)
    }

    /// Sorts the whole inventory by one field.
    pub fn sort_products(&self, request: &SortRequest) -> Result<SortResponse, InventoryError> {
        let snapshot = self.snapshot()?;
        let refs: Vec<&Product> = snapshot.iter().collect();
        let products: Vec<Product> =
            partition_sort(&refs, request.field.as_str(), request.direction)
                .into_iter()
                .cloned()
                .collect();

        debug!(
            field = %request.field,
            order = %request.direction,
            count = products.len(),
            "inventory sorted"
        );
        Ok(SortResponse {
            field: request.field,
            order: request.direction,
            count: products.len(),
            products,
        })
    }

    /// Finds one product whose field equals the requested value.
    ///
    /// The snapshot is sorted ascending by the same field first, which is what
    /// the binary search requires.
    pub fn search_products(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchOutcome, InventoryError> {
        let snapshot = self.snapshot()?;
        let refs: Vec<&Product> = snapshot.iter().collect();
        let key = request.field.as_str();
        let sorted = partition_sort(&refs, key, Direction::Ascending);

        let outcome = match exact_search(&sorted, key, &request.value) {
            Some(product) => SearchOutcome::Found((*product).clone()),
            None => SearchOutcome::NoMatch,
        };
        debug!(
            field = %request.field,
            value = %request.value,
            found = outcome.is_found(),
            "inventory searched"
        );
        Ok(outcome)
    }

    /// Validates raw `field` / `order` parameters and sorts.
    pub fn handle_sort(
        &self,
        field: &str,
        order: Option<&str>,
    ) -> Result<SortResponse, InventoryError> {
        let request = SortRequest::parse_with_default(field, order, self.config.default_direction)
            .inspect_err(|err| warn!(error = %err, "sort parameters rejected"))?;
        self.sort_products(&request)
    }

    /// Validates raw `field` / `value` parameters and searches.
    pub fn handle_search(&self, field: &str, value: &str) -> Result<SearchOutcome, InventoryError> {
        let request = SearchRequest::parse(field, value)
            .inspect_err(|err| warn!(error = %err, "search parameters rejected"))?;
        self.search_products(&request)
    }

    fn snapshot(&self) -> Result<Vec<Product>, InventoryError> {
        let snapshot = self.store.list();
        if let Some(limit) = self.config.max_records {
            if snapshot.len() > limit {
                warn!(count = snapshot.len(), limit, "collection too large to sort in process");
                return Err(InventoryError::TooManyRecords {
                    count: snapshot.len(),
                    limit,
                });
            }
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_allow_list() {
        assert_eq!("price".parse::<SortField>(), Ok(SortField::Price));
        let err = "colour".parse::<SortField>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid field 'colour': allowed values are name, category, price, quantity"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(parse_direction(Some("DESC"), Direction::Ascending), Ok(Direction::Descending));
        assert_eq!(parse_direction(Some("Asc"), Direction::Descending), Ok(Direction::Ascending));
        assert_eq!(parse_direction(None, Direction::Ascending), Ok(Direction::Ascending));
        assert!(matches!(
            parse_direction(Some("up"), Direction::Ascending),
            Err(InventoryError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn numeric_search_values_must_parse() {
        let request = SearchRequest::parse("quantity", " 12 ").unwrap();
        assert_eq!(request.value, FieldValue::Number(12.0));

        let err = SearchRequest::parse("price", "cheap").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(SearchRequest::parse("price", "NaN").is_err());

        let request = SearchRequest::parse("name", "42").unwrap();
        assert_eq!(request.value, FieldValue::text("42"));
    }

    #[test]
    fn search_outcome_serializes_distinctly() {
        let miss = serde_json::to_value(SearchOutcome::NoMatch).unwrap();
        assert_eq!(miss, serde_json::json!({"result": "no_match"}));
    }
}
