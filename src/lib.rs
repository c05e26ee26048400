//! # Shelfsort
//!
//! `shelfsort` is the core of a small inventory-tracking service: CRUD over
//! product records plus two endpoints that sort and search the in-memory
//! result set themselves instead of delegating to the store's query engine.
//!
//! The sort/search subsystem is built around one polymorphic comparator:
//!
//! - **Comparator**: [`compare_field`] orders two records by one named field,
//!   numerically when both values are numbers and by case-folded text otherwise.
//! - **Partition Sort**: [`partition_sort`] returns a newly built ordered copy
//!   of a collection using a last-element-pivot quicksort. The input is never mutated.
//! - **Exact Search**: [`exact_search`] runs a binary search for an exact key match
//!   over a collection sorted ascending by the same key.
//!
//! Around that core, [`inventory`] holds the product store and [`request`]
//! validates endpoint parameters before anything reaches the comparator.
//!
//! ## Usage
//!
//! ### Sorting and searching records
//!
//! Anything implementing [`FieldAccessor`] can be sorted. [`Record`] is a
//! ready-made field map.
//!
//! ```rust
//! use shelfsort::{exact_search, partition_sort, Direction, FieldValue, Record};
//!
//! let records = vec![
//!     Record::new().with("name", "banana"),
//!     Record::new().with("name", "Apple"),
//!     Record::new().with("name", "carrot"),
//!     Record::new().with("name", "apple"),
//! ];
//!
//! let sorted = partition_sort(&records, "name", Direction::Ascending);
//! let names: Vec<String> = sorted
//!     .iter()
//!     .map(|r| r.get("name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, vec!["Apple", "apple", "banana", "carrot"]);
//!
//! assert!(exact_search(&sorted, "name", &FieldValue::text("CARROT")).is_some());
//! assert!(exact_search(&sorted, "name", &FieldValue::text("durian")).is_none());
//! ```
//!
//! ### Inventory service
//!
//! ```rust
//! use shelfsort::{InventoryService, MemoryStore, NewProduct, SearchOutcome};
//!
//! let store = MemoryStore::with_products([
//!     NewProduct::new("Hammer", "Tools", 12.5, 4),
//!     NewProduct::new("Nails", "Hardware", 3.0, 500),
//! ])
//! .unwrap();
//! let service = InventoryService::new(store);
//!
//! let sorted = service.handle_sort("price", Some("DESC")).unwrap();
//! assert_eq!(sorted.products[0].name, "Hammer");
//!
//! let hit = service.handle_search("quantity", "500").unwrap();
//! assert!(matches!(hit, SearchOutcome::Found(ref p) if p.name == "Nails"));
//!
//! // Invalid parameters are client errors and never reach the sort.
//! assert_eq!(service.handle_sort("colour", None).unwrap_err().status_code(), 400);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Average Case**: O(N log N) comparisons for the sort, O(log N) for the search.
//! - **Worst Case**: O(N²) comparisons on already-ordered input, due to the fixed pivot.
//!   Setting [`ServiceConfig::max_records`] makes the service refuse collections above
//!   a size limit; by default there is none.
//! - **Memory Overhead**: One index per record plus two scratch buckets, and the
//!   cloned output.

pub mod algo;
pub mod config;
pub mod core;
pub mod inventory;
pub mod request;

mod errors;

pub use algo::{
    exact_search, exact_search_index, partition_sort, partition_sort_indices, partition_sort_json,
};
pub use config::ServiceConfig;
pub use crate::core::{Direction, FieldAccessor, FieldValue, Probe, Record, compare_field};
pub use errors::InventoryError;
pub use inventory::{InventoryStore, MemoryStore, NewProduct, Product, ProductId, ProductPatch};
pub use request::{
    InventoryService, SearchOutcome, SearchRequest, SortField, SortRequest, SortResponse,
};

pub mod prelude {
    pub use crate::algo::{exact_search, partition_sort, partition_sort_indices};
    pub use crate::core::{Direction, FieldAccessor, FieldValue, Record, compare_field};
}
