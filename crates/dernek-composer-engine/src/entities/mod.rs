//! # Entities
//!
//! Records that can be mentioned, the catalog of fields that may be placed
//! into a table, and the search gateway the session queries.
//!
//! - **`field`**: `FieldKey` enumeration and the ordered `FieldCatalog`
//! - **`record`**: `EntityRecord`, shared read-only as `Arc<EntityRecord>`
//! - **`gateway`**: `EntityGateway` trait and the in-memory `MemoryGateway`
//! - **`debounce`**: deadline debouncer and the request `Generation` counter

pub mod debounce;
pub mod field;
pub mod gateway;
pub mod record;

pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, Debouncer, Generation};
pub use field::{CatalogError, FieldCatalog, FieldEntry, FieldKey, UnknownFieldKey};
pub use gateway::{DEFAULT_SEARCH_LIMIT, EntityGateway, LookupError, MembersError, MemoryGateway};
pub use record::EntityRecord;
