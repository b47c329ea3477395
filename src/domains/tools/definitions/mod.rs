//! Operation definitions.
//!
//! The catalog is data: a family table expanded into CRUD operations plus
//! the generic document operations.

pub mod documents;
pub mod families;

pub use families::{ActionSpec, FamilySpec, family_table};

use super::registry::Operation;

/// Every built-in operation, in catalog order.
pub fn all_operations() -> Vec<Operation> {
    let mut operations: Vec<Operation> = family_table()
        .iter()
        .flat_map(FamilySpec::operations)
        .collect();
    operations.extend(documents::operations());
    operations
}
