//! Operation Registry - the catalog of every operation the server exposes.
//!
//! The registry is built once at startup and shared read-only by both
//! façades. Building it checks that every routing declaration refers to a
//! required schema field, so a broken catalog fails at startup instead of
//! on the first call.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::definitions::all_operations;
use super::router::{BodyShape, RouteSpec, Target};
use super::schema::Schema;
use crate::core::error::{Error, Result};

// ============================================================================
// Operation
// ============================================================================

/// One externally invocable operation.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub description: String,
    pub schema: Schema,
    pub route: RouteSpec,
}

impl Operation {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: Schema,
        route: RouteSpec,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            route,
        }
    }

    /// MCP tool metadata for this operation.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.schema.to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Argument names the route consumes, which must all be required.
    fn routed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if let Target::DocumentFromArgument(field) = self.route.target {
            fields.push(field);
        }
        fields.extend(self.route.id_field);
        if let BodyShape::Field(field) = self.route.body {
            fields.push(field);
        }
        fields
    }

    fn check(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::internal("operation with empty name"));
        }
        let required = self.schema.required_fields();
        for field in self.routed_fields() {
            if !required.contains(&field) {
                return Err(Error::internal(format!(
                    "operation '{}' routes on '{}' which is not a required field",
                    self.name, field
                )));
            }
        }
        for field in self.route.query_fields {
            if self.schema.field(field).is_none() {
                return Err(Error::internal(format!(
                    "operation '{}' reads query field '{}' missing from its schema",
                    self.name, field
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Operation Registry
// ============================================================================

/// Immutable catalog of operations, in catalog order, indexed by name.
#[derive(Debug)]
pub struct OperationRegistry {
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
}

impl OperationRegistry {
    /// The built-in Holded catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_operations(all_operations())
    }

    /// Build a registry from an arbitrary operation list.
    pub fn from_operations(operations: Vec<Operation>) -> Result<Self> {
        let mut index = HashMap::with_capacity(operations.len());
        for (position, operation) in operations.iter().enumerate() {
            operation.check()?;
            if index.insert(operation.name.clone(), position).is_some() {
                return Err(Error::internal(format!(
                    "duplicate operation name '{}'",
                    operation.name
                )));
            }
        }
        Ok(Self { operations, index })
    }

    /// All operations, in catalog order.
    pub fn list(&self) -> &[Operation] {
        &self.operations
    }

    pub fn lookup(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    pub fn names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name.as_str()).collect()
    }

    /// Tool metadata for `tools/list`.
    pub fn tools(&self) -> Vec<Tool> {
        self.operations.iter().map(Operation::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
