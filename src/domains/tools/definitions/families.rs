//! Resource family table.
//!
//! Contacts, products, services, bookings and the typed documents all share
//! the same list/get/create/update/delete shape. Each family is one row of
//! data here; `FamilySpec::operations()` expands a row into its operations
//! so the near-identical schemas cannot drift apart.

use serde_json::json;

use super::super::registry::Operation;
use super::super::resource::{Action, DocumentType, Family, Verb};
use super::super::router::{BodyShape, RouteSpec, Target};
use super::super::schema::{Field, Schema};

const ALL_CRUD: &[Verb] = &[Verb::List, Verb::Get, Verb::Create, Verb::Update, Verb::Delete];
const LIST_GET_CREATE: &[Verb] = &[Verb::List, Verb::Get, Verb::Create];
const LIST_CREATE: &[Verb] = &[Verb::List, Verb::Create];

/// One resource family and the operations it supports.
#[derive(Debug, Clone)]
pub struct FamilySpec {
    pub family: Family,
    /// Operation-name form, e.g. `purchase_order`.
    pub singular: &'static str,
    pub plural: &'static str,
    /// Human form used in descriptions, e.g. `purchase order`.
    pub noun: &'static str,
    pub plural_noun: &'static str,
    pub id_field: &'static str,
    pub verbs: &'static [Verb],
    /// Writable fields; `required` means required on create.
    pub fields: Vec<Field>,
    pub actions: Vec<ActionSpec>,
}

/// A family-specific operation outside plain CRUD.
#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub action: Action,
    pub id_field: Option<&'static str>,
    pub fields: Vec<Field>,
    pub query_fields: &'static [&'static str],
    pub body: BodyShape,
}

impl ActionSpec {
    fn to_operation(&self, family: Family) -> Operation {
        let mut route = RouteSpec::new(Target::Family(family), Verb::Custom(self.action))
            .with_query(self.query_fields)
            .with_body(self.body);
        if let Some(id_field) = self.id_field {
            route = route.with_id(id_field);
        }
        Operation::new(
            self.name,
            self.description,
            Schema::new(self.fields.clone()),
            route,
        )
    }
}

impl FamilySpec {
    /// Expand this row into its operations: CRUD first, then custom actions.
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations: Vec<Operation> = self
            .verbs
            .iter()
            .filter_map(|verb| self.crud_operation(*verb))
            .collect();
        operations.extend(self.actions.iter().map(|a| a.to_operation(self.family)));
        operations
    }

    fn crud_operation(&self, verb: Verb) -> Option<Operation> {
        let route = RouteSpec::new(Target::Family(self.family), verb);
        let operation = match verb {
            Verb::List => Operation::new(
                format!("get_{}", self.plural),
                format!("Get all {} from Holded", self.plural_noun),
                Schema::new(vec![page_field()]),
                route.with_query(&["page"]),
            ),
            Verb::Get => Operation::new(
                format!("get_{}", self.singular),
                format!("Get a specific {} by ID", self.noun),
                Schema::new(vec![self.id()]),
                route.with_id(self.id_field),
            ),
            Verb::Create => Operation::new(
                format!("create_{}", self.singular),
                format!("Create a new {}", self.noun),
                Schema::new(self.fields.clone()),
                route.with_body(BodyShape::Arguments),
            ),
            Verb::Update => {
                let mut fields = vec![self.id()];
                fields.extend(self.fields.iter().cloned().map(|f| f.with_required(false)));
                Operation::new(
                    format!("update_{}", self.singular),
                    format!("Update an existing {}", self.noun),
                    Schema::new(fields),
                    route.with_id(self.id_field).with_body(BodyShape::Arguments),
                )
            }
            Verb::Delete => Operation::new(
                format!("delete_{}", self.singular),
                format!("Delete {} {}", article(self.noun), self.noun),
                Schema::new(vec![self.id()]),
                route.with_id(self.id_field),
            ),
            Verb::Custom(_) => return None,
        };
        Some(operation)
    }

    fn id(&self) -> Field {
        Field::string(self.id_field, format!("{} ID", capitalize(self.noun))).required()
    }
}

/// `page` argument shared by every listing; always sent, defaulting to 1.
pub fn page_field() -> Field {
    Field::number("page", "Page number for pagination").with_default(json!(1))
}

/// Line items of a sales or purchase document.
pub fn line_items(description: &str) -> Field {
    Field::array_of(
        "items",
        description,
        vec![
            Field::string("name", ""),
            Field::number("units", ""),
            Field::number("price", ""),
            Field::number("tax", ""),
            Field::string("sku", ""),
        ],
    )
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn capitalize(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The family table.
pub fn family_table() -> Vec<FamilySpec> {
    vec![
        FamilySpec {
            family: Family::Contact,
            singular: "contact",
            plural: "contacts",
            noun: "contact",
            plural_noun: "contacts",
            id_field: "contactId",
            verbs: ALL_CRUD,
            fields: vec![
                Field::string("name", "Contact name").required(),
                Field::string("email", "Contact email"),
                Field::string("phone", "Contact phone"),
                Field::string("address", "Contact address"),
                Field::string("vatNumber", "VAT number"),
            ],
            actions: vec![],
        },
        FamilySpec {
            family: Family::Product,
            singular: "product",
            plural: "products",
            noun: "product",
            plural_noun: "products",
            id_field: "productId",
            verbs: ALL_CRUD,
            fields: vec![
                Field::string("name", "Product name").required(),
                Field::string("sku", "Product SKU"),
                Field::number("price", "Product price"),
                Field::number("tax", "Tax percentage"),
                Field::string("description", "Product description"),
            ],
            actions: vec![ActionSpec {
                name: "update_product_stock",
                description: "Update product stock",
                action: Action::Stock,
                id_field: Some("productId"),
                fields: vec![
                    Field::string("productId", "Product ID").required(),
                    Field::number("stock", "New stock quantity").required(),
                    Field::string("warehouseId", "Warehouse ID"),
                ],
                query_fields: &[],
                body: BodyShape::Wrapped("stock"),
            }],
        },
        FamilySpec {
            family: Family::Service,
            singular: "service",
            plural: "services",
            noun: "service",
            plural_noun: "services",
            id_field: "serviceId",
            verbs: LIST_GET_CREATE,
            fields: vec![
                Field::string("name", "Service name").required(),
                Field::string("description", "Service description"),
                Field::number("price", "Service price"),
                Field::number("tax", "Tax percentage"),
                Field::number("duration", "Service duration in minutes"),
            ],
            actions: vec![],
        },
        FamilySpec {
            family: Family::Booking,
            singular: "booking",
            plural: "bookings",
            noun: "booking",
            plural_noun: "bookings",
            id_field: "bookingId",
            verbs: ALL_CRUD,
            fields: vec![
                Field::string("locationId", "Location ID for the booking").required(),
                Field::string("contactId", "Contact ID for the booking").required(),
                Field::string("serviceId", "Service ID for the booking").required(),
                Field::string("startDate", "Start date and time (ISO format)").required(),
                Field::string("endDate", "End date and time (ISO format)").required(),
                Field::string("notes", "Booking notes"),
                Field::string("status", "Booking status (confirmed, pending, cancelled)"),
            ],
            actions: vec![
                ActionSpec {
                    name: "get_booking_locations",
                    description: "Get all booking locations from Holded",
                    action: Action::Locations,
                    id_field: None,
                    fields: vec![],
                    query_fields: &[],
                    body: BodyShape::Empty,
                },
                ActionSpec {
                    name: "get_booking_slots",
                    description: "Get available slots for a specific booking location",
                    action: Action::LocationSlots,
                    id_field: Some("locationId"),
                    fields: vec![
                        Field::string("locationId", "Location ID").required(),
                        Field::string("serviceId", "Specific service ID (optional)"),
                        Field::string("day", "Specific day in yyyy-mm-dd format (optional)"),
                    ],
                    query_fields: &["serviceId", "day"],
                    body: BodyShape::Empty,
                },
            ],
        },
        FamilySpec {
            family: Family::Document(DocumentType::Invoice),
            singular: "invoice",
            plural: "invoices",
            noun: "invoice",
            plural_noun: "invoices",
            id_field: "invoiceId",
            verbs: ALL_CRUD,
            fields: vec![
                Field::string("contactId", "Contact ID").required(),
                line_items("Invoice items").required(),
                Field::string("date", "Invoice date (YYYY-MM-DD)"),
                Field::string("dueDate", "Due date (YYYY-MM-DD)"),
                Field::string("notes", "Invoice notes"),
            ],
            actions: vec![ActionSpec {
                name: "send_invoice",
                description: "Send an invoice by email",
                action: Action::Send,
                id_field: Some("invoiceId"),
                fields: vec![
                    Field::string("invoiceId", "Invoice ID").required(),
                    Field::string("email", "Recipient email").required(),
                    Field::string("subject", "Email subject"),
                    Field::string("message", "Email message"),
                ],
                query_fields: &[],
                body: BodyShape::Arguments,
            }],
        },
        FamilySpec {
            family: Family::Document(DocumentType::Estimate),
            singular: "estimate",
            plural: "estimates",
            noun: "estimate/quote",
            plural_noun: "estimates/quotes",
            id_field: "estimateId",
            verbs: LIST_CREATE,
            fields: vec![
                Field::string("contactId", "Contact ID").required(),
                line_items("Estimate items").required(),
                Field::string("date", "Estimate date (YYYY-MM-DD)"),
                Field::string("validUntil", "Valid until date (YYYY-MM-DD)"),
                Field::string("notes", "Estimate notes"),
            ],
            actions: vec![],
        },
        FamilySpec {
            family: Family::Document(DocumentType::PurchaseOrder),
            singular: "purchase_order",
            plural: "purchase_orders",
            noun: "purchase order",
            plural_noun: "purchase orders",
            id_field: "purchaseOrderId",
            verbs: LIST_CREATE,
            fields: vec![
                Field::string("contactId", "Supplier contact ID").required(),
                line_items("Purchase order items").required(),
                Field::string("date", "Purchase order date (YYYY-MM-DD)"),
                Field::string("dueDate", "Due date (YYYY-MM-DD)"),
                Field::string("notes", "Purchase order notes"),
            ],
            actions: vec![],
        },
    ]
}
