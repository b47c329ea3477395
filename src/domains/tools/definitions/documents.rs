//! Generic document operations.
//!
//! These address any document kind, with the kind chosen per call through
//! the `docType` argument instead of being fixed by the operation.

use super::super::registry::Operation;
use super::super::resource::{Action, DocumentType, Verb};
use super::super::router::{BodyShape, RouteSpec, Target};
use super::super::schema::{Field, Schema};
use super::families::page_field;

const DOC_TYPE: &str = "docType";
const DOCUMENT_ID: &str = "documentId";
const DOCUMENT_DATA: &str = "documentData";

fn doc_type_field() -> Field {
    Field::string(
        DOC_TYPE,
        format!("Document type: {}", DocumentType::NAMES.join(", ")),
    )
    .one_of(DocumentType::NAMES)
    .required()
}

fn document_id_field() -> Field {
    Field::string(DOCUMENT_ID, "Document ID").required()
}

fn route(verb: Verb) -> RouteSpec {
    RouteSpec::new(Target::DocumentFromArgument(DOC_TYPE), verb)
}

/// Operations over documents of a caller-chosen type.
pub fn operations() -> Vec<Operation> {
    vec![
        Operation::new(
            "get_documents",
            "Get documents by type (invoice, estimate, purchase, etc.)",
            Schema::new(vec![doc_type_field(), page_field()]),
            route(Verb::List).with_query(&["page"]),
        ),
        Operation::new(
            "get_document",
            "Get a specific document by type and ID",
            Schema::new(vec![doc_type_field(), document_id_field()]),
            route(Verb::Get).with_id(DOCUMENT_ID),
        ),
        Operation::new(
            "create_document",
            "Create a new document",
            Schema::new(vec![
                doc_type_field(),
                Field::object(DOCUMENT_DATA, "Document data").required(),
            ]),
            route(Verb::Create).with_body(BodyShape::Field(DOCUMENT_DATA)),
        ),
        Operation::new(
            "update_document",
            "Update an existing document by type and ID",
            Schema::new(vec![
                doc_type_field(),
                document_id_field(),
                Field::object(DOCUMENT_DATA, "Fields to update").required(),
            ]),
            route(Verb::Update)
                .with_id(DOCUMENT_ID)
                .with_body(BodyShape::Field(DOCUMENT_DATA)),
        ),
        Operation::new(
            "delete_document",
            "Delete a document by type and ID",
            Schema::new(vec![doc_type_field(), document_id_field()]),
            route(Verb::Delete).with_id(DOCUMENT_ID),
        ),
        Operation::new(
            "send_document",
            "Send a document by email",
            Schema::new(vec![
                doc_type_field(),
                document_id_field(),
                Field::string("email", "Recipient email").required(),
                Field::string("subject", "Email subject"),
                Field::string("message", "Email message"),
            ]),
            route(Verb::Custom(Action::Send))
                .with_id(DOCUMENT_ID)
                .with_body(BodyShape::Arguments),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_document_operation_requires_doc_type() {
        for op in operations() {
            assert!(
                op.schema.required_fields().contains(&DOC_TYPE),
                "{} does not require docType",
                op.name
            );
        }
    }

    #[test]
    fn test_doc_type_enumerates_all_kinds() {
        let field = doc_type_field();
        assert_eq!(field.allowed.map(<[&str]>::len), Some(DocumentType::ALL.len()));
        assert!(field.description.contains("purchaserefund"));
    }
}
