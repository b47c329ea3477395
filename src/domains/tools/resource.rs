//! Resource families, document types and verbs.
//!
//! A `ResourceDescriptor` fixes the HTTP method and path shape of a call.
//! Documents are one family parameterized by `DocumentType`, so every
//! document kind shares the same list/get/create/update/delete paths.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

/// Closed set of Holded document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Invoice,
    SalesReceipt,
    CreditNote,
    SalesOrder,
    Proform,
    Waybill,
    Estimate,
    Purchase,
    PurchaseOrder,
    PurchaseRefund,
}

impl DocumentType {
    pub const ALL: [DocumentType; 10] = [
        Self::Invoice,
        Self::SalesReceipt,
        Self::CreditNote,
        Self::SalesOrder,
        Self::Proform,
        Self::Waybill,
        Self::Estimate,
        Self::Purchase,
        Self::PurchaseOrder,
        Self::PurchaseRefund,
    ];

    /// Wire names, in the same order as `ALL`.
    pub const NAMES: &'static [&'static str] = &[
        "invoice",
        "salesreceipt",
        "creditnote",
        "salesorder",
        "proform",
        "waybill",
        "estimate",
        "purchase",
        "purchaseorder",
        "purchaserefund",
    ];

    /// Path segment used by the Holded API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::SalesReceipt => "salesreceipt",
            Self::CreditNote => "creditnote",
            Self::SalesOrder => "salesorder",
            Self::Proform => "proform",
            Self::Waybill => "waybill",
            Self::Estimate => "estimate",
            Self::Purchase => "purchase",
            Self::PurchaseOrder => "purchaseorder",
            Self::PurchaseRefund => "purchaserefund",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

/// A group of resources sharing one verb set and path shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Contact,
    Product,
    Service,
    Document(DocumentType),
    Booking,
}

impl Family {
    /// Collection path below the API base.
    pub fn collection_segments(self) -> Vec<String> {
        let base: &[&str] = match self {
            Self::Contact => &["invoicing", "v1", "contacts"],
            Self::Product => &["invoicing", "v1", "products"],
            Self::Service => &["invoicing", "v1", "services"],
            Self::Document(_) => &["invoicing", "v1", "documents"],
            Self::Booking => &["crm", "v1", "bookings"],
        };
        let mut segments: Vec<String> = base.iter().map(|s| s.to_string()).collect();
        if let Self::Document(doc_type) = self {
            segments.push(doc_type.as_str().to_string());
        }
        segments
    }

    /// Document subtype, present only for the document family.
    pub fn subtype(self) -> Option<DocumentType> {
        match self {
            Self::Document(doc_type) => Some(doc_type),
            _ => None,
        }
    }
}

/// Resource-specific actions outside plain CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `POST {collection}/{id}/send` - email a document.
    Send,
    /// `POST {collection}/{id}/stock` - adjust product stock.
    Stock,
    /// `GET {collection}/locations` - booking locations.
    Locations,
    /// `GET {collection}/locations/{id}/slots` - free slots of a location.
    LocationSlots,
}

impl Action {
    pub fn method(self) -> Method {
        match self {
            Self::Send | Self::Stock => Method::POST,
            Self::Locations | Self::LocationSlots => Method::GET,
        }
    }

    pub fn needs_id(self) -> bool {
        !matches!(self, Self::Locations)
    }
}

/// Generic verb applied to a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    List,
    Get,
    Create,
    Update,
    Delete,
    Custom(Action),
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Self::List | Self::Get => Method::GET,
            Self::Create => Method::POST,
            Self::Update => Method::PUT,
            Self::Delete => Method::DELETE,
            Self::Custom(action) => action.method(),
        }
    }

    /// Whether the path carries an instance id.
    pub fn needs_id(self) -> bool {
        match self {
            Self::List | Self::Create => false,
            Self::Get | Self::Update | Self::Delete => true,
            Self::Custom(action) => action.needs_id(),
        }
    }
}

/// A family plus the verb applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub family: Family,
    pub verb: Verb,
}

impl ResourceDescriptor {
    pub fn new(family: Family, verb: Verb) -> Self {
        Self { family, verb }
    }

    pub fn method(&self) -> Method {
        self.verb.method()
    }

    /// Path segments for this call. Returns `None` when the verb needs an
    /// id and none was given.
    pub fn segments(&self, id: Option<&str>) -> Option<Vec<String>> {
        let mut segments = self.family.collection_segments();
        let id = match (self.verb.needs_id(), id) {
            (true, None) => return None,
            (true, Some(id)) => Some(id.to_string()),
            (false, _) => None,
        };

        match self.verb {
            Verb::List | Verb::Create => {}
            Verb::Get | Verb::Update | Verb::Delete => segments.extend(id),
            Verb::Custom(Action::Send) => {
                segments.extend(id);
                segments.push("send".into());
            }
            Verb::Custom(Action::Stock) => {
                segments.extend(id);
                segments.push("stock".into());
            }
            Verb::Custom(Action::Locations) => segments.push("locations".into()),
            Verb::Custom(Action::LocationSlots) => {
                segments.push("locations".into());
                segments.extend(id);
                segments.push("slots".into());
            }
        }
        Some(segments)
    }
}
