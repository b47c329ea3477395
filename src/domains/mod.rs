//! Domains module containing business logic organized by bounded contexts.
//!
//! `holded` talks to the external API, `tools` owns the operation catalog
//! and dispatch, and `rest` is the HTTP-only façade over `tools`.

pub mod holded;
#[cfg(feature = "http")]
pub mod rest;
pub mod tools;
