//! Folio domain logic.
//!
//! Pure, dependency-light building blocks shared by the API server and the
//! mail crate: project records and the catalog they are loaded into, the
//! project filter engine with its facet derivation, and the contact form
//! validator.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod facets;
pub mod filter;
pub mod project;
