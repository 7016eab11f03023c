//! Storage abstractions for service layer
//!
//! File-backed stores that keep a whole collection in memory and rewrite
//! the backing JSON document on every mutation.

pub mod json_document_store;

pub use json_document_store::JsonDocumentStore;
