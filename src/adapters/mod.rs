// Adapters layer: concrete catalog sources (bundled, file, http, in-memory).

pub mod catalog;

pub use catalog::{AnyCatalog, BundledCatalog, FileCatalog, HttpCatalog, InMemoryCatalog};
