//! Search backend clients
//!
//! - Catalog: structured boolean/filter queries over `_search`
//! - Vector store: nearest-neighbor queries over stored embeddings

mod catalog;
mod vectors;

pub use catalog::HttpCatalogBackend;
pub use vectors::{HttpVectorStore, VectorBackend, VectorHit};
