//! Movie records shared by the catalog, the favorites store and the client.
//!
//! Field names on the wire follow the catalog API convention (`imdbID`,
//! `Title`, ...). Shape checks live in [`schema`] and run wherever data
//! crosses a trust boundary: storage reads, request bodies and HTTP responses.

pub mod schema;
mod types;

pub use schema::{ParsedCollection, SchemaError};
pub use types::*;
