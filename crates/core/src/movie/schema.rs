//! Declarative shape checks for movie records.
//!
//! The serde derives on [`MovieSummary`] are the schema: a record is valid when
//! it deserializes and carries a non-empty identifier. Everything here returns
//! a typed result; callers decide whether a failure is logged and skipped or
//! propagated.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::MovieSummary;

/// A value failed the shape contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid movie record: {0}")]
    InvalidRecord(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Expected an array of movie records, found {0}")]
    NotAnArray(&'static str),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Result of reading a stored collection leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCollection {
    /// Valid, de-duplicated records in stored order.
    pub movies: Vec<MovieSummary>,
    /// Number of elements discarded (bad shape or duplicate identifier).
    pub dropped: usize,
}

/// Check that an identifier is usable as a favorites key.
pub fn validate_identifier(id: &str) -> Result<&str, SchemaError> {
    if id.trim().is_empty() {
        return Err(SchemaError::InvalidIdentifier(id.to_string()));
    }
    Ok(id)
}

/// Check a typed record. Serde already guarantees every field is a string.
pub fn validate_summary(movie: &MovieSummary) -> Result<(), SchemaError> {
    validate_identifier(&movie.imdb_id)
        .map(|_| ())
        .map_err(|_| SchemaError::InvalidRecord("imdbID must not be empty".to_string()))
}

/// Parse one untyped value into a [`MovieSummary`].
pub fn parse_summary(value: &Value) -> Result<MovieSummary, SchemaError> {
    let movie = MovieSummary::deserialize(value)
        .map_err(|e| SchemaError::InvalidRecord(e.to_string()))?;
    validate_summary(&movie)?;
    Ok(movie)
}

/// Parse a stored collection, keeping every element that passes the shape
/// check and dropping the rest.
///
/// A non-array value is an error: it means the whole blob is unusable.
pub fn parse_collection(value: &Value) -> Result<ParsedCollection, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::NotAnArray(json_kind(value)))?;

    let mut parsed = ParsedCollection::default();
    for item in items {
        match parse_summary(item) {
            Ok(movie) if parsed.movies.iter().any(|m| m.same_movie(&movie)) => {
                parsed.dropped += 1;
            }
            Ok(movie) => parsed.movies.push(movie),
            Err(_) => parsed.dropped += 1,
        }
    }
    Ok(parsed)
}

/// Decode a network payload into `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SchemaError> {
    serde_json::from_slice(bytes).map_err(|e| SchemaError::Malformed(e.to_string()))
}

/// Decode a favorites payload strictly: every element must be valid.
pub fn decode_collection(bytes: &[u8]) -> Result<Vec<MovieSummary>, SchemaError> {
    let movies: Vec<MovieSummary> = decode(bytes)?;
    for movie in &movies {
        validate_summary(movie)?;
    }
    Ok(movies)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
