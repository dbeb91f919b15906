//! Provider abstraction for entity and counter data sources.
//!
//! Tabs never touch `/proc` directly. They enumerate entities through an
//! [`EntityProvider`] and read raw counters through a [`CounterProvider`],
//! so tests can drive a tab from plain in-memory data.

use std::io;

use crate::collector::procfs::parser::ParseError;

/// Error types that can occur while reading entity or counter data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// I/O error while reading a source file.
    Io(String),
    /// Source content did not have the expected layout.
    Parse(String),
    /// The entity or source is not available (gone, no permission).
    Unavailable(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ProviderError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<io::Error> for ProviderError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::PermissionDenied => ProviderError::Unavailable(e.to_string()),
            _ => ProviderError::Io(e.to_string()),
        }
    }
}

impl From<ParseError> for ProviderError {
    fn from(e: ParseError) -> Self {
        ProviderError::Parse(e.message)
    }
}

/// Enumerates the entities currently present, each with its raw fields.
pub trait EntityProvider<K, R> {
    fn list(&mut self) -> Result<Vec<(K, R)>, ProviderError>;
}

/// Reads the raw counters of one entity.
///
/// The returned timestamp must use the same unit for every call on a given
/// provider. The procfs providers use milliseconds since boot.
pub trait CounterProvider<K, C> {
    fn sample(&mut self, id: &K) -> Result<(C, u64), ProviderError>;
}

/// A source that both lists entities and samples their counters, the pair
/// every process tab is driven by.
pub trait MetricSource<K, R, C>: EntityProvider<K, R> + CounterProvider<K, C> {}

impl<K, R, C, P> MetricSource<K, R, C> for P where P: EntityProvider<K, R> + CounterProvider<K, C> {}
