use thiserror::Error;

/// Boxed error produced by an object-definition factory or a binding selector.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the `fibre_fluent` library.
#[derive(Debug, Error)]
pub enum FluentError {
  #[error("No implementation could be determined for `{interface}` while loading the context: {reason}")]
  Unresolved {
    interface: &'static str,
    reason: String,
  },

  #[error("No implementation could be determined for `{interface}` requested at {location}: {reason}")]
  UnresolvedAtRequest {
    interface: &'static str,
    reason: String,
    location: String,
  },

  #[error("No binding registered for `{interface}`")]
  NoBinding { interface: &'static str },

  #[error("Object `{name}` is not of the requested type `{expected}`")]
  TypeMismatch { name: String, expected: &'static str },

  #[error("Object name `{name}` is declared more than once")]
  DuplicateIdentity { name: String },

  #[error("Object definition factory failed for `{name}`: {source}")]
  Factory {
    name: String,
    #[source]
    source: BoxError,
  },

  #[error(transparent)]
  Selector(BoxError),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

/// A specialized `Result` type for `fibre_fluent` operations.
pub type Result<T, E = FluentError> = std::result::Result<T, E>;
