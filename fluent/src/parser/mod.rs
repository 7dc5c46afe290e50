//! Builders that stage configuration until a record is requested.

mod conditional;
mod object;

pub use conditional::ConditionalBindingDefinitionParser;
pub use object::ObjectDefinitionParser;

use crate::key::RegistrationKey;
use std::sync::Arc;

/// Any builder the registry can hold.
#[derive(Clone)]
pub enum ConfigurationParser {
  Object(Arc<ObjectDefinitionParser>),
  Binding(Arc<ConditionalBindingDefinitionParser>),
}

impl ConfigurationParser {
  /// The registry identity of the builder. Bindings are keyed by their
  /// interface type with no identifier.
  pub fn key(&self) -> RegistrationKey {
    match self {
      ConfigurationParser::Object(parser) => parser.key().clone(),
      ConfigurationParser::Binding(parser) => RegistrationKey::from_parts(parser.interface(), None),
    }
  }

  pub fn as_object(&self) -> Option<&Arc<ObjectDefinitionParser>> {
    match self {
      ConfigurationParser::Object(parser) => Some(parser),
      ConfigurationParser::Binding(_) => None,
    }
  }

  pub fn as_binding(&self) -> Option<&Arc<ConditionalBindingDefinitionParser>> {
    match self {
      ConfigurationParser::Binding(parser) => Some(parser),
      ConfigurationParser::Object(_) => None,
    }
  }
}

impl From<Arc<ObjectDefinitionParser>> for ConfigurationParser {
  fn from(parser: Arc<ObjectDefinitionParser>) -> Self {
    ConfigurationParser::Object(parser)
  }
}

impl From<Arc<ConditionalBindingDefinitionParser>> for ConfigurationParser {
  fn from(parser: Arc<ConditionalBindingDefinitionParser>) -> Self {
    ConfigurationParser::Binding(parser)
  }
}
