//! The immutable output of an object builder.

use crate::key::{RegistrationKey, TypeKey};
use crate::mode::{DependencyCheckMode, Scope, WiringMode};

/// Where a property or constructor argument takes its value from.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
  /// A literal value, converted by the factory.
  Value(serde_json::Value),
  /// Another object, by its published object name.
  Reference(String),
}

/// A named property and the source of its value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBinding {
  pub name: String,
  pub source: ValueSource,
}

/// A complete description of one object registration, as handed to the
/// object-definition factory.
///
/// Records are snapshots: later directives on the builder that produced a
/// record do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationRecord {
  pub(crate) key: RegistrationKey,
  pub(crate) target_type: TypeKey,
  pub(crate) wiring_mode: WiringMode,
  pub(crate) dependency_check_mode: DependencyCheckMode,
  pub(crate) scope: Scope,
  pub(crate) lazy_init: bool,
  pub(crate) property_bindings: Vec<PropertyBinding>,
  pub(crate) constructor_arguments: Vec<ValueSource>,
  pub(crate) depends_on: Vec<String>,
  pub(crate) init_method: Option<String>,
  pub(crate) destroy_method: Option<String>,
}

impl ConfigurationRecord {
  pub fn key(&self) -> &RegistrationKey {
    &self.key
  }

  /// The type that was registered (the identity the DSL was called with).
  pub fn identity_type(&self) -> TypeKey {
    self.key.type_key()
  }

  /// The concrete type the factory should construct.
  pub fn target_type(&self) -> TypeKey {
    self.target_type
  }

  pub fn identifier(&self) -> Option<&str> {
    self.key.identifier()
  }

  pub fn object_name(&self) -> &str {
    self.key.object_name()
  }

  pub fn wiring_mode(&self) -> WiringMode {
    self.wiring_mode
  }

  pub fn dependency_check_mode(&self) -> DependencyCheckMode {
    self.dependency_check_mode
  }

  pub fn scope(&self) -> Scope {
    self.scope
  }

  pub fn is_lazy_init(&self) -> bool {
    self.lazy_init
  }

  pub fn property_bindings(&self) -> &[PropertyBinding] {
    &self.property_bindings
  }

  /// Looks up a property binding by name.
  pub fn property(&self, name: &str) -> Option<&ValueSource> {
    self
      .property_bindings
      .iter()
      .find(|binding| binding.name == name)
      .map(|binding| &binding.source)
  }

  pub fn constructor_arguments(&self) -> &[ValueSource] {
    &self.constructor_arguments
  }

  pub fn depends_on(&self) -> &[String] {
    &self.depends_on
  }

  pub fn init_method(&self) -> Option<&str> {
    self.init_method.as_deref()
  }

  pub fn destroy_method(&self) -> Option<&str> {
    self.destroy_method.as_deref()
  }
}
