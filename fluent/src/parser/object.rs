//! Staging builder for a single object definition.

use crate::config::FluentDefaults;
use crate::key::{RegistrationKey, TypeKey};
use crate::mode::{DependencyCheckMode, Scope, WiringMode};
use crate::record::{ConfigurationRecord, PropertyBinding, ValueSource};
use parking_lot::Mutex;
use std::any::Any;

#[derive(Clone)]
struct Staging {
  wiring_mode: WiringMode,
  dependency_check_mode: DependencyCheckMode,
  scope: Scope,
  lazy_init: bool,
  properties: Vec<PropertyBinding>,
  constructor_arguments: Vec<ValueSource>,
  depends_on: Vec<String>,
  init_method: Option<String>,
  destroy_method: Option<String>,
}

/// Accumulates directives for one registration and turns them into a
/// [`ConfigurationRecord`] on demand.
///
/// Builders are shared behind an `Arc`: every binder handed out for the
/// same key mutates the same staging state. Directives may arrive in any
/// order and the last write to a field wins.
pub struct ObjectDefinitionParser {
  key: RegistrationKey,
  target_type: TypeKey,
  staging: Mutex<Staging>,
}

impl ObjectDefinitionParser {
  /// A builder for `T`, optionally named, that constructs `T` itself.
  pub fn new<T: ?Sized + Any>(identifier: Option<&str>, defaults: &FluentDefaults) -> Self {
    Self::with_target(
      RegistrationKey::from_parts(TypeKey::of::<T>(), identifier),
      TypeKey::of::<T>(),
      defaults,
    )
  }

  /// A builder registered under `key` whose concrete type is `target_type`.
  pub fn with_target(key: RegistrationKey, target_type: TypeKey, defaults: &FluentDefaults) -> Self {
    Self {
      key,
      target_type,
      staging: Mutex::new(Staging {
        wiring_mode: defaults.wiring_mode,
        dependency_check_mode: defaults.dependency_check_mode,
        scope: Scope::default(),
        lazy_init: false,
        properties: Vec::new(),
        constructor_arguments: Vec::new(),
        depends_on: Vec::new(),
        init_method: None,
        destroy_method: None,
      }),
    }
  }

  pub fn key(&self) -> &RegistrationKey {
    &self.key
  }

  pub fn target_type(&self) -> TypeKey {
    self.target_type
  }

  pub fn set_wiring_mode(&self, mode: WiringMode) {
    self.staging.lock().wiring_mode = mode;
  }

  pub fn set_dependency_check_mode(&self, mode: DependencyCheckMode) {
    self.staging.lock().dependency_check_mode = mode;
  }

  pub fn set_scope(&self, scope: Scope) {
    self.staging.lock().scope = scope;
  }

  pub fn set_lazy_init(&self, lazy_init: bool) {
    self.staging.lock().lazy_init = lazy_init;
  }

  /// Binds a property. Rebinding a property keeps its original position.
  pub fn add_property(&self, name: &str, source: ValueSource) {
    let mut staging = self.staging.lock();
    match staging.properties.iter_mut().find(|p| p.name == name) {
      Some(existing) => existing.source = source,
      None => staging.properties.push(PropertyBinding {
        name: name.to_owned(),
        source,
      }),
    }
  }

  pub fn add_constructor_argument(&self, source: ValueSource) {
    self.staging.lock().constructor_arguments.push(source);
  }

  pub fn add_dependency(&self, object_name: &str) {
    let mut staging = self.staging.lock();
    if !staging.depends_on.iter().any(|d| d == object_name) {
      staging.depends_on.push(object_name.to_owned());
    }
  }

  pub fn set_init_method(&self, method: &str) {
    self.staging.lock().init_method = Some(method.to_owned());
  }

  pub fn set_destroy_method(&self, method: &str) {
    self.staging.lock().destroy_method = Some(method.to_owned());
  }

  /// Replaces this builder's staged directives with those of `other`.
  pub fn adopt(&self, other: &ObjectDefinitionParser) {
    let staged = other.staging.lock().clone();
    *self.staging.lock() = staged;
  }

  /// Snapshots the current staging state.
  pub fn build(&self) -> ConfigurationRecord {
    let staging = self.staging.lock();
    ConfigurationRecord {
      key: self.key.clone(),
      target_type: self.target_type,
      wiring_mode: staging.wiring_mode,
      dependency_check_mode: staging.dependency_check_mode,
      scope: staging.scope,
      lazy_init: staging.lazy_init,
      property_bindings: staging.properties.clone(),
      constructor_arguments: staging.constructor_arguments.clone(),
      depends_on: staging.depends_on.clone(),
      init_method: staging.init_method.clone(),
      destroy_method: staging.destroy_method.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  struct Widget;

  #[test]
  fn builder_starts_from_defaults() {
    let defaults = FluentDefaults::new(WiringMode::ByType, DependencyCheckMode::All);
    let record = ObjectDefinitionParser::new::<Widget>(None, &defaults).build();
    assert_eq!(record.wiring_mode(), WiringMode::ByType);
    assert_eq!(record.dependency_check_mode(), DependencyCheckMode::All);
    assert_eq!(record.scope(), Scope::Singleton);
    assert!(record.property_bindings().is_empty());
  }

  #[test]
  fn rebinding_a_property_keeps_its_position() {
    let parser = ObjectDefinitionParser::new::<Widget>(None, &FluentDefaults::default());
    parser.add_property("a", ValueSource::Value(json!(1)));
    parser.add_property("b", ValueSource::Value(json!(2)));
    parser.add_property("a", ValueSource::Reference("other".into()));

    let record = parser.build();
    let names: Vec<_> = record.property_bindings().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(record.property("a"), Some(&ValueSource::Reference("other".into())));
  }

  #[test]
  fn adopt_takes_over_every_directive() {
    let stored = ObjectDefinitionParser::new::<Widget>(None, &FluentDefaults::default());
    stored.set_init_method("start");
    let supplied = ObjectDefinitionParser::new::<Widget>(None, &FluentDefaults::default());
    supplied.set_scope(Scope::Prototype);
    supplied.add_dependency("clock");

    stored.adopt(&supplied);

    let record = stored.build();
    assert_eq!(record.scope(), Scope::Prototype);
    assert_eq!(record.depends_on(), &["clock".to_owned()]);
    assert_eq!(record.init_method(), None);
  }

  #[test]
  fn records_are_snapshots() {
    let parser = ObjectDefinitionParser::new::<Widget>(Some("w"), &FluentDefaults::default());
    let before = parser.build();
    parser.set_scope(Scope::Prototype);
    let after = parser.build();
    assert_eq!(before.scope(), Scope::Singleton);
    assert_eq!(after.scope(), Scope::Prototype);
  }
}
