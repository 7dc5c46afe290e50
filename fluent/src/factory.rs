//! The object-definition factory the DSL hands its records to.

use crate::error::BoxError;
use crate::key::object_name_of;
use crate::record::ConfigurationRecord;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// An instance produced by a factory.
pub type SharedObject = Arc<dyn Any + Send + Sync>;

/// The container that owns construction, scoping and wiring of objects.
///
/// `fibre_fluent` only produces definitions; implementors decide what a
/// definition means.
pub trait ObjectDefinitionFactory: Send + Sync {
  /// Accepts one definition, published under `record.object_name()`.
  fn register_object_definition(&self, record: ConfigurationRecord) -> Result<(), BoxError>;

  /// Whether a definition is published under `name`.
  fn contains_object_definition(&self, name: &str) -> bool;

  /// Resolves a published name to an instance.
  fn get_object(&self, name: &str) -> Result<SharedObject, BoxError>;
}

impl<F: ObjectDefinitionFactory + ?Sized> ObjectDefinitionFactory for Arc<F> {
  fn register_object_definition(&self, record: ConfigurationRecord) -> Result<(), BoxError> {
    (**self).register_object_definition(record)
  }

  fn contains_object_definition(&self, name: &str) -> bool {
    (**self).contains_object_definition(name)
  }

  fn get_object(&self, name: &str) -> Result<SharedObject, BoxError> {
    (**self).get_object(name)
  }
}

/// Errors reported by [`DefinitionStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  /// Nothing is defined under the name.
  #[error("no object named '{0}'")]
  UnknownObject(String),
  /// A definition exists but no instance was supplied for it.
  #[error("object '{0}' is defined but has no instance")]
  NoInstance(String),
}

/// An in-memory factory that records definitions and serves pre-built
/// instances.
///
/// It never constructs anything: instances are supplied with
/// [`add_instance`](Self::add_instance) and friends. Supplying an instance
/// also publishes its name, so bindings may target it even without a
/// definition.
#[derive(Default)]
pub struct DefinitionStore {
  definitions: DashMap<String, ConfigurationRecord>,
  instances: DashMap<String, SharedObject>,
}

impl DefinitionStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_shared_instance(object_name_of::<T>(), Arc::new(instance));
  }

  pub fn add_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.add_shared_instance(name, Arc::new(instance));
  }

  pub fn add_shared_instance(&self, name: &str, instance: SharedObject) {
    self.instances.insert(name.to_owned(), instance);
  }

  /// Returns a copy of the definition published under `name`.
  pub fn definition(&self, name: &str) -> Option<ConfigurationRecord> {
    self.definitions.get(name).map(|entry| entry.value().clone())
  }

  pub fn definition_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.definitions.iter().map(|e| e.key().clone()).collect();
    names.sort();
    names
  }

  pub fn len(&self) -> usize {
    self.definitions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.definitions.is_empty()
  }
}

impl ObjectDefinitionFactory for DefinitionStore {
  fn register_object_definition(&self, record: ConfigurationRecord) -> Result<(), BoxError> {
    let name = record.object_name().to_owned();
    if self.definitions.insert(name.clone(), record).is_some() {
      tracing::debug!(object = %name, "replaced existing object definition");
    }
    Ok(())
  }

  fn contains_object_definition(&self, name: &str) -> bool {
    self.definitions.contains_key(name) || self.instances.contains_key(name)
  }

  fn get_object(&self, name: &str) -> Result<SharedObject, BoxError> {
    if let Some(instance) = self.instances.get(name) {
      return Ok(Arc::clone(instance.value()));
    }
    if self.definitions.contains_key(name) {
      return Err(Box::new(StoreError::NoInstance(name.to_owned())));
    }
    Err(Box::new(StoreError::UnknownObject(name.to_owned())))
  }
}
