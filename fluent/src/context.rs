//! The `FluentContext` entry points.

use crate::application::ApplicationContext;
use crate::binder::{ConditionalBinder, ObjectBinder};
use crate::config::FluentDefaults;
use crate::error::{FluentError, Result};
use crate::factory::ObjectDefinitionFactory;
use crate::key::{RegistrationKey, TypeKey};
use crate::mode::{DependencyCheckMode, ResolutionTiming, WiringMode};
use crate::parser::{ConditionalBindingDefinitionParser, ObjectDefinitionParser};
use crate::registry::StaticConfiguration;
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

/// Owns a configuration registry and exposes the fluent DSL over it.
///
/// Every entry point registers its builder as a side effect. Calling an
/// entry point again with the same key hands back the same builder, so
/// configuration can be spread over several call sites.
#[derive(Default)]
pub struct FluentContext {
  configuration: StaticConfiguration,
}

impl FluentContext {
  /// Creates a new, empty `FluentContext`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_defaults(defaults: FluentDefaults) -> Self {
    Self {
      configuration: StaticConfiguration::with_defaults(defaults),
    }
  }

  pub fn configuration(&self) -> &StaticConfiguration {
    &self.configuration
  }

  /// Drops every registration and binding and resets the defaults.
  pub fn clear(&self) {
    self.configuration.clear();
  }

  pub fn set_defaults(&self, defaults: FluentDefaults) {
    self.configuration.set_defaults(defaults);
  }

  /// Sets both defaults at once. Only builders created afterwards see them.
  pub fn set_default_modes(&self, wiring_mode: WiringMode, dependency_check_mode: DependencyCheckMode) {
    self
      .configuration
      .set_defaults(FluentDefaults::new(wiring_mode, dependency_check_mode));
  }

  // --- Object registration ---

  pub fn register<T: ?Sized + Any>(&self) -> ObjectBinder<T> {
    self.object_binder::<T, T>(None)
  }

  pub fn register_named<T: ?Sized + Any>(&self, identifier: &str) -> ObjectBinder<T> {
    self.object_binder::<T, T>(Some(identifier))
  }

  /// Registers under the identity `K` an object whose concrete type is `C`.
  pub fn for_type<K: ?Sized + Any, C: ?Sized + Any>(&self) -> ObjectBinder<K> {
    self.object_binder::<K, C>(None)
  }

  pub fn for_type_named<K: ?Sized + Any, C: ?Sized + Any>(&self, identifier: &str) -> ObjectBinder<K> {
    self.object_binder::<K, C>(Some(identifier))
  }

  /// Runs `supplier` and registers the builder it configured, once.
  ///
  /// If a builder already exists for the same key, it stays the stored
  /// builder but takes over the supplier's directives.
  pub fn register_with<T, F>(&self, supplier: F) -> ObjectBinder<T>
  where
    T: ?Sized + Any,
    F: FnOnce() -> ObjectBinder<T>,
  {
    let supplied = Arc::clone(supplier().parser());
    let stored = self
      .configuration
      .object_parser_or_insert_with(supplied.key().clone(), |_| Arc::clone(&supplied));
    if !Arc::ptr_eq(&stored, &supplied) {
      tracing::warn!(key = ?stored.key(), "supplied builder replaces the directives of an existing registration");
      stored.adopt(&supplied);
    }
    ObjectBinder::new(stored)
  }

  fn object_binder<K: ?Sized + Any, C: ?Sized + Any>(&self, identifier: Option<&str>) -> ObjectBinder<K> {
    let key = RegistrationKey::from_parts(TypeKey::of::<K>(), identifier);
    let parser_key = key.clone();
    let parser = self.configuration.object_parser_or_insert_with(key, |defaults| {
      Arc::new(ObjectDefinitionParser::with_target(parser_key, TypeKey::of::<C>(), defaults))
    });
    ObjectBinder::new(parser)
  }

  // --- Interface binding ---

  /// Binds `I`, resolving its implementation while the context loads.
  pub fn bind<I: ?Sized + Any + Send + Sync>(&self) -> ConditionalBinder<I> {
    self.bind_with_timing::<I>(ResolutionTiming::Eager)
  }

  /// Binds `I`, resolving its implementation on first request.
  pub fn bind_lazy<I: ?Sized + Any + Send + Sync>(&self) -> ConditionalBinder<I> {
    self.bind_with_timing::<I>(ResolutionTiming::Lazy)
  }

  /// Binding again for the same interface returns the existing binding,
  /// with its timing set to `timing`.
  pub fn bind_with_timing<I: ?Sized + Any + Send + Sync>(&self, timing: ResolutionTiming) -> ConditionalBinder<I> {
    let parser = self
      .configuration
      .binding_parser_or_insert_with(TypeKey::of::<I>(), |_| {
        Arc::new(ConditionalBindingDefinitionParser::new::<I>(timing))
      });
    parser.set_timing(timing);
    ConditionalBinder::new(parser)
  }

  // --- Loading ---

  /// Builds every record, hands them to `factory` in registration order and
  /// resolves eager bindings.
  ///
  /// # Errors
  ///
  /// Fails if two registrations publish the same object name, if the factory
  /// rejects a record, or if an eager binding cannot be resolved.
  ///
  /// Eager bindings are resolved after every record has been handed over, so
  /// a factory shared with the caller keeps the records it accepted even
  /// when the load fails.
  pub fn load<F: ObjectDefinitionFactory>(&self, factory: F) -> Result<ApplicationContext<F>> {
    let (records, bindings) = {
      let _hold = self.configuration.hold();
      let records: Vec<_> = self
        .configuration
        .object_parsers()
        .iter()
        .map(|parser| parser.build())
        .collect();
      let bindings: Vec<_> = self
        .configuration
        .binding_parsers()
        .iter()
        .map(|parser| parser.build())
        .collect();
      (records, bindings)
    };

    let mut names = HashSet::new();
    for record in &records {
      if !names.insert(record.object_name().to_owned()) {
        return Err(FluentError::DuplicateIdentity {
          name: record.object_name().to_owned(),
        });
      }
    }
    if let Some(binding) = bindings
      .iter()
      .find(|binding| names.contains(binding.interface().type_name()))
    {
      return Err(FluentError::DuplicateIdentity {
        name: binding.interface().type_name().to_owned(),
      });
    }

    let definition_count = records.len();
    for record in records {
      let name = record.object_name().to_owned();
      tracing::debug!(object = %name, target = record.target_type().type_name(), "handing object definition to factory");
      factory
        .register_object_definition(record)
        .map_err(|source| FluentError::Factory { name, source })?;
    }

    let context = ApplicationContext::new(factory, bindings)?;
    tracing::info!(
      definitions = definition_count,
      bindings = context.binding_count(),
      "fluent context loaded"
    );
    Ok(context)
  }
}
