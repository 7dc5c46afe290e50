//! A loaded context: the factory plus the bindings built for it.

use crate::binding::{BindingState, ConditionalBinding};
use crate::error::{FluentError, Result};
use crate::factory::{ObjectDefinitionFactory, SharedObject};
use crate::key::{object_name_of, TypeKey};
use crate::mode::ResolutionTiming;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

/// The result of [`FluentContext::load`](crate::FluentContext::load).
///
/// Objects are served by the factory; bound interfaces are resolved through
/// their bindings. Bindings belong to this context alone, so clearing or
/// reconfiguring the `FluentContext` afterwards does not affect it.
pub struct ApplicationContext<F> {
  factory: F,
  bindings: HashMap<TypeKey, ConditionalBinding>,
}

impl<F: ObjectDefinitionFactory> ApplicationContext<F> {
  pub(crate) fn new(factory: F, bindings: Vec<ConditionalBinding>) -> Result<Self> {
    let bindings: HashMap<_, _> = bindings.into_iter().map(|b| (b.interface(), b)).collect();

    for binding in bindings.values() {
      if binding.timing() == ResolutionTiming::Eager {
        let interface = binding.interface().type_name();
        binding.resolve(&factory, |reason| FluentError::Unresolved { interface, reason })?;
      }
    }

    Ok(Self { factory, bindings })
  }

  pub fn factory(&self) -> &F {
    &self.factory
  }

  pub fn binding_count(&self) -> usize {
    self.bindings.len()
  }

  /// Resolves a published object name through the factory.
  pub fn get_object(&self, name: &str) -> Result<SharedObject> {
    self
      .factory
      .get_object(name)
      .map_err(|source| FluentError::Factory {
        name: name.to_owned(),
        source,
      })
  }

  /// Resolves the unnamed registration of `T`.
  pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.get_named::<T>(object_name_of::<T>())
  }

  pub fn get_named<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self
      .get_object(name)?
      .downcast::<T>()
      .map_err(|_| FluentError::TypeMismatch {
        name: name.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Resolves the implementation bound to `I`.
  ///
  /// Lazy bindings are resolved here on first use; a failure names the
  /// caller's location and is reported again on every later request.
  #[track_caller]
  pub fn get_bound<I: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<I>> {
    let location = Location::caller();
    let interface = type_name::<I>();
    let binding = self
      .bindings
      .get(&TypeKey::of::<I>())
      .ok_or(FluentError::NoBinding { interface })?;

    let instance = binding.resolve(&self.factory, |reason| FluentError::UnresolvedAtRequest {
      interface,
      reason,
      location: location.to_string(),
    })?;

    instance
      .downcast_ref::<Arc<I>>()
      .cloned()
      .ok_or_else(|| FluentError::TypeMismatch {
        name: binding.target().unwrap_or_default().to_owned(),
        expected: interface,
      })
  }

  pub fn binding_state<I: ?Sized + Any>(&self) -> Option<BindingState> {
    self.bindings.get(&TypeKey::of::<I>()).map(ConditionalBinding::state)
  }

  /// The object name `I` is bound to, once resolved.
  pub fn bound_target<I: ?Sized + Any>(&self) -> Option<&str> {
    self.bindings.get(&TypeKey::of::<I>()).and_then(ConditionalBinding::target)
  }
}
