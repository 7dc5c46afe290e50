//! Runtime side of interface-to-implementation bindings.

use crate::error::{BoxError, FluentError, Result};
use crate::factory::{ObjectDefinitionFactory, SharedObject};
use crate::key::{object_name_of, TypeKey};
use crate::mode::ResolutionTiming;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

// Turns a factory instance into an `Arc<dyn Any>` holding an `Arc<I>`.
pub(crate) type Caster = Arc<dyn Fn(SharedObject) -> Option<SharedObject> + Send + Sync>;

pub(crate) type ErasedSelector =
  Arc<dyn Fn(&dyn ObjectDefinitionFactory) -> Result<Option<ErasedTarget>, BoxError> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct ErasedTarget {
  pub(crate) name: String,
  pub(crate) cast: Caster,
}

/// One possible implementation of the interface `I`: a published object name
/// and the conversion from the concrete object to `Arc<I>`.
pub struct BindingTarget<I: ?Sized> {
  inner: ErasedTarget,
  _interface: PhantomData<fn() -> Arc<I>>,
}

impl<I: ?Sized + Any + Send + Sync> BindingTarget<I> {
  /// Targets the unnamed registration of `C`.
  pub fn to<C, F>(cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    Self::named::<C, F>(object_name_of::<C>(), cast)
  }

  /// Targets the object published as `name`, whose concrete type is `C`.
  pub fn named<C, F>(name: &str, cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    let cast: Caster = Arc::new(move |object: SharedObject| {
      object
        .downcast::<C>()
        .ok()
        .map(|concrete| Arc::new(cast(concrete)) as SharedObject)
    });
    Self {
      inner: ErasedTarget {
        name: name.to_owned(),
        cast,
      },
      _interface: PhantomData,
    }
  }

  pub fn name(&self) -> &str {
    &self.inner.name
  }

  pub(crate) fn into_erased(self) -> ErasedTarget {
    self.inner
  }
}

/// Progress of a binding's implementation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
  Unresolved,
  Resolving,
  Resolved,
  /// Resolution failed; the failure is reported to every request.
  Failed,
}

const UNRESOLVED: u8 = 0;
const RESOLVING: u8 = 1;
const RESOLVED: u8 = 2;
const FAILED: u8 = 3;

struct ResolvedBinding {
  target: String,
  instance: SharedObject,
}

enum Failure {
  // No implementation could be determined.
  Unresolved(String),
  Error(FluentError),
}

/// A built binding for one interface, owned by a loaded context.
///
/// The implementation is chosen at most once: concurrent first requests
/// wait for the single in-flight resolution and then share its outcome.
/// A failed resolution is cached as well and never retried.
pub struct ConditionalBinding {
  interface: TypeKey,
  timing: ResolutionTiming,
  selector: ErasedSelector,
  state: AtomicU8,
  // `Err` holds the reason reported to requests after the first failure.
  outcome: OnceCell<Result<ResolvedBinding, String>>,
}

impl ConditionalBinding {
  pub(crate) fn new(interface: TypeKey, timing: ResolutionTiming, selector: ErasedSelector) -> Self {
    Self {
      interface,
      timing,
      selector,
      state: AtomicU8::new(UNRESOLVED),
      outcome: OnceCell::new(),
    }
  }

  pub fn interface(&self) -> TypeKey {
    self.interface
  }

  pub fn timing(&self) -> ResolutionTiming {
    self.timing
  }

  pub fn state(&self) -> BindingState {
    match self.state.load(Ordering::Acquire) {
      RESOLVED => BindingState::Resolved,
      FAILED => BindingState::Failed,
      RESOLVING => BindingState::Resolving,
      _ => BindingState::Unresolved,
    }
  }

  /// The object name the binding settled on, once resolved.
  pub fn target(&self) -> Option<&str> {
    match self.outcome.get() {
      Some(Ok(resolved)) => Some(resolved.target.as_str()),
      _ => None,
    }
  }

  /// Resolves the binding, or returns the cached outcome.
  ///
  /// The request that runs the resolution receives selector and factory
  /// failures as they are. Every other failed request, including later
  /// ones, gets the error built by `unresolved` from the cached reason.
  pub(crate) fn resolve(
    &self,
    factory: &dyn ObjectDefinitionFactory,
    unresolved: impl FnOnce(String) -> FluentError,
  ) -> Result<&SharedObject> {
    let mut first_error = None;
    let outcome = self.outcome.get_or_init(|| {
      self.state.store(RESOLVING, Ordering::Release);
      match self.compute(factory) {
        Ok(resolved) => {
          self.state.store(RESOLVED, Ordering::Release);
          Ok(resolved)
        }
        Err(failure) => {
          self.state.store(FAILED, Ordering::Release);
          match failure {
            Failure::Unresolved(reason) => Err(reason),
            Failure::Error(err) => {
              let reason = err.to_string();
              first_error = Some(err);
              Err(reason)
            }
          }
        }
      }
    });

    match outcome {
      Ok(resolved) => Ok(&resolved.instance),
      Err(reason) => Err(first_error.unwrap_or_else(|| unresolved(reason.clone()))),
    }
  }

  fn compute(&self, factory: &dyn ObjectDefinitionFactory) -> Result<ResolvedBinding, Failure> {
    let interface = self.interface.type_name();

    let target = match (self.selector)(factory) {
      Ok(Some(target)) => target,
      Ok(None) => return Err(Failure::Unresolved("no candidate implementation matched".to_owned())),
      Err(source) => return Err(Failure::Error(FluentError::Selector(source))),
    };
    if !factory.contains_object_definition(&target.name) {
      return Err(Failure::Unresolved(format!(
        "bound target `{}` has no object definition",
        target.name
      )));
    }

    let object = factory.get_object(&target.name).map_err(|source| {
      Failure::Error(FluentError::Factory {
        name: target.name.clone(),
        source,
      })
    })?;
    let instance = (target.cast)(object).ok_or_else(|| {
      Failure::Error(FluentError::TypeMismatch {
        name: target.name.clone(),
        expected: interface,
      })
    })?;

    tracing::debug!(interface, target = %target.name, "resolved conditional binding");
    Ok(ResolvedBinding {
      target: target.name,
      instance,
    })
  }
}

impl fmt::Debug for ConditionalBinding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConditionalBinding")
      .field("interface", &self.interface)
      .field("timing", &self.timing)
      .field("state", &self.state())
      .field("target", &self.target())
      .finish()
  }
}
