use crate::binding::BindingTarget;
use crate::error::BoxError;
use crate::factory::ObjectDefinitionFactory;
use crate::mode::ResolutionTiming;
use crate::parser::ConditionalBindingDefinitionParser;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Fluent handle over the binding of interface `I`.
///
/// ```
/// use fibre_fluent::FluentContext;
/// use std::sync::Arc;
///
/// trait Store: Send + Sync {}
/// struct Disk;
/// struct Memory;
/// impl Store for Disk {}
/// impl Store for Memory {}
///
/// let ctx = FluentContext::new();
/// ctx
///   .bind::<dyn Store>()
///   .to::<Disk, _>(|d| d as Arc<dyn Store>)
///   .when(|| std::env::var("USE_DISK").is_ok())
///   .otherwise::<Memory, _>(|m| m as Arc<dyn Store>);
/// ```
pub struct ConditionalBinder<I: ?Sized> {
  parser: Arc<ConditionalBindingDefinitionParser>,
  _interface: PhantomData<fn() -> Arc<I>>,
}

impl<I: ?Sized + Any + Send + Sync> ConditionalBinder<I> {
  pub fn new(parser: Arc<ConditionalBindingDefinitionParser>) -> Self {
    Self {
      parser,
      _interface: PhantomData,
    }
  }

  pub fn parser(&self) -> &Arc<ConditionalBindingDefinitionParser> {
    &self.parser
  }

  pub fn timing(&self) -> ResolutionTiming {
    self.parser.timing()
  }

  /// Adds the unnamed registration of `C` as a candidate.
  pub fn to<C, F>(self, cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    self.to_target(BindingTarget::to::<C, F>(cast))
  }

  /// Adds the object published as `name` as a candidate.
  pub fn to_named<C, F>(self, name: &str, cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    self.to_target(BindingTarget::named::<C, F>(name, cast))
  }

  pub fn to_target(self, target: BindingTarget<I>) -> Self {
    self.parser.add_candidate(target.into_erased());
    self
  }

  /// Guards the last added candidate; it is only chosen while `condition`
  /// holds at resolution time.
  pub fn when(self, condition: impl Fn() -> bool + Send + Sync + 'static) -> Self {
    if !self.parser.guard_last(Arc::new(condition)) {
      tracing::warn!(
        interface = self.parser.interface().type_name(),
        "`when` called before any candidate was added; condition ignored"
      );
    }
    self
  }

  /// The implementation used when no candidate matches.
  pub fn otherwise<C, F>(self, cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    self
      .parser
      .set_fallback(BindingTarget::to::<C, F>(cast).into_erased());
    self
  }

  pub fn otherwise_named<C, F>(self, name: &str, cast: F) -> Self
  where
    C: Any + Send + Sync,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    self
      .parser
      .set_fallback(BindingTarget::named::<C, F>(name, cast).into_erased());
    self
  }

  /// Replaces candidate evaluation with caller-supplied logic. Errors it
  /// returns reach the caller unchanged.
  pub fn select_with<S>(self, selector: S) -> Self
  where
    S: Fn(&dyn ObjectDefinitionFactory) -> Result<Option<BindingTarget<I>>, BoxError>
      + Send
      + Sync
      + 'static,
  {
    self.parser.set_selector(Arc::new(move |factory: &dyn ObjectDefinitionFactory| {
      selector(factory).map(|target| target.map(BindingTarget::into_erased))
    }));
    self
  }
}

impl<I: ?Sized> Clone for ConditionalBinder<I> {
  fn clone(&self) -> Self {
    Self {
      parser: Arc::clone(&self.parser),
      _interface: PhantomData,
    }
  }
}
