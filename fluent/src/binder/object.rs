use crate::key::object_name_of;
use crate::mode::{DependencyCheckMode, Scope, WiringMode};
use crate::parser::ObjectDefinitionParser;
use crate::record::{ConfigurationRecord, ValueSource};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Fluent handle over the builder of one registration of `T`.
///
/// Every directive writes straight through to the shared builder, so there
/// is nothing to commit: dropping the binder keeps the configuration.
///
/// ```
/// use fibre_fluent::FluentContext;
///
/// struct Mailer;
/// struct Smtp;
///
/// let ctx = FluentContext::new();
/// ctx
///   .register::<Mailer>()
///   .autowire_by_type()
///   .as_prototype()
///   .with_property_value("retries", 3)
///   .with_property_reference::<Smtp>("transport");
///
/// let record = ctx.register::<Mailer>().build();
/// assert_eq!(record.property_bindings().len(), 2);
/// ```
pub struct ObjectBinder<T: ?Sized> {
  parser: Arc<ObjectDefinitionParser>,
  _type: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + Any> ObjectBinder<T> {
  pub fn new(parser: Arc<ObjectDefinitionParser>) -> Self {
    Self {
      parser,
      _type: PhantomData,
    }
  }

  /// The shared builder behind this binder.
  pub fn parser(&self) -> &Arc<ObjectDefinitionParser> {
    &self.parser
  }

  pub fn build(&self) -> ConfigurationRecord {
    self.parser.build()
  }

  // --- Wiring ---
  pub fn autowire(self, mode: WiringMode) -> Self {
    self.parser.set_wiring_mode(mode);
    self
  }
  pub fn autowire_by_name(self) -> Self {
    self.autowire(WiringMode::ByName)
  }
  pub fn autowire_by_type(self) -> Self {
    self.autowire(WiringMode::ByType)
  }
  pub fn autowire_constructor(self) -> Self {
    self.autowire(WiringMode::Constructor)
  }
  pub fn autowire_autodetect(self) -> Self {
    self.autowire(WiringMode::AutoDetect)
  }

  pub fn check_dependencies(self, mode: DependencyCheckMode) -> Self {
    self.parser.set_dependency_check_mode(mode);
    self
  }

  // --- Scope ---
  pub fn as_singleton(self) -> Self {
    self.parser.set_scope(Scope::Singleton);
    self
  }
  pub fn as_prototype(self) -> Self {
    self.parser.set_scope(Scope::Prototype);
    self
  }
  pub fn lazy_init(self, lazy: bool) -> Self {
    self.parser.set_lazy_init(lazy);
    self
  }

  // --- Properties ---
  pub fn with_property_value(self, name: &str, value: impl Into<serde_json::Value>) -> Self {
    self.parser.add_property(name, ValueSource::Value(value.into()));
    self
  }
  /// Binds a property to the unnamed registration of `U`.
  pub fn with_property_reference<U: ?Sized + Any>(self, name: &str) -> Self {
    self.with_property_reference_named(name, object_name_of::<U>())
  }
  pub fn with_property_reference_named(self, name: &str, object_name: &str) -> Self {
    self
      .parser
      .add_property(name, ValueSource::Reference(object_name.to_owned()));
    self
  }

  // --- Constructor arguments ---
  pub fn with_constructor_value(self, value: impl Into<serde_json::Value>) -> Self {
    self.parser.add_constructor_argument(ValueSource::Value(value.into()));
    self
  }
  pub fn with_constructor_reference<U: ?Sized + Any>(self) -> Self {
    self.with_constructor_reference_named(object_name_of::<U>())
  }
  pub fn with_constructor_reference_named(self, object_name: &str) -> Self {
    self
      .parser
      .add_constructor_argument(ValueSource::Reference(object_name.to_owned()));
    self
  }

  // --- Lifecycle hints ---
  pub fn depends_on<U: ?Sized + Any>(self) -> Self {
    self.depends_on_named(object_name_of::<U>())
  }
  pub fn depends_on_named(self, object_name: &str) -> Self {
    self.parser.add_dependency(object_name);
    self
  }
  pub fn init_method(self, method: &str) -> Self {
    self.parser.set_init_method(method);
    self
  }
  pub fn destroy_method(self, method: &str) -> Self {
    self.parser.set_destroy_method(method);
    self
  }
}

impl<T: ?Sized> Clone for ObjectBinder<T> {
  fn clone(&self) -> Self {
    Self {
      parser: Arc::clone(&self.parser),
      _type: PhantomData,
    }
  }
}
