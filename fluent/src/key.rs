//! Identity keys used by the registry and by the records it produces.

use std::any::{type_name, Any, TypeId};
use std::fmt;

/// The runtime identity of a Rust type, including unsized interface types
/// such as `dyn Trait`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Type({})", self.type_name)
  }
}

/// Identifies one registration: a type plus an optional identifier.
///
/// Within one registry lifetime there is at most one builder per key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
  ty: TypeKey,
  identifier: Option<String>,
}

impl RegistrationKey {
  pub fn new<T: ?Sized + Any>() -> Self {
    Self {
      ty: TypeKey::of::<T>(),
      identifier: None,
    }
  }

  pub fn new_with_name<T: ?Sized + Any>(identifier: &str) -> Self {
    Self {
      ty: TypeKey::of::<T>(),
      identifier: Some(identifier.to_owned()),
    }
  }

  pub(crate) fn from_parts(ty: TypeKey, identifier: Option<&str>) -> Self {
    Self {
      ty,
      identifier: identifier.map(str::to_owned),
    }
  }

  pub fn type_key(&self) -> TypeKey {
    self.ty
  }

  pub fn identifier(&self) -> Option<&str> {
    self.identifier.as_deref()
  }

  /// The name the registration is published under in the object factory:
  /// the identifier when present, otherwise the type name.
  pub fn object_name(&self) -> &str {
    self.identifier.as_deref().unwrap_or(self.ty.type_name)
  }
}

impl fmt::Debug for RegistrationKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.identifier {
      Some(name) => write!(f, "Key({}, Name({}))", self.ty.type_name, name),
      None => write!(f, "Key({})", self.ty.type_name),
    }
  }
}

/// Object name used for an unnamed registration of `T`.
pub fn object_name_of<T: ?Sized + Any>() -> &'static str {
  type_name::<T>()
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Marker {}

  #[test]
  fn unnamed_key_is_published_under_type_name() {
    let key = RegistrationKey::new::<String>();
    assert_eq!(key.object_name(), "alloc::string::String");
    assert_eq!(key.identifier(), None);
  }

  #[test]
  fn identifier_distinguishes_keys_of_the_same_type() {
    let a = RegistrationKey::new_with_name::<String>("a");
    let b = RegistrationKey::new_with_name::<String>("b");
    assert_ne!(a, b);
    assert_eq!(a, RegistrationKey::new_with_name::<String>("a"));
    assert_eq!(b.object_name(), "b");
  }

  #[test]
  fn interface_types_have_keys() {
    let key = TypeKey::of::<dyn Marker>();
    assert!(key.type_name().contains("Marker"));
    assert_ne!(key, TypeKey::of::<String>());
  }
}
