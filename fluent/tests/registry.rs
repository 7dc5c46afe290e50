use fibre_fluent::{
  ConfigurationParser, DependencyCheckMode, FluentContext, FluentDefaults, ObjectDefinitionParser,
  RegistrationKey, WiringMode,
};
use std::sync::Arc;
use std::thread;

// --- Test Fixtures ---

struct SimpleService;
struct OtherService;

trait Repository: Send + Sync {}

// --- Registry Tests ---

#[test]
fn test_register_twice_returns_the_same_builder() {
  // Arrange
  let ctx = FluentContext::new();

  // Act
  let first = ctx.register::<SimpleService>();
  let second = ctx.register::<SimpleService>();

  // Assert
  assert!(Arc::ptr_eq(first.parser(), second.parser()));
  assert_eq!(ctx.configuration().len(), 1);
}

#[test]
fn test_distinct_identifiers_produce_distinct_builders() {
  let ctx = FluentContext::new();

  let primary = ctx.register_named::<SimpleService>("primary");
  let replica = ctx.register_named::<SimpleService>("replica");
  let unnamed = ctx.register::<SimpleService>();

  assert!(!Arc::ptr_eq(primary.parser(), replica.parser()));
  assert!(!Arc::ptr_eq(primary.parser(), unnamed.parser()));
  assert_eq!(ctx.configuration().len(), 3);
  assert_eq!(primary.build().object_name(), "primary");
}

#[test]
fn test_lookup_does_not_create_entries() {
  let ctx = FluentContext::new();
  let key = RegistrationKey::new::<SimpleService>();

  assert!(ctx.configuration().get_configuration_parser(&key).is_none());
  assert!(ctx.configuration().is_empty());

  ctx.register::<SimpleService>();
  let found = ctx.configuration().get_configuration_parser(&key);
  assert!(matches!(found, Some(ConfigurationParser::Object(_))));
}

#[test]
fn test_lookup_finds_binding_builders_by_interface() {
  let ctx = FluentContext::new();
  ctx.bind_lazy::<dyn Repository>();

  let found = ctx
    .configuration()
    .get_configuration_parser(&RegistrationKey::new::<dyn Repository>());

  let binding = found.as_ref().and_then(ConfigurationParser::as_binding);
  assert!(binding.is_some());
  assert!(ctx
    .configuration()
    .get_configuration_parser(&RegistrationKey::new_with_name::<dyn Repository>("x"))
    .is_none());
}

#[test]
fn test_registering_an_equal_key_keeps_the_stored_builder() {
  let ctx = FluentContext::new();
  let stored = ctx.register::<SimpleService>().autowire_by_name();

  let duplicate = Arc::new(ObjectDefinitionParser::new::<SimpleService>(
    None,
    &FluentDefaults::default(),
  ));
  let returned = ctx
    .configuration()
    .register_object_configuration(ConfigurationParser::Object(duplicate.clone()));

  let returned = returned.as_object().unwrap();
  assert!(Arc::ptr_eq(returned, stored.parser()));
  assert!(!Arc::ptr_eq(returned, &duplicate));
  assert_eq!(returned.build().wiring_mode(), WiringMode::ByName);
}

#[test]
fn test_clear_removes_every_registration() {
  // Arrange
  let ctx = FluentContext::new();
  ctx.register::<SimpleService>();
  ctx.register_named::<OtherService>("other");
  ctx.bind::<dyn Repository>();

  // Act
  ctx.clear();

  // Assert
  let config = ctx.configuration();
  assert!(config.is_empty());
  assert!(config
    .get_configuration_parser(&RegistrationKey::new::<SimpleService>())
    .is_none());
  assert!(config
    .get_configuration_parser(&RegistrationKey::new_with_name::<OtherService>("other"))
    .is_none());
  assert!(config
    .get_configuration_parser(&RegistrationKey::new::<dyn Repository>())
    .is_none());
}

#[test]
fn test_builder_after_clear_is_a_fresh_one() {
  let ctx = FluentContext::new();
  let before = ctx.register::<SimpleService>().as_prototype();

  ctx.clear();
  let after = ctx.register::<SimpleService>();

  assert!(!Arc::ptr_eq(before.parser(), after.parser()));
  assert_eq!(after.build().scope(), fibre_fluent::Scope::Singleton);
}

#[test]
fn test_defaults_apply_only_to_new_builders() {
  let ctx = FluentContext::new();
  let existing = ctx.register::<SimpleService>();

  ctx.set_default_modes(WiringMode::AutoDetect, DependencyCheckMode::Objects);
  let created_later = ctx.register::<OtherService>();

  assert_eq!(existing.build().wiring_mode(), WiringMode::None);
  assert_eq!(existing.build().dependency_check_mode(), DependencyCheckMode::None);
  assert_eq!(created_later.build().wiring_mode(), WiringMode::AutoDetect);
  assert_eq!(
    created_later.build().dependency_check_mode(),
    DependencyCheckMode::Objects
  );
}

#[test]
fn test_individual_default_setters() {
  let ctx = FluentContext::new();
  ctx.configuration().set_default_wiring_mode(WiringMode::Constructor);
  ctx
    .configuration()
    .set_default_dependency_check_mode(DependencyCheckMode::Simple);

  let record = ctx.register::<SimpleService>().build();
  assert_eq!(record.wiring_mode(), WiringMode::Constructor);
  assert_eq!(record.dependency_check_mode(), DependencyCheckMode::Simple);
}

#[test]
fn test_clear_resets_defaults() {
  let ctx = FluentContext::with_defaults(FluentDefaults::new(WiringMode::ByType, DependencyCheckMode::All));
  assert_eq!(ctx.register::<SimpleService>().build().wiring_mode(), WiringMode::ByType);

  ctx.clear();

  assert_eq!(ctx.configuration().defaults(), FluentDefaults::default());
  assert_eq!(ctx.register::<SimpleService>().build().wiring_mode(), WiringMode::None);
}

#[test]
fn test_concurrent_registration_shares_one_builder() {
  let ctx = FluentContext::new();

  let parsers: Vec<_> = thread::scope(|s| {
    let handles: Vec<_> = (0..16)
      .map(|_| s.spawn(|| Arc::clone(ctx.register::<SimpleService>().parser())))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(ctx.configuration().len(), 1);
  assert!(parsers.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_parsers_are_listed_in_registration_order() {
  let ctx = FluentContext::new();
  ctx.register_named::<SimpleService>("c");
  ctx.register_named::<SimpleService>("a");
  ctx.register_named::<SimpleService>("b");
  ctx.register_named::<SimpleService>("a");

  let names: Vec<String> = ctx
    .configuration()
    .object_parsers()
    .iter()
    .map(|p| p.key().object_name().to_owned())
    .collect();
  assert_eq!(names, ["c", "a", "b"]);
}
