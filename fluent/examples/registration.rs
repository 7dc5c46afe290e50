use fibre_fluent::{DefinitionStore, DependencyCheckMode, FluentContext, WiringMode};

// --- Services being described ---
struct Database;
struct UserRepository;
struct UserService;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter("fibre_fluent=debug")
    .init();

  let ctx = FluentContext::new();
  ctx.set_default_modes(WiringMode::ByType, DependencyCheckMode::Objects);

  // --- Registration ---
  ctx
    .register_named::<Database>("primary_db")
    .with_property_value("url", "postgres://localhost/app")
    .with_property_value("pool_size", 8)
    .destroy_method("close");

  ctx
    .register::<UserRepository>()
    .with_constructor_reference_named("primary_db");

  ctx
    .register::<UserService>()
    .autowire_constructor()
    .as_prototype()
    .with_constructor_reference::<UserRepository>()
    .depends_on_named("primary_db");

  // Registering the same key again adds to the existing builder.
  ctx.register::<UserService>().init_method("warm_up");

  // --- Hand-off ---
  let store = DefinitionStore::new();
  let app = ctx.load(store).expect("configuration should load");

  for name in app.factory().definition_names() {
    if let Some(record) = app.factory().definition(&name) {
      println!(
        "{} -> {} (wiring: {:?}, scope: {:?}, properties: {})",
        name,
        record.target_type().type_name(),
        record.wiring_mode(),
        record.scope(),
        record.property_bindings().len()
      );
    }
  }
}
