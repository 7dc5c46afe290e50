use fibre_fluent::{DefinitionStore, FluentContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

static SMS_ENABLED: AtomicBool = AtomicBool::new(false);

fn main() {
  let ctx = FluentContext::new();
  ctx.register::<EmailSender>();
  ctx.register_named::<SmsSender>("sms");

  // --- Binding ---
  // Decided on first request, so the flag can still change after loading.
  ctx
    .bind_lazy::<dyn MessageSender>()
    .to_named::<SmsSender, _>("sms", |s| s as Arc<dyn MessageSender>)
    .when(|| SMS_ENABLED.load(Ordering::SeqCst))
    .otherwise::<EmailSender, _>(|e| e as Arc<dyn MessageSender>);

  let store = DefinitionStore::new();
  store.add_instance(EmailSender);
  store.add_instance_with_name("sms", SmsSender);

  let app = ctx.load(store).expect("configuration should load");

  SMS_ENABLED.store(true, Ordering::SeqCst);
  let sender = app
    .get_bound::<dyn MessageSender>()
    .expect("a sender should be bound");

  let result = sender.send("+123456789", "Hello from Fibre!");
  println!("{}", result);
  assert!(result.contains("SMS"));
}
