//! In-memory collaborator backends.
//!
//! Every backend keeps a log of the calls it served so tests can assert on
//! side effects, and can be switched into a failing mode with `fail_with`.

mod failure;
mod issuer;
mod notifier;
mod recorder;

pub use issuer::MemoryIssuer;
pub use notifier::{MemoryNotifier, PublishedMessage};
pub use recorder::MemoryRecorder;
