//! Transports for talking to the outside world.
//!
//! Both directions are trait seams so that watch tasks can be driven by
//! in-memory fakes in tests:
//!
//! - [`StatusPoller`]: one GET against the remote job-info endpoint
//! - [`CompletionNotifier`]: one POST of a completion payload to the webhook
//!
//! The HTTP implementations share a single `reqwest::Client` carrying the
//! configured request timeout.

mod notifier;
mod poller;

pub use notifier::{CompletionNotifier, DeliveryError, HttpNotifier};
pub use poller::{HttpPoller, PollError, StatusPoller};
