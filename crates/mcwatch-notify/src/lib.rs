//! mcwatch-notify: outbound chat delivery.
//! One attempt per message; callers decide what a failure means.

pub mod error;
pub mod stdout;
pub mod webhook;

use std::future::Future;

pub use error::DeliveryError;
pub use stdout::StdoutNotifier;
pub use webhook::WebhookNotifier;

/// Delivers a single text message to an external chat.
pub trait Notifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

impl<T: Notifier + Sync + ?Sized> Notifier for &T {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        (**self).send(text)
    }
}
