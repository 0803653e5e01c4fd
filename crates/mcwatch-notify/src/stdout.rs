//! Dry-run delivery: one message per line on stdout.

use std::io::Write;

use crate::Notifier;
use crate::error::DeliveryError;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}
