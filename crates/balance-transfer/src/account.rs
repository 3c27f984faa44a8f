//! Source account contract used by the transfer executor.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use crate::{AccountError, Withdrawal};

/// Account that funds a transfer by withdrawing to an external address.
pub trait SourceAccount: Send + Sync {
    /// Human-readable account name used in logs.
    fn label(&self) -> &str;

    /// Send `withdrawal.amount` to `withdrawal.recipient_crypto_address`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when the account refuses or fails the withdrawal.
    fn withdraw<'a>(
        &'a self,
        withdrawal: Withdrawal,
    ) -> Pin<Box<dyn Future<Output = Result<(), AccountError>> + Send + 'a>>;
}

/// Account whose withdrawals are carried out by hand.
///
/// Each withdrawal is recorded as an instruction for the operator and always succeeds.
#[derive(Debug, Default)]
pub struct ManualAccount {
    label: String,
    instructions: Mutex<Vec<Withdrawal>>,
}

impl ManualAccount {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instructions: Mutex::new(Vec::new()),
        }
    }

    /// Withdrawals recorded so far, oldest first.
    pub fn instructions(&self) -> Vec<Withdrawal> {
        self.instructions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SourceAccount for ManualAccount {
    fn label(&self) -> &str {
        &self.label
    }

    fn withdraw<'a>(
        &'a self,
        withdrawal: Withdrawal,
    ) -> Pin<Box<dyn Future<Output = Result<(), AccountError>> + Send + 'a>> {
        self.instructions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(withdrawal);
        Box::pin(async { Ok(()) })
    }
}
