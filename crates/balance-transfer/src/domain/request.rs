use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::account::SourceAccount;
use crate::{Currency, ValidationError};

/// Caller-owned description of one transfer; never mutated once built.
#[derive(Clone)]
pub struct TransferRequest {
    id: Uuid,
    source_account: Arc<dyn SourceAccount>,
    source_currency: Currency,
    recipient_currency: Currency,
    amount: Decimal,
    recipient_address: String,
}

impl TransferRequest {
    pub fn new(
        source_account: Arc<dyn SourceAccount>,
        source_currency: Currency,
        recipient_currency: Currency,
        amount: Decimal,
        recipient_address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount { value: amount });
        }

        let recipient_address = recipient_address.into().trim().to_owned();
        if recipient_address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }

        if source_currency == recipient_currency {
            return Err(ValidationError::SameCurrency {
                currency: source_currency,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            source_account,
            source_currency,
            recipient_currency,
            amount,
            recipient_address,
        })
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_account(&self) -> &Arc<dyn SourceAccount> {
        &self.source_account
    }

    pub fn source_currency(&self) -> &Currency {
        &self.source_currency
    }

    pub fn recipient_currency(&self) -> &Currency {
        &self.recipient_currency
    }

    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn recipient_address(&self) -> &str {
        &self.recipient_address
    }
}

impl Debug for TransferRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRequest")
            .field("id", &self.id)
            .field("source_account", &self.source_account.label())
            .field("source_currency", &self.source_currency)
            .field("recipient_currency", &self.recipient_currency)
            .field("amount", &self.amount)
            .field("recipient_address", &self.recipient_address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::ManualAccount;
    use rust_decimal_macros::dec;

    fn currency(code: &str) -> Currency {
        Currency::parse(code).expect("valid currency")
    }

    fn account() -> Arc<dyn SourceAccount> {
        Arc::new(ManualAccount::new("wallet"))
    }

    #[test]
    fn builds_valid_request() {
        let request = TransferRequest::new(
            account(),
            currency("BTC"),
            currency("ETH"),
            dec!(0.5),
            " 0xabc ",
        )
        .expect("valid request");
        assert_eq!(request.recipient_address(), "0xabc");
        assert_eq!(request.amount(), dec!(0.5));
    }

    #[test]
    fn rejects_non_positive_amount() {
        let err =
            TransferRequest::new(account(), currency("BTC"), currency("ETH"), dec!(0), "0xabc")
                .expect_err("zero amount");
        assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
    }

    #[test]
    fn rejects_empty_address_and_same_currency() {
        let err = TransferRequest::new(account(), currency("BTC"), currency("ETH"), dec!(1), "   ")
            .expect_err("empty address");
        assert_eq!(err, ValidationError::EmptyAddress);

        let err =
            TransferRequest::new(account(), currency("btc"), currency("BTC"), dec!(1), "0xabc")
                .expect_err("same currency");
        assert!(matches!(err, ValidationError::SameCurrency { .. }));
    }
}
