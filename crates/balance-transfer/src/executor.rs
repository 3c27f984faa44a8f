//! Transfer execution: create the exchange order, then fund it from the source account.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::exchange::ExchangeApi;
use crate::{CoinPair, TransactionRequest, TransferError, TransferRequest, Withdrawal};

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub transaction: TransactionRequest,
    pub withdrawal: Withdrawal,
}

/// Creates exchange orders and instructs the source account to fund them.
///
/// This is the only component that moves funds. It never retries and never
/// rolls back; callers own retry policy.
#[derive(Clone)]
pub struct TransferExecutor {
    exchange: Arc<dyn ExchangeApi>,
}

impl TransferExecutor {
    pub fn new(exchange: Arc<dyn ExchangeApi>) -> Self {
        Self { exchange }
    }

    /// # Errors
    ///
    /// - [`TransferError::Transport`] when the order cannot be created; the
    ///   source account is not touched
    /// - [`TransferError::WithdrawalFailure`] when the order exists but the
    ///   source account failed to pay into it
    pub async fn execute(
        &self,
        request: &TransferRequest,
        pair: &CoinPair,
    ) -> Result<TransferReceipt, TransferError> {
        // No refund routing policy exists yet, so the provider gets no return address.
        let transaction = self
            .exchange
            .create_transaction(
                request.amount(),
                request.recipient_address(),
                pair.code(),
                None,
            )
            .await?;
        info!(
            order_id = %transaction.order_id,
            deposit_address = %transaction.deposit_address,
            deposit_amount = %transaction.deposit_amount,
            "exchange transaction created"
        );

        let withdrawal = Withdrawal::new(
            request.source_currency().clone(),
            transaction.deposit_amount,
            transaction.deposit_address.clone(),
        );

        let account = request.source_account();
        if let Err(source) = account.withdraw(withdrawal.clone()).await {
            warn!(
                order_id = %transaction.order_id,
                account = account.label(),
                error = %source,
                "withdrawal failed after exchange transaction was created"
            );
            return Err(TransferError::WithdrawalFailure {
                order_id: transaction.order_id,
                deposit_address: transaction.deposit_address,
                amount: transaction.deposit_amount,
                source,
            });
        }

        info!(
            order_id = %transaction.order_id,
            account = account.label(),
            "withdrawal submitted"
        );
        Ok(TransferReceipt {
            transaction,
            withdrawal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{ManualAccount, SourceAccount};
    use crate::testing::{RejectingAccount, ScriptedExchange};
    use crate::{AccountError, Coin, Currency, ExchangeError};
    use rust_decimal_macros::dec;

    fn request(account: Arc<dyn SourceAccount>) -> TransferRequest {
        TransferRequest::new(
            account,
            Currency::parse("BTC").expect("valid currency"),
            Currency::parse("ETH").expect("valid currency"),
            dec!(0.5),
            "0xabc",
        )
        .expect("valid request")
    }

    fn pair() -> CoinPair {
        CoinPair::new(Coin::new("BTC", "Bitcoin"), Coin::new("ETH", "Ether"))
    }

    #[tokio::test]
    async fn withdraws_deposit_amount_to_deposit_address() {
        let exchange = Arc::new(ScriptedExchange::btc_eth(dec!(20)));
        let account = Arc::new(ManualAccount::new("wallet"));
        let executor = TransferExecutor::new(exchange.clone());

        let receipt = executor
            .execute(&request(account.clone()), &pair())
            .await
            .expect("transfer succeeds");

        assert_eq!(exchange.transactions(), 1);
        let instructions = account.instructions();
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].amount, dec!(0.5));
        assert_eq!(instructions[0].recipient_crypto_address, "dep123");
        assert_eq!(instructions[0].currency.as_str(), "BTC");
        assert_eq!(receipt.withdrawal, instructions[0]);
        assert_eq!(receipt.transaction.order_id, "order-1");
    }

    #[tokio::test]
    async fn failed_transaction_never_touches_account() {
        let mut exchange = ScriptedExchange::btc_eth(dec!(20));
        exchange.transaction = Err(ExchangeError::rejected("invalid withdrawal address"));
        let account = Arc::new(ManualAccount::new("wallet"));
        let executor = TransferExecutor::new(Arc::new(exchange));

        let error = executor
            .execute(&request(account.clone()), &pair())
            .await
            .expect_err("creation fails");
        assert!(matches!(error, TransferError::Transport(_)));
        assert!(account.instructions().is_empty());
    }

    #[tokio::test]
    async fn withdrawal_failure_reports_partial_state() {
        let account = Arc::new(RejectingAccount(AccountError::InsufficientFunds {
            available: dec!(0.1),
            requested: dec!(0.5),
        }));
        let executor = TransferExecutor::new(Arc::new(ScriptedExchange::btc_eth(dec!(20))));

        let error = executor
            .execute(&request(account), &pair())
            .await
            .expect_err("withdrawal fails");
        match error {
            TransferError::WithdrawalFailure {
                order_id,
                deposit_address,
                amount,
                source,
            } => {
                assert_eq!(order_id, "order-1");
                assert_eq!(deposit_address, "dep123");
                assert_eq!(amount, dec!(0.5));
                assert!(matches!(source, AccountError::InsufficientFunds { .. }));
            }
            other => panic!("expected withdrawal failure, got {other:?}"),
        }
    }
}
