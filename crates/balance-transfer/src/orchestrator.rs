//! Transfer orchestration.
//!
//! One [`TransferOrchestrator`] owns the lifecycle of one [`TransferRequest`].
//! The provider pair is resolved lazily on the first call to either public
//! operation and cached for the orchestrator's lifetime:
//!
//! ```text
//! Unresolved ──first fetch_quote / perform_transfer──▶ Resolved | Failed (permanent)
//! ```
//!
//! Concurrent first callers await the same in-flight resolution, and the
//! outcome is kept whether it succeeded or not: an orchestrator fetches the
//! coin list at most once. After a failed resolution every call returns that
//! error again without touching the network.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::exchange::{ExchangeApi, ShapeShiftClient};
use crate::executor::{TransferExecutor, TransferReceipt};
use crate::quote::QuoteNegotiator;
use crate::resolver::PairResolver;
use crate::{CoinPair, ExchangeConfig, TransferError, TransferQuote, TransferRequest};

/// Object-safe view of a transfer operator.
pub trait TransferOperator: Send + Sync {
    fn fetch_quote<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<TransferQuote, TransferError>> + Send + 'a>>;

    fn perform_transfer<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<TransferReceipt, TransferError>> + Send + 'a>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TransferState {
    Pending,
    /// An exchange order was created and a withdrawal attempted.
    Settled { order_id: String },
}

/// Owns one transfer request: cached pair resolution, quoting and execution.
pub struct TransferOrchestrator {
    request: TransferRequest,
    resolver: PairResolver,
    negotiator: QuoteNegotiator,
    executor: TransferExecutor,
    resolution: OnceCell<Result<CoinPair, TransferError>>,
    transfer_state: Mutex<TransferState>,
}

impl TransferOrchestrator {
    pub fn new(request: TransferRequest, exchange: Arc<dyn ExchangeApi>) -> Self {
        Self {
            request,
            resolver: PairResolver::new(Arc::clone(&exchange)),
            negotiator: QuoteNegotiator::new(Arc::clone(&exchange)),
            executor: TransferExecutor::new(exchange),
            resolution: OnceCell::new(),
            transfer_state: Mutex::new(TransferState::Pending),
        }
    }

    /// Orchestrator backed by a ShapeShift client built from `config`.
    pub fn shapeshift(request: TransferRequest, config: &ExchangeConfig) -> Self {
        Self::new(request, Arc::new(ShapeShiftClient::new(config)))
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// The cached pair, if resolution has completed successfully.
    pub fn pair(&self) -> Option<&CoinPair> {
        self.resolution.get().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn is_resolved(&self) -> bool {
        self.pair().is_some()
    }

    /// Quote the request amount at current market rates.
    ///
    /// Every call fetches fresh market information; only the pair is cached.
    ///
    /// # Errors
    ///
    /// Resolution errors are returned as-is and no market fetch is made.
    #[tracing::instrument(
        name = "fetch_quote",
        skip(self),
        fields(
            request_id = %self.request.id(),
            source = %self.request.source_currency(),
            recipient = %self.request.recipient_currency(),
        )
    )]
    pub async fn fetch_quote(&self) -> Result<TransferQuote, TransferError> {
        let pair = self.resolved_pair().await?;
        self.negotiator.fetch_quote(pair, self.request.amount()).await
    }

    /// Create the exchange order and withdraw from the source account.
    ///
    /// Only one transfer runs per orchestrator: concurrent calls wait on each
    /// other, and once an order has been created and funded (or funding
    /// failed) further calls return [`TransferError::AlreadyTransferred`]
    /// without touching the network. A failure to create the order leaves the
    /// orchestrator ready to try again.
    ///
    /// # Errors
    ///
    /// See [`TransferExecutor::execute`]; resolution errors are returned as-is.
    #[tracing::instrument(
        name = "perform_transfer",
        skip(self),
        fields(
            request_id = %self.request.id(),
            source = %self.request.source_currency(),
            recipient = %self.request.recipient_currency(),
        )
    )]
    pub async fn perform_transfer(&self) -> Result<TransferReceipt, TransferError> {
        let mut state = self.transfer_state.lock().await;
        if let TransferState::Settled { order_id } = &*state {
            return Err(TransferError::AlreadyTransferred {
                order_id: order_id.clone(),
            });
        }

        let pair = self.resolved_pair().await?;
        let outcome = self.executor.execute(&self.request, pair).await;

        match &outcome {
            Ok(receipt) => {
                *state = TransferState::Settled {
                    order_id: receipt.transaction.order_id.clone(),
                };
            }
            Err(TransferError::WithdrawalFailure { order_id, .. }) => {
                *state = TransferState::Settled {
                    order_id: order_id.clone(),
                };
            }
            Err(_) => {}
        }

        outcome
    }

    async fn resolved_pair(&self) -> Result<&CoinPair, TransferError> {
        self.resolution
            .get_or_init(|| async {
                debug!("resolving coin pair");
                self.resolver
                    .resolve_pair(
                        self.request.source_currency(),
                        self.request.recipient_currency(),
                    )
                    .await
            })
            .await
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl TransferOperator for TransferOrchestrator {
    fn fetch_quote<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<TransferQuote, TransferError>> + Send + 'a>> {
        Box::pin(TransferOrchestrator::fetch_quote(self))
    }

    fn perform_transfer<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<TransferReceipt, TransferError>> + Send + 'a>> {
        Box::pin(TransferOrchestrator::perform_transfer(self))
    }
}
