//! Quote negotiation against live market information.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::exchange::ExchangeApi;
use crate::{CoinPair, TransferError, TransferQuote};

/// Derives [`TransferQuote`]s from freshly fetched market information.
///
/// Market rates move, so nothing is cached: every call fetches again.
#[derive(Clone)]
pub struct QuoteNegotiator {
    exchange: Arc<dyn ExchangeApi>,
}

impl QuoteNegotiator {
    pub fn new(exchange: Arc<dyn ExchangeApi>) -> Self {
        Self { exchange }
    }

    /// # Errors
    ///
    /// - [`TransferError::Transport`] when market information cannot be fetched
    /// - [`TransferError::InvalidQuote`] when the amount violates provider limits
    ///   or the reported rate is unusable
    pub async fn fetch_quote(
        &self,
        pair: &CoinPair,
        source_amount: Decimal,
    ) -> Result<TransferQuote, TransferError> {
        let market = self.exchange.fetch_market_information(pair).await?;
        debug!(
            pair = pair.code(),
            rate = %market.rate,
            minimum = %market.minimum,
            "fetched market information"
        );

        let quote = TransferQuote::new(source_amount, &market)?;
        Ok(quote)
    }
}
