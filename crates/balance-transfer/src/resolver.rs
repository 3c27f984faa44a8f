//! Currency pair resolution.
//!
//! Maps a (source, recipient) currency request onto the provider's tradable
//! pair by matching symbols in the provider's supported-coin list.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::exchange::ExchangeApi;
use crate::{Coin, CoinPair, Currency, CurrencySide, TransferError};

/// Stateless pair resolver; callers cache the resolved pair.
#[derive(Clone)]
pub struct PairResolver {
    exchange: Arc<dyn ExchangeApi>,
}

impl PairResolver {
    pub fn new(exchange: Arc<dyn ExchangeApi>) -> Self {
        Self { exchange }
    }

    /// Resolve the provider pair for `source` → `recipient` with a single coin-list fetch.
    ///
    /// The source currency is checked first; an unsupported source is reported
    /// even when the recipient is unsupported too.
    ///
    /// # Errors
    ///
    /// - [`TransferError::Transport`] when the coin list cannot be fetched
    /// - [`TransferError::UnsupportedCurrency`] naming the unmatched side
    pub async fn resolve_pair(
        &self,
        source: &Currency,
        recipient: &Currency,
    ) -> Result<CoinPair, TransferError> {
        let coins = self.exchange.fetch_supported_coins().await?;
        debug!(coin_count = coins.len(), "fetched supported coins");

        let input = find_coin(&coins, source, CurrencySide::Source)?;
        let output = find_coin(&coins, recipient, CurrencySide::Recipient)?;

        let pair = CoinPair::new(input.clone(), output.clone());
        debug!(pair = pair.code(), "resolved coin pair");
        Ok(pair)
    }
}

fn find_coin<'a>(
    coins: &'a [Coin],
    currency: &Currency,
    side: CurrencySide,
) -> Result<&'a Coin, TransferError> {
    let coin = coins
        .iter()
        .find(|coin| currency.matches_symbol(&coin.symbol))
        .ok_or_else(|| TransferError::UnsupportedCurrency {
            side,
            currency: currency.clone(),
        })?;

    if !coin.available {
        warn!(%side, symbol = %coin.symbol, "provider lists coin as unavailable");
    }
    Ok(coin)
}
