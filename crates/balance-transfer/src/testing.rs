//! Minimal collaborators for unit tests. Behavior tests use the fuller fakes in `tests/`.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::OffsetDateTime;

use crate::account::SourceAccount;
use crate::exchange::ExchangeApi;
use crate::{
    AccountError, Coin, CoinPair, ExchangeError, MarketInformation, TransactionRequest, Withdrawal,
};

/// Exchange returning fixed outcomes and counting calls per operation.
pub(crate) struct ScriptedExchange {
    pub coins: Result<Vec<Coin>, ExchangeError>,
    pub market: Result<MarketInformation, ExchangeError>,
    pub transaction: Result<TransactionRequest, ExchangeError>,
    coin_fetches: AtomicUsize,
    market_fetches: AtomicUsize,
    transactions: AtomicUsize,
}

impl ScriptedExchange {
    /// BTC/ETH/LTC listing, limits 0.001..=2, order `order-1` depositing 0.5 into `dep123`.
    pub fn btc_eth(rate: Decimal) -> Self {
        Self {
            coins: Ok(vec![
                Coin::new("BTC", "Bitcoin"),
                Coin::new("ETH", "Ether"),
                Coin::new("LTC", "Litecoin"),
            ]),
            market: Ok(MarketInformation {
                pair_code: String::from("btc_eth"),
                rate,
                minimum: dec!(0.001),
                maximum: Some(dec!(2)),
                miner_fee: Decimal::ZERO,
                fetched_at: OffsetDateTime::UNIX_EPOCH,
            }),
            transaction: Ok(TransactionRequest {
                order_id: String::from("order-1"),
                pair_code: String::from("btc_eth"),
                deposit_address: String::from("dep123"),
                deposit_amount: dec!(0.5),
                withdrawal_address: String::from("0xabc"),
                withdrawal_amount: None,
                quoted_rate: None,
                expires_at: None,
            }),
            coin_fetches: AtomicUsize::new(0),
            market_fetches: AtomicUsize::new(0),
            transactions: AtomicUsize::new(0),
        }
    }

    pub fn coin_fetches(&self) -> usize {
        self.coin_fetches.load(Ordering::SeqCst)
    }

    pub fn market_fetches(&self) -> usize {
        self.market_fetches.load(Ordering::SeqCst)
    }

    pub fn transactions(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }
}

impl ExchangeApi for ScriptedExchange {
    fn fetch_supported_coins<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Coin>, ExchangeError>> + Send + 'a>> {
        self.coin_fetches.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            tokio::task::yield_now().await;
            self.coins.clone()
        })
    }

    fn fetch_market_information<'a>(
        &'a self,
        _pair: &'a CoinPair,
    ) -> Pin<Box<dyn Future<Output = Result<MarketInformation, ExchangeError>> + Send + 'a>> {
        self.market_fetches.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { self.market.clone() })
    }

    fn create_transaction<'a>(
        &'a self,
        _amount: Decimal,
        _recipient_address: &'a str,
        _pair_code: &'a str,
        _return_address: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TransactionRequest, ExchangeError>> + Send + 'a>> {
        self.transactions.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { self.transaction.clone() })
    }
}

/// Account that refuses every withdrawal with the same error.
pub(crate) struct RejectingAccount(pub AccountError);

impl SourceAccount for RejectingAccount {
    fn label(&self) -> &str {
        "rejecting"
    }

    fn withdraw<'a>(
        &'a self,
        _withdrawal: Withdrawal,
    ) -> Pin<Box<dyn Future<Output = Result<(), AccountError>> + Send + 'a>> {
        Box::pin(async move { Err(self.0.clone()) })
    }
}
