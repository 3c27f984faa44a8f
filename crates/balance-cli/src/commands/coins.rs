use balance_transfer::{Coin, ExchangeApi, ExchangeConfig, ShapeShiftClient};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CoinsResponseData {
    coins: Vec<Coin>,
}

pub async fn run(config: &ExchangeConfig) -> Result<Value, CliError> {
    let client = ShapeShiftClient::new(config);
    let coins = client.fetch_supported_coins().await?;
    Ok(serde_json::to_value(CoinsResponseData { coins })?)
}
