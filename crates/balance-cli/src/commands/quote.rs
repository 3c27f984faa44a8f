use std::sync::Arc;

use balance_transfer::{
    CoinPair, ExchangeConfig, ManualAccount, TransferOrchestrator, TransferQuote,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::TransferArgs;
use crate::error::CliError;

use super::build_request;

#[derive(Debug, Serialize)]
struct QuoteResponseData {
    pair: Option<CoinPair>,
    quote: TransferQuote,
}

pub async fn run(args: &TransferArgs, config: &ExchangeConfig) -> Result<Value, CliError> {
    let account = Arc::new(ManualAccount::new(args.account.as_str()));
    let request = build_request(args, account)?;
    let orchestrator = TransferOrchestrator::shapeshift(request, config);

    let quote = orchestrator.fetch_quote().await?;
    let data = QuoteResponseData {
        pair: orchestrator.pair().cloned(),
        quote,
    };
    Ok(serde_json::to_value(data)?)
}
