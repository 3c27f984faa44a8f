use std::sync::Arc;

use balance_transfer::{ExchangeConfig, ManualAccount, TransferOrchestrator, TransferReceipt};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cli::TransferArgs;
use crate::error::CliError;

use super::build_request;

#[derive(Debug, Serialize)]
struct TransferResponseData {
    receipt: TransferReceipt,
    instruction: String,
}

pub async fn run(args: &TransferArgs, config: &ExchangeConfig) -> Result<Value, CliError> {
    let account = Arc::new(ManualAccount::new(args.account.as_str()));
    let request = build_request(args, account.clone())?;
    let orchestrator = TransferOrchestrator::shapeshift(request, config);

    let receipt = orchestrator.perform_transfer().await?;
    info!(
        recorded = account.instructions().len(),
        "withdrawal instruction recorded for manual account"
    );

    let instruction = format!(
        "send {} {} to {}",
        receipt.withdrawal.amount,
        receipt.withdrawal.currency,
        receipt.withdrawal.recipient_crypto_address
    );
    Ok(serde_json::to_value(TransferResponseData {
        receipt,
        instruction,
    })?)
}
