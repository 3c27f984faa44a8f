mod coins;
mod quote;
mod transfer;

use std::str::FromStr;
use std::sync::Arc;

use balance_transfer::{Currency, ExchangeConfig, SourceAccount, TransferRequest};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::cli::{Cli, Command, TransferArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = exchange_config(cli)?;

    match &cli.command {
        Command::Coins => coins::run(&config).await,
        Command::Quote(args) => quote::run(args, &config).await,
        Command::Transfer(args) => transfer::run(args, &config).await,
    }
}

fn exchange_config(cli: &Cli) -> Result<ExchangeConfig, CliError> {
    let mut config = ExchangeConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    Ok(config)
}

fn build_request(
    args: &TransferArgs,
    account: Arc<dyn SourceAccount>,
) -> Result<TransferRequest, CliError> {
    let amount = Decimal::from_str(args.amount.trim()).map_err(|error| CliError::InvalidAmount {
        value: args.amount.clone(),
        reason: error.to_string(),
    })?;

    let request = TransferRequest::new(
        account,
        Currency::parse(&args.from)?,
        Currency::parse(&args.to)?,
        amount,
        args.address.as_str(),
    )?;
    Ok(request)
}
