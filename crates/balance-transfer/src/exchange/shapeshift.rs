use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use crate::exchange::ExchangeApi;
use crate::http_client::{HttpClient, HttpError, HttpRequest, ReqwestHttpClient};
use crate::{
    Coin, CoinPair, ExchangeConfig, ExchangeError, MarketInformation, TransactionRequest,
};

/// ShapeShift exchange client.
///
/// Credentials come from [`ExchangeConfig`]; the API key is attached to order
/// creation requests and never logged.
#[derive(Clone)]
pub struct ShapeShiftClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl ShapeShiftClient {
    pub fn new(config: &ExchangeConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: &ExchangeConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<T, ExchangeError> {
        let request = request.with_timeout_ms(self.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| transport_error(operation, &error))?;

        debug!(operation, status = response.status, "shapeshift response received");

        if response.status == 429 {
            return Err(ExchangeError::rate_limited(format!(
                "shapeshift {operation} rate limited"
            )));
        }

        if !response.is_success() {
            let detail = provider_error(&response.body)
                .map(|message| format!(": {message}"))
                .unwrap_or_default();
            return Err(ExchangeError::unavailable(format!(
                "shapeshift {operation} returned status {}{detail}",
                response.status
            )));
        }

        // Provider errors arrive with a success status.
        if let Some(message) = provider_error(&response.body) {
            return Err(ExchangeError::rejected(format!(
                "shapeshift {operation} rejected: {message}"
            )));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            ExchangeError::invalid_response(format!(
                "failed to decode shapeshift {operation} response: {error}"
            ))
        })
    }
}

impl ExchangeApi for ShapeShiftClient {
    fn fetch_supported_coins<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Coin>, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(self.endpoint("getcoins"));
            let payload: BTreeMap<String, CoinPayload> = self.send("getcoins", request).await?;

            Ok(payload
                .into_iter()
                .map(|(key, coin)| normalize_coin(key, coin))
                .collect())
        })
    }

    fn fetch_market_information<'a>(
        &'a self,
        pair: &'a CoinPair,
    ) -> Pin<Box<dyn Future<Output = Result<MarketInformation, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let path = format!("marketinfo/{}", urlencoding::encode(pair.code()));
            let request = HttpRequest::get(self.endpoint(&path));
            let payload: MarketInfoPayload = self.send("marketinfo", request).await?;

            Ok(MarketInformation {
                pair_code: payload.pair.unwrap_or_else(|| pair.code().to_owned()),
                rate: payload.rate,
                minimum: payload.minimum.unwrap_or(Decimal::ZERO),
                maximum: payload.max_limit.or(payload.limit),
                miner_fee: payload.miner_fee.unwrap_or(Decimal::ZERO),
                fetched_at: OffsetDateTime::now_utc(),
            })
        })
    }

    fn create_transaction<'a>(
        &'a self,
        amount: Decimal,
        recipient_address: &'a str,
        pair_code: &'a str,
        return_address: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TransactionRequest, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let body = SendAmountBody {
                deposit_amount: amount,
                withdrawal: recipient_address,
                pair: pair_code,
                return_address,
                api_key: self.api_key.as_deref(),
            };
            let body = serde_json::to_string(&body).map_err(|error| {
                ExchangeError::internal(format!("failed to encode sendamount request: {error}"))
            })?;

            let request = HttpRequest::post(self.endpoint("sendamount")).with_json_body(body);
            let payload: SendAmountResponse = self.send("sendamount", request).await?;

            normalize_transaction(payload.success, pair_code)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderErrorPayload {
    error: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CoinPayload {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketInfoPayload {
    #[serde(default)]
    pair: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    limit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    max_limit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    minimum: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    miner_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendAmountBody<'a> {
    deposit_amount: Decimal,
    withdrawal: &'a str,
    pair: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendAmountResponse {
    success: SendAmountPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendAmountPayload {
    order_id: String,
    #[serde(default)]
    pair: Option<String>,
    deposit: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    deposit_amount: Decimal,
    withdrawal: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    withdrawal_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    quoted_rate: Option<Decimal>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    expiration: Option<i64>,
}

fn normalize_coin(key: String, payload: CoinPayload) -> Coin {
    let symbol = payload
        .symbol
        .filter(|symbol| !symbol.trim().is_empty())
        .unwrap_or(key);
    let name = payload.name.unwrap_or_else(|| symbol.clone());
    let available = payload
        .status
        .map_or(true, |status| status.eq_ignore_ascii_case("available"));

    Coin {
        symbol,
        name,
        available,
    }
}

fn normalize_transaction(
    payload: SendAmountPayload,
    pair_code: &str,
) -> Result<TransactionRequest, ExchangeError> {
    if payload.deposit.trim().is_empty() {
        return Err(ExchangeError::invalid_response(
            "shapeshift sendamount returned an empty deposit address",
        ));
    }
    if payload.deposit_amount <= Decimal::ZERO {
        return Err(ExchangeError::invalid_response(format!(
            "shapeshift sendamount returned non-positive deposit amount {}",
            payload.deposit_amount
        )));
    }

    let expires_at = payload.expiration.and_then(|millis| {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
    });

    Ok(TransactionRequest {
        order_id: payload.order_id,
        pair_code: payload.pair.unwrap_or_else(|| pair_code.to_owned()),
        deposit_address: payload.deposit,
        deposit_amount: payload.deposit_amount,
        withdrawal_address: payload.withdrawal,
        withdrawal_amount: payload.withdrawal_amount,
        quoted_rate: payload.quoted_rate,
        expires_at,
    })
}

fn provider_error(body: &str) -> Option<String> {
    serde_json::from_str::<ProviderErrorPayload>(body)
        .ok()
        .map(|payload| payload.error)
}

fn transport_error(operation: &str, error: &HttpError) -> ExchangeError {
    let message = format!("shapeshift {operation} transport error: {}", error.message());
    if error.timed_out() {
        ExchangeError::timeout(message)
    } else if error.retryable() {
        ExchangeError::unavailable(message)
    } else {
        ExchangeError::internal(message)
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_decimal(&value).ok_or_else(|| D::Error::custom(format!("expected decimal, got {value}")))
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_decimal(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected decimal, got {value}"))),
    }
}
