//! Average-price lookups against a Binance-style `avgPrice` endpoint.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{usd_to_native, Usd};
use crate::error::PriceError;
use crate::port::PriceOracle;

/// Response body of the average-price endpoint.
#[derive(Debug, Deserialize)]
struct AvgPriceResponse {
    price: PriceField,
}

/// The price is documented as a numeric string; plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

/// Parse the average price out of a response body.
pub fn parse_price(body: &str) -> Result<Decimal, PriceError> {
    let response: AvgPriceResponse =
        serde_json::from_str(body).map_err(|e| PriceError::Parse(e.to_string()))?;

    let raw = match response.price {
        PriceField::Text(text) => text,
        PriceField::Number(number) => number.to_string(),
    };
    let raw = raw.trim();
    let price = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| PriceError::Parse(format!("'{raw}': {e}")))?;

    if price <= Decimal::ZERO {
        return Err(PriceError::NonPositive(price));
    }
    Ok(price)
}

/// HTTP price oracle for one fixed trading pair.
pub struct AveragePriceClient {
    client: Client,
    url: url::Url,
}

impl AveragePriceClient {
    /// Create a client for `url`; every request is bounded by `timeout`.
    pub fn new(url: url::Url, timeout: Duration) -> Result<Self, PriceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// Fetch the current average price of the native asset in USD.
    pub async fn average_price(&self) -> Result<Decimal, PriceError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let price = parse_price(&body)?;
        debug!(price = %price, "Fetched average price");
        Ok(price)
    }
}

#[async_trait]
impl PriceOracle for AveragePriceClient {
    async fn convert(&self, usd: Usd) -> Result<U256, PriceError> {
        let price = self.average_price().await?;
        usd_to_native(usd, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_numeric_string_price() {
        let body = r#"{"mins":5,"price":"3012.45671234","closeTime":1700000000000}"#;
        assert_eq!(parse_price(body).unwrap(), dec!(3012.45671234));
    }

    #[test]
    fn parses_plain_number_price() {
        assert_eq!(parse_price(r#"{"price": 3000}"#).unwrap(), dec!(3000));
    }

    #[test]
    fn rejects_missing_or_garbage_price() {
        assert!(matches!(
            parse_price(r#"{"code":-1121,"msg":"Invalid symbol."}"#),
            Err(PriceError::Parse(_))
        ));
        assert!(matches!(
            parse_price(r#"{"price":"n/a"}"#),
            Err(PriceError::Parse(_))
        ));
        assert!(matches!(parse_price("<html>"), Err(PriceError::Parse(_))));
    }

    #[test]
    fn rejects_zero_price() {
        assert!(matches!(
            parse_price(r#"{"price":"0.00000000"}"#),
            Err(PriceError::NonPositive(_))
        ));
    }
}
