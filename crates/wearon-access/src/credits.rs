//! Shopper Credit Balance Service
//!
//! Reads the shopper's metered credit balance and exposes a bounded polling
//! operation for the post-checkout round-trip: the storefront opens the
//! external checkout in a new tab, then polls here until credits appear or
//! the window closes.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use wearon_core::{ApiClient, Delay, TokioDelay, unwrap_envelope};

use crate::error::Result;

/// Default path of the versioned shopper-balance endpoint
pub const DEFAULT_SHOPPER_BALANCE_ENDPOINT: &str = "/api/v1/credits/shopper";

/// A shopper's credit ledger totals
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperCreditBalance {
    /// Credits currently available
    pub balance: u64,

    /// Lifetime credits added
    pub total_purchased: u64,

    /// Lifetime credits consumed
    pub total_spent: u64,
}

/// Coerce a payload value to a non-negative count; anything invalid is 0
fn to_count(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// First non-zero count under any of `names`
///
/// The balance endpoint has shipped two key-naming schemes; current names
/// are listed first and win whenever they carry a value.
fn coalesce_count(data: &Value, names: &[&str]) -> u64 {
    names
        .iter()
        .filter_map(|name| data.get(*name))
        .map(to_count)
        .find(|count| *count > 0)
        .unwrap_or(0)
}

/// Fetch the shopper's current credit balance
///
/// One GET (default [`DEFAULT_SHOPPER_BALANCE_ENDPOINT`]), same envelope
/// rule as the config endpoint. Missing or invalid numeric fields coerce
/// to 0. Accepts current (`total_added`/`total_used`) and legacy
/// (`total_purchased`/`total_spent`) key names.
pub async fn get_shopper_credit_balance(
    client: &dyn ApiClient,
    endpoint: Option<&str>,
) -> Result<ShopperCreditBalance> {
    let endpoint = endpoint.unwrap_or(DEFAULT_SHOPPER_BALANCE_ENDPOINT);
    let body = client.get(endpoint).await?;
    let data = unwrap_envelope(&body);

    Ok(ShopperCreditBalance {
        balance: data.get("balance").map(to_count).unwrap_or(0),
        total_purchased: coalesce_count(
            data,
            &["total_added", "totalAdded", "total_purchased", "totalPurchased"],
        ),
        total_spent: coalesce_count(
            data,
            &["total_used", "totalUsed", "total_spent", "totalSpent"],
        ),
    })
}

/// Options for [`poll_shopper_credit_balance`]
#[derive(Clone)]
pub struct PollOptions {
    /// Pause between attempts
    pub interval: Duration,

    /// Overall budget; attempts = `floor(timeout / interval) + 1`
    pub timeout: Duration,

    /// Balance endpoint override
    pub endpoint: Option<String>,

    /// Delay capability; inject a recording delay in tests
    pub delay: Arc<dyn Delay>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            timeout: Duration::from_millis(60_000),
            endpoint: None,
            delay: Arc::new(TokioDelay),
        }
    }
}

impl PollOptions {
    fn attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }

        let quotient = self.timeout.as_millis() / self.interval.as_millis();
        u32::try_from(quotient).unwrap_or(u32::MAX).saturating_add(1).max(1)
    }
}

/// Poll the balance endpoint until credits appear
///
/// Returns as soon as `balance > 0`; otherwise returns the last observed
/// (possibly zero) balance after exhausting the attempt budget. No delay is
/// spent after the final attempt. A fetch failure propagates immediately
/// and ends polling early; only the absence of credit is retried.
pub async fn poll_shopper_credit_balance(
    client: &dyn ApiClient,
    options: &PollOptions,
) -> Result<ShopperCreditBalance> {
    let attempts = options.attempts();
    let mut latest = ShopperCreditBalance::default();

    for attempt in 0..attempts {
        latest = get_shopper_credit_balance(client, options.endpoint.as_deref()).await?;
        if latest.balance > 0 {
            tracing::debug!(attempt, balance = latest.balance, "credits appeared");
            return Ok(latest);
        }

        if attempt + 1 < attempts {
            options.delay.wait(options.interval).await;
        }
    }

    tracing::debug!(attempts, "poll exhausted without credits");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wearon_core::{MockApiClient, RecordingDelay};

    fn balance_body(balance: u64, added: u64, used: u64) -> Value {
        json!({ "data": { "data": {
            "balance": balance,
            "total_added": added,
            "total_used": used,
        } } })
    }

    #[tokio::test]
    async fn test_reads_balance_from_default_endpoint() {
        let client = MockApiClient::new();
        client.push_response(balance_body(2, 5, 3));

        let balance = get_shopper_credit_balance(&client, None).await.unwrap();

        assert_eq!(
            balance,
            ShopperCreditBalance { balance: 2, total_purchased: 5, total_spent: 3 }
        );
        assert_eq!(client.requests(), vec!["/api/v1/credits/shopper"]);
    }

    #[tokio::test]
    async fn test_supports_legacy_key_names() {
        let client = MockApiClient::new();
        client.push_response(json!({ "data": { "data": {
            "balance": 1,
            "total_purchased": 3,
            "total_spent": 2,
        } } }));

        let balance = get_shopper_credit_balance(&client, None).await.unwrap();
        assert_eq!(
            balance,
            ShopperCreditBalance { balance: 1, total_purchased: 3, total_spent: 2 }
        );
    }

    #[tokio::test]
    async fn test_current_key_names_win_over_legacy() {
        let client = MockApiClient::new();
        client.push_response(json!({ "data": { "data": {
            "balance": 4,
            "total_added": 6,
            "total_used": 2,
            "total_purchased": 99,
            "total_spent": 99,
        } } }));

        let balance = get_shopper_credit_balance(&client, None).await.unwrap();
        assert_eq!(balance.total_purchased, 6);
        assert_eq!(balance.total_spent, 2);
    }

    #[tokio::test]
    async fn test_missing_fields_coerce_to_zero() {
        let client = MockApiClient::new();
        client.push_response(json!({ "data": { "balance": "not-a-number" } }));

        let balance = get_shopper_credit_balance(&client, None).await.unwrap();
        assert_eq!(balance, ShopperCreditBalance::default());
    }

    #[tokio::test]
    async fn test_poll_stops_when_credits_appear() {
        let client = MockApiClient::new();
        client.push_response(balance_body(0, 0, 0));
        client.push_response(balance_body(0, 0, 0));
        client.push_response(balance_body(2, 2, 0));

        let delay = Arc::new(RecordingDelay::new());
        let options = PollOptions { delay: delay.clone(), ..PollOptions::default() };

        let balance = poll_shopper_credit_balance(&client, &options).await.unwrap();

        assert_eq!(balance.balance, 2);
        assert_eq!(client.requests().len(), 3);
        assert_eq!(
            delay.waits(),
            vec![Duration::from_millis(5000), Duration::from_millis(5000)]
        );
    }

    #[tokio::test]
    async fn test_poll_returns_last_zero_balance_when_exhausted() {
        let client = MockApiClient::new();
        for _ in 0..3 {
            client.push_response(balance_body(0, 0, 0));
        }

        let delay = Arc::new(RecordingDelay::new());
        let options = PollOptions {
            interval: Duration::from_millis(100),
            timeout: Duration::from_millis(200),
            delay: delay.clone(),
            ..PollOptions::default()
        };

        let balance = poll_shopper_credit_balance(&client, &options).await.unwrap();

        assert_eq!(balance.balance, 0);
        // floor(200/100) + 1 = 3 attempts, no delay after the final one
        assert_eq!(client.requests().len(), 3);
        assert_eq!(delay.waits().len(), 2);
    }

    #[tokio::test]
    async fn test_poll_fetch_failure_ends_polling_early() {
        let client = MockApiClient::new();
        client.push_response(balance_body(0, 0, 0));
        client.push_error("connection reset");

        let delay = Arc::new(RecordingDelay::new());
        let options = PollOptions { delay: delay.clone(), ..PollOptions::default() };

        assert!(poll_shopper_credit_balance(&client, &options).await.is_err());
        assert_eq!(client.requests().len(), 2);
    }
}
