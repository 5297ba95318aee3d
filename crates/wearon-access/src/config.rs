//! Store Access Resolver
//!
//! Fetches the per-store billing configuration, normalizes each field
//! independently, and derives whether login is required and how credits are
//! priced. Every normalization fails safe: an unrecognized billing mode is
//! treated as credit-metered, which requires login.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wearon_core::{ApiClient, unwrap_envelope};

use crate::error::Result;

/// Default path of the versioned store-config endpoint
pub const DEFAULT_CONFIG_ENDPOINT: &str = "/api/v1/stores/config";

/// How the store pays for try-ons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingMode {
    /// Shoppers consume metered credits; requires login and a balance
    #[serde(rename = "resell_mode")]
    Resell,

    /// The store covers try-on cost; no login or credits required
    #[serde(rename = "absorb_mode")]
    Absorb,
}

impl BillingMode {
    /// Normalize a raw mode string
    ///
    /// Case-insensitive `absorb` / `absorb_mode` map to [`BillingMode::Absorb`];
    /// everything else, including missing or garbage input, maps to
    /// [`BillingMode::Resell`]. The stricter default is deliberate.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("absorb" | "absorb_mode") => BillingMode::Absorb,
            _ => BillingMode::Resell,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillingMode::Resell => "resell_mode",
            BillingMode::Absorb => "absorb_mode",
        }
    }
}

/// Normalized per-store billing configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAccessConfig {
    pub billing_mode: BillingMode,

    /// Credit price shown to shoppers; `None` unless finite and positive
    pub retail_credit_price: Option<Decimal>,

    /// Hostname with protocol and trailing slashes stripped
    pub shop_domain: Option<String>,

    /// Variant of the credit product in the store catalog
    pub shopify_variant_id: Option<String>,
}

/// Access decision derived from [`StoreAccessConfig`]
///
/// `require_login` and `retail_credit_price_label` are pure functions of the
/// config; they carry no independent state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub billing_mode: BillingMode,
    pub retail_credit_price: Option<Decimal>,
    pub shop_domain: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub require_login: bool,
    pub retail_credit_price_label: Option<String>,
}

/// Check whether a billing mode requires the shopper to sign in
pub fn should_require_login(billing_mode: BillingMode) -> bool {
    billing_mode != BillingMode::Absorb
}

/// Shopper-facing price label, e.g. `"$1.25 per credit"`
///
/// `None` in absorb mode or without a valid positive price.
pub fn retail_credit_price_label(
    billing_mode: BillingMode,
    retail_credit_price: Option<Decimal>,
) -> Option<String> {
    if billing_mode != BillingMode::Resell {
        return None;
    }

    let price = retail_credit_price.filter(|p| p > &Decimal::ZERO)?;
    Some(format!("${:.2} per credit", price.round_dp(2)))
}

/// Strip protocol and trailing slashes from a shop domain
///
/// `None` if empty after trimming.
pub fn normalize_shop_domain(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let without_protocol = if let Some(rest) = lower.strip_prefix("https://") {
        &trimmed[trimmed.len() - rest.len()..]
    } else if let Some(rest) = lower.strip_prefix("http://") {
        &trimmed[trimmed.len() - rest.len()..]
    } else {
        trimmed
    };

    let host = without_protocol.trim_end_matches('/');
    if host.is_empty() {
        return None;
    }

    Some(host.to_string())
}

fn normalize_retail_credit_price(raw: Option<&Value>) -> Option<Decimal> {
    let parsed = match raw? {
        Value::Number(number) => Decimal::from_f64_retain(number.as_f64()?),
        Value::String(text) => text.trim().parse::<Decimal>().ok(),
        _ => None,
    }?;

    (parsed > Decimal::ZERO).then_some(parsed)
}

/// First non-empty string under any of `names`
fn string_field<'a>(data: &'a Value, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| data.get(*name))
        .filter_map(Value::as_str)
        .find(|text| !text.trim().is_empty())
}

fn value_field<'a>(data: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| data.get(*name))
        .find(|value| !value.is_null())
}

/// Fetch and normalize the store billing configuration
///
/// Issues one GET to `endpoint` (default [`DEFAULT_CONFIG_ENDPOINT`]) and
/// normalizes each field independently. Both snake_case and camelCase field
/// names are accepted. Network and HTTP failures propagate; the caller is
/// responsible for fail-closed handling.
pub async fn get_store_config(
    client: &dyn ApiClient,
    endpoint: Option<&str>,
) -> Result<StoreAccessConfig> {
    let endpoint = endpoint.unwrap_or(DEFAULT_CONFIG_ENDPOINT);
    let body = client.get(endpoint).await?;
    let data = unwrap_envelope(&body);

    let config = StoreAccessConfig {
        billing_mode: BillingMode::from_raw(string_field(
            data,
            &["billing_mode", "billingMode"],
        )),
        retail_credit_price: normalize_retail_credit_price(value_field(
            data,
            &["retail_credit_price", "retailCreditPrice"],
        )),
        shop_domain: normalize_shop_domain(string_field(data, &["shop_domain", "shopDomain"])),
        shopify_variant_id: string_field(data, &["shopify_variant_id", "shopifyVariantId"])
            .map(str::to_string),
    };

    tracing::debug!(billing_mode = config.billing_mode.as_str(), "store config resolved");
    Ok(config)
}

/// Resolve the full access decision for the current store
pub async fn resolve_tryon_access(
    client: &dyn ApiClient,
    endpoint: Option<&str>,
) -> Result<AccessDecision> {
    let config = get_store_config(client, endpoint).await?;

    Ok(AccessDecision {
        require_login: should_require_login(config.billing_mode),
        retail_credit_price_label: retail_credit_price_label(
            config.billing_mode,
            config.retail_credit_price,
        ),
        billing_mode: config.billing_mode,
        retail_credit_price: config.retail_credit_price,
        shop_domain: config.shop_domain,
        shopify_variant_id: config.shopify_variant_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wearon_core::MockApiClient;

    #[test]
    fn test_billing_mode_fails_closed() {
        assert_eq!(BillingMode::from_raw(Some("absorb")), BillingMode::Absorb);
        assert_eq!(BillingMode::from_raw(Some("ABSORB_MODE")), BillingMode::Absorb);

        assert_eq!(BillingMode::from_raw(Some("resell_mode")), BillingMode::Resell);
        assert_eq!(BillingMode::from_raw(Some("free")), BillingMode::Resell);
        assert_eq!(BillingMode::from_raw(Some("")), BillingMode::Resell);
        assert_eq!(BillingMode::from_raw(None), BillingMode::Resell);
    }

    #[test]
    fn test_login_required_unless_absorb() {
        assert!(!should_require_login(BillingMode::Absorb));
        assert!(should_require_login(BillingMode::Resell));
    }

    #[test]
    fn test_price_label_formats_two_decimals() {
        assert_eq!(
            retail_credit_price_label(BillingMode::Resell, Some(dec!(1.25))),
            Some("$1.25 per credit".into())
        );
        assert_eq!(
            retail_credit_price_label(BillingMode::Resell, Some(dec!(0.5))),
            Some("$0.50 per credit".into())
        );
    }

    #[test]
    fn test_price_label_absent_for_absorb_or_invalid_price() {
        assert_eq!(retail_credit_price_label(BillingMode::Absorb, Some(dec!(1.25))), None);
        assert_eq!(retail_credit_price_label(BillingMode::Resell, None), None);
        assert_eq!(retail_credit_price_label(BillingMode::Resell, Some(dec!(0))), None);
    }

    #[test]
    fn test_shop_domain_normalization() {
        assert_eq!(
            normalize_shop_domain(Some("https://store.myshopify.com/")),
            Some("store.myshopify.com".into())
        );
        assert_eq!(
            normalize_shop_domain(Some("HTTP://store.myshopify.com//")),
            Some("store.myshopify.com".into())
        );
        assert_eq!(
            normalize_shop_domain(Some("store.myshopify.com")),
            Some("store.myshopify.com".into())
        );
        assert_eq!(normalize_shop_domain(Some("   ")), None);
        assert_eq!(normalize_shop_domain(Some("https://")), None);
        assert_eq!(normalize_shop_domain(None), None);
    }

    #[tokio::test]
    async fn test_resolves_access_from_default_endpoint() {
        let client = MockApiClient::new();
        client.push_response(json!({
            "data": { "data": {
                "billing_mode": "resell_mode",
                "retail_credit_price": 0.5,
                "shop_domain": "store.myshopify.com",
                "shopify_variant_id": "123456789",
            } }
        }));

        let access = resolve_tryon_access(&client, None).await.unwrap();

        assert_eq!(access.billing_mode, BillingMode::Resell);
        assert_eq!(access.retail_credit_price, Some(dec!(0.5)));
        assert_eq!(access.shop_domain, Some("store.myshopify.com".into()));
        assert_eq!(access.shopify_variant_id, Some("123456789".into()));
        assert!(access.require_login);
        assert_eq!(access.retail_credit_price_label, Some("$0.50 per credit".into()));
        assert_eq!(client.requests(), vec!["/api/v1/stores/config"]);
    }

    #[tokio::test]
    async fn test_garbage_config_normalizes_fail_safe() {
        let client = MockApiClient::new();
        client.push_response(json!({
            "billing_mode": "whatever",
            "retail_credit_price": -3,
            "shop_domain": "",
        }));

        let config = get_store_config(&client, None).await.unwrap();

        assert_eq!(config.billing_mode, BillingMode::Resell);
        assert_eq!(config.retail_credit_price, None);
        assert_eq!(config.shop_domain, None);
        assert_eq!(config.shopify_variant_id, None);
    }

    #[tokio::test]
    async fn test_accepts_camel_case_field_names() {
        let client = MockApiClient::new();
        client.push_response(json!({
            "data": {
                "billingMode": "absorb",
                "retailCreditPrice": "2.00",
                "shopDomain": "https://shop.example.com",
                "shopifyVariantId": "42",
            }
        }));

        let access = resolve_tryon_access(&client, Some("/custom/config")).await.unwrap();

        assert_eq!(access.billing_mode, BillingMode::Absorb);
        assert_eq!(access.retail_credit_price, Some(dec!(2.00)));
        assert_eq!(access.shop_domain, Some("shop.example.com".into()));
        assert!(!access.require_login);
        assert_eq!(access.retail_credit_price_label, None);
        assert_eq!(client.requests(), vec!["/custom/config"]);
    }

    #[tokio::test]
    async fn test_client_failure_propagates() {
        let client = MockApiClient::new();
        client.push_error("connection refused");

        assert!(resolve_tryon_access(&client, None).await.is_err());
    }
}
