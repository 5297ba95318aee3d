//! Checkout Link Builder
//!
//! Constructs the direct cart deeplink for the store's credit product and
//! opens it in a new, unreferenced browsing context. Payment itself happens
//! entirely on the external checkout.

use serde::{Deserialize, Serialize};

use wearon_core::WindowOpener;

use crate::config::normalize_shop_domain;

/// Inputs for [`build_credit_cart_link`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLinkParams {
    pub shop_domain: Option<String>,
    pub shopify_variant_id: Option<String>,

    /// Credits to add to the cart; 0 is clamped to 1
    pub quantity: u32,
}

/// Build the direct cart deeplink, `https://<host>/cart/<variant>:<qty>`
///
/// `None` unless the shop domain normalizes to a non-empty hostname and the
/// variant id is a non-empty string of digits.
pub fn build_credit_cart_link(params: &CartLinkParams) -> Option<String> {
    let host = normalize_shop_domain(params.shop_domain.as_deref())?;

    let variant = params.shopify_variant_id.as_deref().map(str::trim)?;
    if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let quantity = params.quantity.max(1);
    Some(format!("https://{host}/cart/{variant}:{quantity}"))
}

/// Open the cart link in a new tab with no opener or referrer
///
/// Returns `false` (no-op) when no window capability or no link is supplied.
pub fn open_credit_checkout(cart_link: Option<&str>, window: Option<&dyn WindowOpener>) -> bool {
    let (Some(link), Some(window)) = (cart_link, window) else {
        return false;
    };

    window.open(link, "_blank", "noopener,noreferrer");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use wearon_core::RecordingWindowOpener;

    fn params(domain: &str, variant: &str, quantity: u32) -> CartLinkParams {
        CartLinkParams {
            shop_domain: Some(domain.into()),
            shopify_variant_id: Some(variant.into()),
            quantity,
        }
    }

    #[test]
    fn test_builds_cart_link() {
        assert_eq!(
            build_credit_cart_link(&params("https://store.myshopify.com/", "987654321", 3)),
            Some("https://store.myshopify.com/cart/987654321:3".into())
        );
    }

    #[test]
    fn test_quantity_clamps_to_one() {
        assert_eq!(
            build_credit_cart_link(&params("store.myshopify.com", "1", 0)),
            Some("https://store.myshopify.com/cart/1:1".into())
        );
    }

    #[test]
    fn test_rejects_non_digit_variant() {
        assert_eq!(build_credit_cart_link(&params("store.myshopify.com", "12a45", 1)), None);
        assert_eq!(build_credit_cart_link(&params("store.myshopify.com", "", 1)), None);
        assert_eq!(
            build_credit_cart_link(&CartLinkParams {
                shop_domain: Some("store.myshopify.com".into()),
                shopify_variant_id: None,
                quantity: 1,
            }),
            None
        );
    }

    #[test]
    fn test_rejects_empty_domain() {
        assert_eq!(build_credit_cart_link(&params("https:///", "123", 1)), None);
        assert_eq!(build_credit_cart_link(&params("  ", "123", 1)), None);
    }

    #[test]
    fn test_open_checkout_uses_noopener_new_tab() {
        let opener = RecordingWindowOpener::new();
        let opened =
            open_credit_checkout(Some("https://store.myshopify.com/cart/123:1"), Some(&opener));

        assert!(opened);
        assert_eq!(
            opener.opened(),
            vec![(
                "https://store.myshopify.com/cart/123:1".to_string(),
                "_blank".to_string(),
                "noopener,noreferrer".to_string()
            )]
        );
    }

    #[test]
    fn test_open_checkout_without_capability_is_noop() {
        assert!(!open_credit_checkout(Some("https://x.test/cart/1:1"), None));

        let opener = RecordingWindowOpener::new();
        assert!(!open_credit_checkout(None, Some(&opener)));
        assert!(opener.opened().is_empty());
    }
}
