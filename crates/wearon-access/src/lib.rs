//! # wearon-access
//!
//! Billing, credit, and session-gate services for the WearOn try-on widget.
//!
//! Four concerns, all fail-safe toward the stricter state:
//!
//! - **Privacy & age gates** — per-session consent flags in the injected
//!   session store; the age flag expires after 24 hours.
//! - **Store access resolution** — one GET to the store-config endpoint,
//!   normalized field by field; unrecognized billing modes resolve to
//!   credit-metered (login required), never to free.
//! - **Credit balance** — reads the shopper ledger (tolerating two
//!   historical payload key schemes) and polls it, bounded, after checkout.
//! - **Checkout link** — builds and opens the direct cart deeplink for the
//!   store's credit product.
//!
//! Remote failures propagate to the orchestration layer, which degrades to
//! the most restrictive UI state rather than surfacing errors to shoppers.

pub mod checkout;
pub mod config;
pub mod credits;
pub mod error;
pub mod privacy;

pub use checkout::{CartLinkParams, build_credit_cart_link, open_credit_checkout};
pub use config::{
    AccessDecision, BillingMode, DEFAULT_CONFIG_ENDPOINT, StoreAccessConfig, get_store_config,
    normalize_shop_domain, resolve_tryon_access, retail_credit_price_label, should_require_login,
};
pub use credits::{
    DEFAULT_SHOPPER_BALANCE_ENDPOINT, PollOptions, ShopperCreditBalance,
    get_shopper_credit_balance, poll_shopper_credit_balance,
};
pub use error::{AccessError, Result};
pub use privacy::{acknowledge_privacy, is_acknowledged, is_age_verified, set_age_verified};
