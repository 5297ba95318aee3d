//! Session Privacy & Age Gates
//!
//! Per-session consent flags backed by the injected session store. The
//! privacy acknowledgment lives for the whole browser session; the age
//! verification additionally carries a timestamp and expires after 24 hours
//! so a stale or tampered flag can never unlock the gate.

use wearon_core::{Clock, SessionStore};

const PRIVACY_ACK_KEY: &str = "wearon_privacy_ack_v1";
const AGE_VERIFIED_KEY: &str = "wearon_age_verified_v1";
const AGE_VERIFIED_TIMESTAMP_KEY: &str = "wearon_age_verified_ts_v1";
const MAX_AGE_VERIFICATION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Check whether the privacy disclosure was acknowledged this session
///
/// `false` when no store capability is supplied; never errors.
pub fn is_acknowledged(store: Option<&dyn SessionStore>) -> bool {
    let Some(store) = store else {
        return false;
    };

    store.get_item(PRIVACY_ACK_KEY).as_deref() == Some("true")
}

/// Record the privacy acknowledgment for this session
///
/// Idempotent. Returns `false` (no-op) when no store capability is supplied.
pub fn acknowledge_privacy(store: Option<&dyn SessionStore>) -> bool {
    let Some(store) = store else {
        return false;
    };

    store.set_item(PRIVACY_ACK_KEY, "true");
    true
}

/// Check whether age verification is present, untampered, and unexpired
///
/// A verification without a timestamp, with a non-numeric or negative
/// timestamp, dated in the future, or older than 24 hours is invalid; the
/// stale keys are cleared so the shopper is re-prompted.
pub fn is_age_verified(store: Option<&dyn SessionStore>, clock: &dyn Clock) -> bool {
    let Some(store) = store else {
        return false;
    };

    if store.get_item(AGE_VERIFIED_KEY).as_deref() != Some("true") {
        return false;
    }

    let Some(raw_timestamp) = store.get_item(AGE_VERIFIED_TIMESTAMP_KEY) else {
        store.remove_item(AGE_VERIFIED_KEY);
        return false;
    };

    let Ok(timestamp) = raw_timestamp.parse::<i64>() else {
        store.remove_item(AGE_VERIFIED_KEY);
        store.remove_item(AGE_VERIFIED_TIMESTAMP_KEY);
        return false;
    };

    if timestamp < 0 {
        store.remove_item(AGE_VERIFIED_KEY);
        store.remove_item(AGE_VERIFIED_TIMESTAMP_KEY);
        return false;
    }

    let age = clock.now_ms() - timestamp;
    if age < 0 || age > MAX_AGE_VERIFICATION_DURATION_MS {
        tracing::debug!(age_ms = age, "age verification invalid, clearing");
        store.remove_item(AGE_VERIFIED_KEY);
        store.remove_item(AGE_VERIFIED_TIMESTAMP_KEY);
        return false;
    }

    true
}

/// Record age verification with the current timestamp
pub fn set_age_verified(store: Option<&dyn SessionStore>, clock: &dyn Clock) -> bool {
    let Some(store) = store else {
        return false;
    };

    store.set_item(AGE_VERIFIED_KEY, "true");
    store.set_item(AGE_VERIFIED_TIMESTAMP_KEY, &clock.now_ms().to_string());
    true
}
