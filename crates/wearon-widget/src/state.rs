//! Widget Runtime State
//!
//! All fields are owned and mutated exclusively by the controller in
//! response to discrete events; no other component touches them.

use wearon_access::{AccessDecision, BillingMode, ShopperCreditBalance};

/// Coarse phase of the widget state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetPhase {
    /// Privacy disclosure not yet acknowledged
    PrivacyGated,

    /// Access resolution in flight
    AccessPending,

    /// Shopper must sign in before anything else
    LoginRequired,

    /// Resell mode with zero balance; purchase required
    CreditGated,

    /// Gate open, camera not yet requested
    Ready,

    /// Camera stream acquisition in flight
    CameraOpening,

    /// Live camera session with capture UI visible
    CameraActive,
}

/// Mutable state behind the try-on widget controller
#[derive(Debug)]
pub struct WidgetRuntimeState {
    pub phase: WidgetPhase,
    pub privacy_acknowledged: bool,
    pub require_login: bool,
    pub billing_mode: BillingMode,
    pub shopper_balance: Option<ShopperCreditBalance>,
    pub current_access: Option<AccessDecision>,
    pub audio_guidance_enabled: bool,
    pub latest_captured_photo: Option<String>,

    /// Epoch of the current camera session. Bumped on every open attempt
    /// and on every close, so a stream that resolves for an older epoch is
    /// stale and must be stopped instead of applied.
    camera_epoch: u64,
}

impl Default for WidgetRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRuntimeState {
    pub fn new() -> Self {
        Self {
            phase: WidgetPhase::PrivacyGated,
            privacy_acknowledged: false,
            // Zero-config embeds behave as absorb mode with no login; the
            // stricter resell default applies once a config endpoint answers.
            require_login: false,
            billing_mode: BillingMode::Absorb,
            shopper_balance: None,
            current_access: None,
            audio_guidance_enabled: false,
            latest_captured_photo: None,
            camera_epoch: 0,
        }
    }

    /// Whether the credit gate applies: resell mode with a known-zero balance
    pub fn credit_gated(&self) -> bool {
        self.billing_mode == BillingMode::Resell
            && self
                .shopper_balance
                .as_ref()
                .is_some_and(|balance| balance.balance == 0)
    }

    /// Whether camera UI is (or is about to be) on screen
    pub fn camera_session_open(&self) -> bool {
        matches!(self.phase, WidgetPhase::CameraOpening | WidgetPhase::CameraActive)
    }

    /// Start a new camera session epoch and return it
    pub fn begin_camera_epoch(&mut self) -> u64 {
        self.camera_epoch += 1;
        self.camera_epoch
    }

    /// Invalidate any in-flight camera acquisition
    pub fn invalidate_camera_epoch(&mut self) {
        self.camera_epoch += 1;
    }

    /// Whether `epoch` still identifies the current camera session
    pub fn camera_epoch_current(&self, epoch: u64) -> bool {
        self.camera_epoch == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_permissive_absorb() {
        let state = WidgetRuntimeState::new();
        assert_eq!(state.phase, WidgetPhase::PrivacyGated);
        assert!(!state.require_login);
        assert_eq!(state.billing_mode, BillingMode::Absorb);
        assert!(!state.credit_gated());
    }

    #[test]
    fn test_credit_gate_needs_known_zero_balance() {
        let mut state = WidgetRuntimeState::new();
        state.billing_mode = BillingMode::Resell;

        // Unknown balance does not gate; only an observed zero does
        assert!(!state.credit_gated());

        state.shopper_balance = Some(ShopperCreditBalance::default());
        assert!(state.credit_gated());

        state.shopper_balance = Some(ShopperCreditBalance { balance: 2, ..Default::default() });
        assert!(!state.credit_gated());
    }

    #[test]
    fn test_stale_camera_epoch_is_detected() {
        let mut state = WidgetRuntimeState::new();

        let epoch = state.begin_camera_epoch();
        assert!(state.camera_epoch_current(epoch));

        // Closing (or re-opening) the session invalidates the old epoch
        state.invalidate_camera_epoch();
        assert!(!state.camera_epoch_current(epoch));
    }
}
