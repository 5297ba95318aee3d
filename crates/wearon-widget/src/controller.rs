//! Try-On Widget Controller
//!
//! Composes the privacy gate, store access resolution, credit gate, camera
//! session, and capture pipeline into one stateful component. The controller
//! owns [`WidgetRuntimeState`] exclusively and keeps the surface (button
//! label, enablement, live-region text) consistent with it at every
//! transition.
//!
//! Failure policy: capability-contract violations surface as errors and
//! abort initialization; remote-data failures never reach the shopper as
//! errors — the controller degrades to the most restrictive state (require
//! login) and posts a readable status to the live region.

use std::sync::Arc;
use std::time::Duration;

use wearon_access::{
    BillingMode, CartLinkParams, PollOptions, build_credit_cart_link, get_shopper_credit_balance,
    is_acknowledged, open_credit_checkout, poll_shopper_credit_balance, resolve_tryon_access,
};
use wearon_core::{
    ApiClient, CameraConstraints, CameraDevice, Delay, MediaStream, SessionStore,
    SpeechSynthesizer, TokioDelay, WindowOpener,
};

use crate::capture::{DrawSurface, POSE_GUIDANCE_TEXT, VideoSource, capture_photo};
use crate::error::{Result, WidgetError};
use crate::state::{WidgetPhase, WidgetRuntimeState};
use crate::surface::WidgetSurface;

const CAPTURE_SPEECH_CUE: &str = "Photo captured.";

/// Labels, endpoints, and timings for one widget instance
#[derive(Clone, Debug)]
pub struct WidgetOptions {
    /// Resting label of the primary button
    pub button_text: String,

    /// Label while the camera stream is being acquired
    pub loading_text: String,

    /// Label when the shopper must sign in
    pub sign_in_text: String,

    /// Label when the shopper must purchase credits
    pub buy_credits_text: String,

    /// Store-config endpoint override
    pub config_endpoint: Option<String>,

    /// Shopper-balance endpoint override
    pub balance_endpoint: Option<String>,

    /// Pause before the primary button resets after a camera request
    pub loading_delay: Duration,

    /// Credits added to the cart per purchase click
    pub checkout_quantity: u32,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            button_text: "Try On".into(),
            loading_text: "Loading...".into(),
            sign_in_text: "Sign in to try on".into(),
            buy_credits_text: "Buy credits".into(),
            config_endpoint: None,
            balance_endpoint: None,
            loading_delay: Duration::from_millis(700),
            checkout_quantity: 1,
        }
    }
}

/// Callback invoked with the captured photo data URL
pub type CaptureCallback = Box<dyn Fn(&str) + Send>;

/// The try-on widget controller
///
/// Capabilities are injected at construction; any of them may be absent,
/// and the controller degrades per the access rules rather than reaching
/// for ambient globals. With no API client at all the widget behaves as a
/// zero-config absorb-mode embed with no login requirement.
pub struct TryOnWidget<S: WidgetSurface> {
    options: WidgetOptions,
    surface: S,
    api: Option<Arc<dyn ApiClient>>,
    session: Option<Arc<dyn SessionStore>>,
    camera: Option<Arc<dyn CameraDevice>>,
    window: Option<Arc<dyn WindowOpener>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    delay: Arc<dyn Delay>,
    on_capture: Option<CaptureCallback>,
    state: WidgetRuntimeState,
    active_stream: Option<Arc<dyn MediaStream>>,
}

impl<S: WidgetSurface> TryOnWidget<S> {
    pub fn new(surface: S, options: WidgetOptions) -> Self {
        Self {
            options,
            surface,
            api: None,
            session: None,
            camera: None,
            window: None,
            speech: None,
            delay: Arc::new(TokioDelay),
            on_capture: None,
            state: WidgetRuntimeState::new(),
            active_stream: None,
        }
    }

    pub fn with_api_client(mut self, api: Arc<dyn ApiClient>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_camera(mut self, camera: Arc<dyn CameraDevice>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_window(mut self, window: Arc<dyn WindowOpener>) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_capture_callback(mut self, callback: CaptureCallback) -> Self {
        self.on_capture = Some(callback);
        self
    }

    /// Current runtime state (read-only)
    pub fn state(&self) -> &WidgetRuntimeState {
        &self.state
    }

    /// The host surface (for assertions and adapter access)
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Initial render plus asynchronous access resolution
    ///
    /// A prior acknowledgment in the session store opens the privacy gate
    /// immediately. With an API client present, billing mode and login
    /// requirement come from the config endpoint; in resell mode an initial
    /// balance fetch follows, and its failure degrades to require-login. A
    /// failed resolution also fails closed with a status announcement.
    pub async fn mount(&mut self) {
        self.state.privacy_acknowledged = is_acknowledged(self.session.as_deref());
        self.surface.set_privacy_gate_visible(!self.state.privacy_acknowledged);
        self.surface.set_audio_toggle(false, "Audio guidance off");
        self.apply_gate_phase();
        self.refresh_primary_button();

        let Some(api) = self.api.clone() else {
            return;
        };

        self.state.phase = WidgetPhase::AccessPending;
        match resolve_tryon_access(api.as_ref(), self.options.config_endpoint.as_deref()).await {
            Ok(access) => {
                self.state.billing_mode = access.billing_mode;
                self.state.require_login = access.require_login;
                self.surface.set_price_label(access.retail_credit_price_label.as_deref());
                let metered = access.billing_mode == BillingMode::Resell;
                self.state.current_access = Some(access);

                if metered {
                    self.fetch_initial_balance(api.as_ref()).await;
                }
                self.apply_gate_phase();
            }
            Err(error) => {
                tracing::warn!(error = %error, "access resolution failed, requiring login");
                self.state.require_login = true;
                self.state.phase = WidgetPhase::LoginRequired;
                self.surface.announce("Unable to load store configuration.");
            }
        }

        self.refresh_primary_button();
    }

    /// In resell mode a readable balance doubles as the login probe: the
    /// endpoint only answers for a signed-in shopper.
    async fn fetch_initial_balance(&mut self, api: &dyn ApiClient) {
        match get_shopper_credit_balance(api, self.options.balance_endpoint.as_deref()).await {
            Ok(balance) => {
                self.state.require_login = false;
                self.surface.set_balance_text(&balance_text(balance.balance));
                self.state.shopper_balance = Some(balance);
            }
            Err(error) => {
                tracing::warn!(error = %error, "balance fetch failed, requiring login");
                self.state.require_login = true;
                self.surface.announce("Sign in to use virtual try-on.");
            }
        }
    }

    /// Acknowledge the privacy disclosure and open the gate
    pub fn acknowledge_privacy(&mut self) {
        wearon_access::acknowledge_privacy(self.session.as_deref());
        self.state.privacy_acknowledged = true;
        self.surface.set_privacy_gate_visible(false);
        self.apply_gate_phase();
        self.refresh_primary_button();
        self.surface.announce("Privacy notice acknowledged.");
    }

    /// Primary action: open the camera
    ///
    /// A no-op with an announcement while login or the privacy gate blocks.
    pub async fn primary_action(&mut self) {
        if self.state.require_login {
            self.surface.announce("Sign in to use virtual try-on.");
            return;
        }

        if !self.state.privacy_acknowledged {
            self.surface.announce("Please acknowledge the privacy notice first.");
            return;
        }

        let Some(camera) = self.camera.clone() else {
            self.surface.announce("Camera access is not supported in this environment.");
            return;
        };

        self.state.phase = WidgetPhase::CameraOpening;
        self.surface.set_primary_label(&self.options.loading_text);
        self.surface.set_primary_enabled(false);

        let epoch = self.state.begin_camera_epoch();
        match camera.acquire(&CameraConstraints::default()).await {
            Ok(stream) => {
                if !self.state.camera_epoch_current(epoch) {
                    // The session was closed while acquisition was in
                    // flight; a stale stream must not resurrect the UI.
                    stream.stop_all();
                    return;
                }

                tracing::debug!(stream_id = stream.id(), "camera stream acquired");
                self.active_stream = Some(stream);
                self.state.phase = WidgetPhase::CameraActive;
                self.surface.set_camera_visible(true);
                self.surface.set_overlay_active(true);
                self.surface.announce("Camera ready. Position yourself in the frame.");
                self.speak(POSE_GUIDANCE_TEXT);
            }
            Err(error) => {
                tracing::warn!(error = %error, "camera acquisition failed");
                if self.state.camera_epoch_current(epoch) {
                    self.state.phase = WidgetPhase::Ready;
                    self.apply_gate_phase();
                    self.surface.announce("Unable to open the camera.");
                }
            }
        }

        self.delay.wait(self.options.loading_delay).await;
        self.refresh_primary_button();
    }

    /// Purchase action for resell mode
    ///
    /// Opens the cart deeplink, announces the round-trip, and polls for the
    /// updated balance. Poll failure fails quiet with an announcement.
    pub async fn purchase_credits(&mut self) {
        let params = self
            .state
            .current_access
            .as_ref()
            .map(|access| CartLinkParams {
                shop_domain: access.shop_domain.clone(),
                shopify_variant_id: access.shopify_variant_id.clone(),
                quantity: self.options.checkout_quantity,
            })
            .unwrap_or_default();

        let link = build_credit_cart_link(&params);
        if !open_credit_checkout(link.as_deref(), self.window.as_deref()) {
            self.surface.announce("Unable to open checkout.");
            return;
        }

        self.surface.announce("Checking for updated credits...");

        let Some(api) = self.api.clone() else {
            return;
        };

        let poll = PollOptions {
            endpoint: self.options.balance_endpoint.clone(),
            delay: self.delay.clone(),
            ..PollOptions::default()
        };

        match poll_shopper_credit_balance(api.as_ref(), &poll).await {
            Ok(balance) => {
                let updated = balance.balance > 0;
                self.surface.set_balance_text(&balance_text(balance.balance));
                self.state.shopper_balance = Some(balance);
                self.apply_gate_phase();
                self.refresh_primary_button();
                self.surface.announce(if updated {
                    "Credits updated."
                } else {
                    "Credits are not available yet. Please check again shortly."
                });
            }
            Err(error) => {
                tracing::warn!(error = %error, "balance poll failed");
                self.surface.announce("Unable to refresh credit balance.");
            }
        }
    }

    /// Capture a still frame from the active camera session
    ///
    /// Announces, speaks the capture cue when audio guidance is on, and
    /// invokes the external capture callback. Does not close the camera.
    pub fn capture_still(
        &mut self,
        video: &dyn VideoSource,
        draw: &mut dyn DrawSurface,
    ) -> Result<String> {
        if self.state.phase != WidgetPhase::CameraActive {
            return Err(WidgetError::CameraInactive);
        }

        let photo = capture_photo(video, draw)?;
        self.state.latest_captured_photo = Some(photo.clone());
        self.surface.announce("Photo captured.");
        self.speak(CAPTURE_SPEECH_CUE);

        if let Some(callback) = &self.on_capture {
            callback(&photo);
        }

        Ok(photo)
    }

    /// Escape key: the only cancellation path for a camera session
    pub fn handle_escape(&mut self) {
        if !self.state.camera_session_open() {
            return;
        }

        self.close_camera();
    }

    fn close_camera(&mut self) {
        self.state.invalidate_camera_epoch();

        if let Some(stream) = self.active_stream.take() {
            stream.stop_all();
        }

        self.surface.set_overlay_active(false);
        self.surface.set_camera_visible(false);
        self.state.phase = WidgetPhase::Ready;
        self.apply_gate_phase();
        self.refresh_primary_button();
        self.surface.announce("Camera closed.");
    }

    /// Flip audio guidance; speech itself only happens at the camera-open
    /// and capture cues.
    pub fn toggle_audio_guidance(&mut self) {
        self.state.audio_guidance_enabled = !self.state.audio_guidance_enabled;

        let label = if self.state.audio_guidance_enabled {
            "Audio guidance on"
        } else {
            "Audio guidance off"
        };
        self.surface.set_audio_toggle(self.state.audio_guidance_enabled, label);
        self.surface.announce(&format!("{label}."));
    }

    /// Relay an external generation-pipeline status to the live region
    pub fn announce_generation_status(&mut self, status: &str) {
        self.surface.announce(&format!("Generation {status}."));
    }

    fn speak(&self, text: &str) {
        if !self.state.audio_guidance_enabled {
            return;
        }

        if let Some(speech) = &self.speech {
            speech.speak(text);
        }
    }

    fn apply_gate_phase(&mut self) {
        if self.state.camera_session_open() {
            return;
        }

        self.state.phase = if self.state.require_login {
            WidgetPhase::LoginRequired
        } else if self.state.credit_gated() {
            WidgetPhase::CreditGated
        } else if !self.state.privacy_acknowledged {
            WidgetPhase::PrivacyGated
        } else {
            WidgetPhase::Ready
        };
    }

    /// Label/enablement precedence: login, then credit gate, then the
    /// default label enabled iff the privacy gate is open.
    fn refresh_primary_button(&mut self) {
        if self.state.require_login {
            self.surface.set_primary_label(&self.options.sign_in_text);
            self.surface.set_primary_enabled(true);
        } else if self.state.credit_gated() {
            self.surface.set_primary_label(&self.options.buy_credits_text);
            self.surface.set_primary_enabled(true);
        } else {
            self.surface.set_primary_label(&self.options.button_text);
            self.surface.set_primary_enabled(self.state.privacy_acknowledged);
        }
    }
}

fn balance_text(balance: u64) -> String {
    if balance == 1 {
        "1 credit available".into()
    } else {
        format!("{balance} credits available")
    }
}
