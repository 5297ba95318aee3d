//! Widget Surface
//!
//! The rendering seam the controller drives. A browser adapter maps these
//! calls onto shadow-DOM nodes; tests use the recording implementation.
//! `announce` feeds an `aria-live="polite"` region so assistive technology
//! hears every state change.

/// Rendering operations the controller needs from its host surface
pub trait WidgetSurface: Send {
    /// Label of the primary try-on button
    fn set_primary_label(&mut self, label: &str);

    /// Enablement of the primary try-on button
    fn set_primary_enabled(&mut self, enabled: bool);

    /// Show or hide the privacy disclosure gate
    fn set_privacy_gate_visible(&mut self, visible: bool);

    /// Show or hide the video and capture controls
    fn set_camera_visible(&mut self, visible: bool);

    /// Toggle the pose overlay's active state
    fn set_overlay_active(&mut self, active: bool);

    /// Shopper-facing balance text, e.g. `"2 credits available"`
    fn set_balance_text(&mut self, text: &str);

    /// Per-credit price label, or `None` to hide it
    fn set_price_label(&mut self, label: Option<&str>);

    /// Pressed state and label of the audio-guidance toggle
    fn set_audio_toggle(&mut self, pressed: bool, label: &str);

    /// Post a status message to the live region
    fn announce(&mut self, message: &str);
}

/// Surface that records every call
///
/// For testing and demo purposes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub primary_label: String,
    pub primary_enabled: bool,
    pub privacy_gate_visible: bool,
    pub camera_visible: bool,
    pub overlay_active: bool,
    pub balance_text: String,
    pub price_label: Option<String>,
    pub audio_pressed: bool,
    pub audio_label: String,
    pub announcements: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last live-region message, empty if none yet
    pub fn last_announcement(&self) -> &str {
        self.announcements.last().map_or("", String::as_str)
    }
}

impl WidgetSurface for RecordingSurface {
    fn set_primary_label(&mut self, label: &str) {
        self.primary_label = label.to_string();
    }

    fn set_primary_enabled(&mut self, enabled: bool) {
        self.primary_enabled = enabled;
    }

    fn set_privacy_gate_visible(&mut self, visible: bool) {
        self.privacy_gate_visible = visible;
    }

    fn set_camera_visible(&mut self, visible: bool) {
        self.camera_visible = visible;
    }

    fn set_overlay_active(&mut self, active: bool) {
        self.overlay_active = active;
    }

    fn set_balance_text(&mut self, text: &str) {
        self.balance_text = text.to_string();
    }

    fn set_price_label(&mut self, label: Option<&str>) {
        self.price_label = label.map(String::from);
    }

    fn set_audio_toggle(&mut self, pressed: bool, label: &str) {
        self.audio_pressed = pressed;
        self.audio_label = label.to_string();
    }

    fn announce(&mut self, message: &str) {
        self.announcements.push(message.to_string());
    }
}
