//! Speech Capability
//!
//! Best-effort audio guidance side channel. Integrations without speech
//! synthesis simply don't supply one.

use std::sync::Mutex;

/// Text-to-speech capability
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str);
}

/// Synthesizer that records spoken phrases
///
/// For testing and demo purposes.
#[derive(Default)]
pub struct RecordingSpeechSynthesizer {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeechSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for RecordingSpeechSynthesizer {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}
