//! Camera & Media Capabilities
//!
//! Abstractions over `getUserMedia` and the streams it produces. The widget
//! controller owns the acquired stream for the lifetime of a camera session
//! and must stop every track on every exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which camera to prefer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    User,
    Environment,
}

/// Constraints passed to the camera acquisition capability
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConstraints {
    pub facing_mode: FacingMode,
    pub audio: bool,
}

impl Default for CameraConstraints {
    /// Front camera, no audio — the try-on capture configuration
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::User,
            audio: false,
        }
    }
}

/// A single track within a media stream
pub trait MediaTrack: Send + Sync {
    /// Stop the track and release the underlying device
    fn stop(&self);
}

/// A live media stream
pub trait MediaStream: Send + Sync {
    /// Stream identifier (for logging)
    fn id(&self) -> &str;

    /// All tracks carried by the stream
    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>>;

    /// Stop every track
    fn stop_all(&self) {
        for track in self.tracks() {
            track.stop();
        }
    }
}

/// Camera acquisition capability (`getUserMedia` seam)
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Request a live stream matching `constraints`
    async fn acquire(&self, constraints: &CameraConstraints) -> Result<Arc<dyn MediaStream>>;
}

/// Track that records whether it was stopped
///
/// For testing and demo purposes.
#[derive(Default)]
pub struct FakeMediaTrack {
    stopped: AtomicBool,
}

impl FakeMediaTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaTrack for FakeMediaTrack {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Stream over a fixed set of fake tracks
pub struct FakeMediaStream {
    id: String,
    tracks: Vec<Arc<FakeMediaTrack>>,
}

impl FakeMediaStream {
    pub fn new(id: impl Into<String>, track_count: usize) -> Self {
        Self {
            id: id.into(),
            tracks: (0..track_count)
                .map(|_| Arc::new(FakeMediaTrack::new()))
                .collect(),
        }
    }

    /// Typed access to the fake tracks for assertions
    pub fn fake_tracks(&self) -> &[Arc<FakeMediaTrack>] {
        &self.tracks
    }
}

impl MediaStream for FakeMediaStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>> {
        self.tracks
            .iter()
            .map(|t| Arc::clone(t) as Arc<dyn MediaTrack>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints_are_front_camera_no_audio() {
        let constraints = CameraConstraints::default();
        assert_eq!(constraints.facing_mode, FacingMode::User);
        assert!(!constraints.audio);
    }

    #[test]
    fn test_stop_all_stops_every_track() {
        let stream = FakeMediaStream::new("stream-1", 2);
        stream.stop_all();

        assert!(stream.fake_tracks().iter().all(|t| t.is_stopped()));
    }
}
