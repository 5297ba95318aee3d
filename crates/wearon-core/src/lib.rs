//! # wearon-core
//!
//! Capability traits and environment adapters for the WearOn virtual try-on
//! widget.
//!
//! The widget never reaches for an ambient global — every environment
//! boundary (HTTP API, session storage, camera, element creation, window
//! opening, speech, timers) is a narrow trait injected at construction.
//! Concrete adapters live here next to the traits:
//!
//! - [`ApiClient`] with the shared [`unwrap_envelope`] normalization and a
//!   `reqwest`-backed [`HttpApiClient`]
//! - [`SessionStore`] with [`MemorySessionStore`]
//! - [`CameraDevice`] / [`MediaStream`] / [`MediaTrack`]
//! - [`ElementFactory`] / [`WindowOpener`]
//! - [`SpeechSynthesizer`]
//! - [`Delay`] / [`Clock`] with tokio and system-clock adapters
//!
//! Test doubles (`MockApiClient`, `FakeMediaStream`, recording adapters)
//! ship alongside the traits so downstream crates share one set of fakes.

pub mod api;
pub mod error;
pub mod media;
pub mod speech;
pub mod storage;
pub mod time;
pub mod ui;

pub use api::{ApiClient, HttpApiClient, MockApiClient, unwrap_envelope};
pub use error::{ClientError, Result};
pub use media::{
    CameraConstraints, CameraDevice, FacingMode, FakeMediaStream, FakeMediaTrack, MediaStream,
    MediaTrack,
};
pub use speech::{RecordingSpeechSynthesizer, SpeechSynthesizer};
pub use storage::{MemorySessionStore, SessionStore};
pub use time::{Clock, Delay, FixedClock, RecordingDelay, SystemClock, TokioDelay};
pub use ui::{BasicElementFactory, ElementFactory, RecordingWindowOpener, UiElement, WindowOpener};
