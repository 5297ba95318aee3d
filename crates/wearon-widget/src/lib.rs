//! # wearon-widget
//!
//! Try-on widget controller for WearOn storefront embeds.
//!
//! The controller composes the privacy gate, store access resolution,
//! credit gate, camera session, and capture pipeline into a single state
//! machine:
//!
//! ```text
//! PrivacyGated → AccessPending → {LoginRequired | CreditGated | Ready}
//!                                         → CameraOpening → CameraActive
//! ```
//!
//! Every environment boundary comes in as a `wearon-core` capability; the
//! rendering side is the [`WidgetSurface`] trait, which a browser adapter
//! maps onto shadow-DOM nodes and an `aria-live` status region. Remote
//! failures degrade to the most restrictive state (require login) with a
//! readable announcement; capability-contract violations error out loudly.

pub mod capture;
pub mod controller;
pub mod error;
pub mod size_rec;
pub mod state;
pub mod surface;

pub use capture::{
    DrawSurface, POSE_GUIDANCE_TEXT, POSE_OVERLAY_CLASS, VideoSource, capture_photo,
    create_pose_overlay,
};
pub use controller::{CaptureCallback, TryOnWidget, WidgetOptions};
pub use error::{Result, WidgetError};
pub use size_rec::{
    CONFIDENCE_THRESHOLD, SIZE_REC_DISCLAIMER, SizeRange, SizeRecInput, SizeRecPresentation,
    size_rec_presentation,
};
pub use state::{WidgetPhase, WidgetRuntimeState};
pub use surface::{RecordingSurface, WidgetSurface};
