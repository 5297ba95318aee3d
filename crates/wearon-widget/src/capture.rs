//! Capture Pipeline
//!
//! Produces a still JPEG data URL from a live video source and a drawing
//! surface, plus the static pose-guidance overlay shown during a camera
//! session.

use wearon_core::{ElementFactory, UiElement};

use crate::error::{Result, WidgetError};

/// Guidance text rendered inside the pose overlay
pub const POSE_GUIDANCE_TEXT: &str = "Align your face and shoulders inside the outline.";

/// CSS class of the pose overlay element
pub const POSE_OVERLAY_CLASS: &str = "wearon-widget__pose-overlay";

/// Live video frame source (`<video>` seam)
pub trait VideoSource {
    /// Native frame width; 0 while the stream is not ready
    fn video_width(&self) -> u32;

    /// Native frame height; 0 while the stream is not ready
    fn video_height(&self) -> u32;
}

/// Drawing surface (`<canvas>` seam)
pub trait DrawSurface {
    /// Whether a 2D drawing context is available
    fn has_2d_context(&self) -> bool;

    /// Resize the surface
    fn set_size(&mut self, width: u32, height: u32);

    /// Draw one frame of `video` onto the surface
    fn draw_frame(&mut self, video: &dyn VideoSource);

    /// Export the surface contents as a JPEG data URL
    fn export_jpeg(&self) -> Option<String>;
}

/// Capture one still frame as a JPEG data URL
///
/// Synchronous and idempotent for a ready, unchanged frame. Fails before
/// any drawing happens when the surface has no 2D context or the video
/// reports zero dimensions ([`WidgetError::CaptureNotReady`], retryable).
pub fn capture_photo(video: &dyn VideoSource, surface: &mut dyn DrawSurface) -> Result<String> {
    if !surface.has_2d_context() {
        return Err(WidgetError::Config("Canvas 2D context is unavailable".into()));
    }

    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(WidgetError::CaptureNotReady);
    }

    surface.set_size(width, height);
    surface.draw_frame(video);

    surface
        .export_jpeg()
        .ok_or_else(|| WidgetError::Config("Surface cannot export image data".into()))
}

/// Build the static pose-guidance overlay element
///
/// Fails when no element-creation capability is supplied.
pub fn create_pose_overlay(factory: Option<&dyn ElementFactory>) -> Result<UiElement> {
    let factory = factory
        .ok_or_else(|| WidgetError::Config("An element factory is required".into()))?;

    let mut overlay = factory.create_element("div");
    overlay.class_name = POSE_OVERLAY_CLASS.to_string();
    overlay.text_content = POSE_GUIDANCE_TEXT.to_string();
    Ok(overlay)
}
