//! Size Recommendation Presentation
//!
//! Turns a raw fit-model output into shopper-facing copy. High-confidence
//! results get a definitive recommendation; everything else falls back to a
//! size range. All size strings are sanitized before display.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};

/// Confidence at or above which the recommendation is definitive
pub const CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Disclaimer shown under every recommendation
pub const SIZE_REC_DISCLAIMER: &str =
    "This is a suggestion based on your measurements, not a guarantee";

const FALLBACK_LOWER: &str = "M";
const FALLBACK_UPPER: &str = "L";
const MAX_SIZE_LEN: usize = 10;

/// Inclusive size range
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub lower: String,
    pub upper: String,
}

/// Raw fit-model output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SizeRecInput {
    pub recommended_size: Option<String>,

    /// 0.0 to 1.0; out-of-range values are clamped
    pub confidence: f64,

    pub size_range: Option<SizeRange>,
}

/// Shopper-facing presentation of a size recommendation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecPresentation {
    pub primary_text: String,
    pub secondary_text: Option<String>,
    pub confidence_percent: u8,
    pub disclaimer: String,
    pub is_definitive: bool,
}

/// Uppercase, trim, and validate a size string
///
/// Only alphanumeric sizes up to 10 characters survive; anything else is
/// dropped rather than rendered.
fn sanitize_size(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().to_ascii_uppercase();
    if trimmed.is_empty() || trimmed.len() > MAX_SIZE_LEN {
        return None;
    }

    if !trimmed.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return None;
    }

    Some(trimmed)
}

/// Build the presentation for a size recommendation
///
/// Errors on non-finite confidence, and on a missing/invalid recommended
/// size when confidence clears [`CONFIDENCE_THRESHOLD`]. A partial or
/// invalid range falls back to `M`–`L`.
pub fn size_rec_presentation(input: &SizeRecInput) -> Result<SizeRecPresentation> {
    if !input.confidence.is_finite() {
        return Err(WidgetError::InvalidSizeRec(
            "confidence must be a finite number".into(),
        ));
    }

    let confidence = input.confidence.clamp(0.0, 1.0);
    let confidence_percent = (confidence * 100.0).round() as u8;

    let recommended = sanitize_size(input.recommended_size.as_deref());
    let lower = sanitize_size(input.size_range.as_ref().map(|r| r.lower.as_str()));
    let upper = sanitize_size(input.size_range.as_ref().map(|r| r.upper.as_str()));

    if confidence >= CONFIDENCE_THRESHOLD {
        let size = recommended.ok_or_else(|| {
            WidgetError::InvalidSizeRec("recommended size must be alphanumeric (1-10 chars)".into())
        })?;

        return Ok(SizeRecPresentation {
            primary_text: format!("Recommended: {size}"),
            secondary_text: None,
            confidence_percent,
            disclaimer: SIZE_REC_DISCLAIMER.to_string(),
            is_definitive: true,
        });
    }

    let (lower, upper) = match (lower, upper) {
        (Some(lower), Some(upper)) => (lower, upper),
        _ => (FALLBACK_LOWER.to_string(), FALLBACK_UPPER.to_string()),
    };

    Ok(SizeRecPresentation {
        primary_text: format!("Between {lower} and {upper}"),
        secondary_text: Some(format!("Confidence: {confidence_percent}%")),
        confidence_percent,
        disclaimer: SIZE_REC_DISCLAIMER.to_string(),
        is_definitive: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(size: Option<&str>, confidence: f64, range: Option<(&str, &str)>) -> SizeRecInput {
        SizeRecInput {
            recommended_size: size.map(Into::into),
            confidence,
            size_range: range.map(|(lower, upper)| SizeRange {
                lower: lower.into(),
                upper: upper.into(),
            }),
        }
    }

    #[test]
    fn test_high_confidence_is_definitive() {
        let presentation = size_rec_presentation(&input(Some("m"), 0.92, None)).unwrap();

        assert_eq!(presentation.primary_text, "Recommended: M");
        assert_eq!(presentation.secondary_text, None);
        assert_eq!(presentation.confidence_percent, 92);
        assert!(presentation.is_definitive);
        assert_eq!(presentation.disclaimer, SIZE_REC_DISCLAIMER);
    }

    #[test]
    fn test_low_confidence_shows_range() {
        let presentation =
            size_rec_presentation(&input(Some("M"), 0.6, Some(("s", "m")))).unwrap();

        assert_eq!(presentation.primary_text, "Between S and M");
        assert_eq!(presentation.secondary_text, Some("Confidence: 60%".into()));
        assert!(!presentation.is_definitive);
    }

    #[test]
    fn test_invalid_range_falls_back() {
        let presentation =
            size_rec_presentation(&input(None, 0.5, Some(("<img>", "L")))).unwrap();

        assert_eq!(presentation.primary_text, "Between M and L");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let presentation = size_rec_presentation(&input(Some("XL"), 3.0, None)).unwrap();
        assert_eq!(presentation.confidence_percent, 100);

        let presentation = size_rec_presentation(&input(None, -1.0, None)).unwrap();
        assert_eq!(presentation.confidence_percent, 0);
    }

    #[test]
    fn test_non_finite_confidence_errors() {
        assert!(size_rec_presentation(&input(Some("M"), f64::NAN, None)).is_err());
        assert!(size_rec_presentation(&input(Some("M"), f64::INFINITY, None)).is_err());
    }

    #[test]
    fn test_definitive_without_valid_size_errors() {
        assert!(size_rec_presentation(&input(None, 0.95, None)).is_err());
        assert!(size_rec_presentation(&input(Some("<script>"), 0.95, None)).is_err());
    }
}
