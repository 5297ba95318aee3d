//! Document & Window Capabilities
//!
//! Element creation and window opening are environment boundaries, not
//! rendering logic; the widget only ever needs these two seams.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// A created UI node, described as plain data
///
/// The browser adapter materializes this into a real DOM element; tests
/// assert on it directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub tag: String,
    pub class_name: String,
    pub text_content: String,
    pub attributes: HashMap<String, String>,
}

impl UiElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

/// Element-creation capability (`document.createElement` seam)
pub trait ElementFactory: Send + Sync {
    fn create_element(&self, tag: &str) -> UiElement;
}

/// Factory producing bare elements
#[derive(Default)]
pub struct BasicElementFactory;

impl ElementFactory for BasicElementFactory {
    fn create_element(&self, tag: &str) -> UiElement {
        UiElement::new(tag)
    }
}

/// Window-opening capability (`window.open` seam)
pub trait WindowOpener: Send + Sync {
    /// Open `url` in a new browsing context
    fn open(&self, url: &str, target: &str, features: &str);
}

/// Window opener that records every open call
///
/// For testing and demo purposes.
#[derive(Default)]
pub struct RecordingWindowOpener {
    opened: Mutex<Vec<(String, String, String)>>,
}

impl RecordingWindowOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<(String, String, String)> {
        self.opened.lock().unwrap().clone()
    }
}

impl WindowOpener for RecordingWindowOpener {
    fn open(&self, url: &str, target: &str, features: &str) {
        self.opened
            .lock()
            .unwrap()
            .push((url.to_string(), target.to_string(), features.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_bare_element() {
        let factory = BasicElementFactory;
        let element = factory.create_element("div");
        assert_eq!(element.tag, "div");
        assert!(element.class_name.is_empty());
    }

    #[test]
    fn test_recording_opener_captures_calls() {
        let opener = RecordingWindowOpener::new();
        opener.open("https://x.test/cart/1:1", "_blank", "noopener,noreferrer");

        let opened = opener.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].1, "_blank");
    }
}
