//! Two-icon toggle button.

use std::sync::{Arc, Mutex};

use crate::player::ToggleIcon;

/// Shows exactly one of two icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    primary: String,
    secondary: String,
    is_primary: bool,
}

/// Shared button; the controller flips it, the UI renders it.
pub type ToggleHandle = Arc<Mutex<ToggleButton>>;

impl ToggleButton {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>, is_primary: bool) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            is_primary,
        }
    }

    pub fn into_handle(self) -> ToggleHandle {
        Arc::new(Mutex::new(self))
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// The icon currently visible.
    pub fn visible(&self) -> &str {
        if self.is_primary {
            &self.primary
        } else {
            &self.secondary
        }
    }
}

impl ToggleIcon for ToggleButton {
    fn set_state(&mut self, primary: bool) {
        self.is_primary = primary;
    }

    fn toggle(&mut self) {
        self.is_primary = !self.is_primary;
    }
}

impl ToggleIcon for ToggleHandle {
    fn set_state(&mut self, primary: bool) {
        if let Ok(mut b) = self.lock() {
            b.set_state(primary);
        }
    }

    fn toggle(&mut self) {
        if let Ok(mut b) = self.lock() {
            b.toggle();
        }
    }
}
