//! Events emitted to the presentation layer.

use super::policy::{ButtonPolicy, DotIndicator};
use crate::catalog::SlidePage;
use serde::Serialize;

/// Output of a navigator transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// Show the page at `index`.
    RenderPage {
        /// Page index
        index: usize,
        /// Page content
        page: SlidePage,
        /// Button state for this page
        policy: ButtonPolicy,
        /// Indicator state for this page
        dots: DotIndicator,
    },
    /// Onboarding is done; launch the main application.
    Redirect,
}

impl NavEvent {
    /// Page index for `RenderPage`, `None` for `Redirect`.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::RenderPage { index, .. } => Some(*index),
            Self::Redirect => None,
        }
    }

    /// Whether this is the hand-off to the main application.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect)
    }
}
