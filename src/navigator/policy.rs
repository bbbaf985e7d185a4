//! Button policy and dot indicator, derived from `(index, page_count)`.

use serde::Serialize;

/// Where the current page sits in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// The only page: first and last at once.
    Only,
    /// First of several pages.
    First,
    /// Strictly between the first and last page.
    Middle,
    /// Last of several pages.
    Last,
}

impl Position {
    /// Classify `index` within a catalog of `page_count` pages.
    ///
    /// `page_count` must be at least one and `index` below it.
    #[must_use]
    pub const fn of(index: usize, page_count: usize) -> Self {
        let last = page_count.saturating_sub(1);
        match (index == 0, index == last) {
            (true, true) => Self::Only,
            (true, false) => Self::First,
            (false, true) => Self::Last,
            (false, false) => Self::Middle,
        }
    }

    /// Whether this position is the final page.
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Only | Self::Last)
    }
}

/// Label on the forward button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextLabel {
    /// Advances to the following page.
    Next,
    /// Completes onboarding.
    Finish,
}

impl NextLabel {
    /// Display text for the button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }
}

impl std::fmt::Display for NextLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Button state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonPolicy {
    /// Whether the back button is enabled
    pub back_enabled: bool,
    /// Forward button label
    pub next_label: NextLabel,
}

impl ButtonPolicy {
    /// Policy for a position.
    #[must_use]
    pub const fn for_position(position: Position) -> Self {
        let (back_enabled, next_label) = match position {
            Position::Only => (false, NextLabel::Finish),
            Position::First => (false, NextLabel::Next),
            Position::Middle => (true, NextLabel::Next),
            Position::Last => (true, NextLabel::Finish),
        };
        Self {
            back_enabled,
            next_label,
        }
    }

    /// Policy for `index` within a catalog of `page_count` pages.
    #[must_use]
    pub const fn derive(index: usize, page_count: usize) -> Self {
        Self::for_position(Position::of(index, page_count))
    }
}

/// Dot-position indicator: `count` dots with the `active` one highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DotIndicator {
    /// Number of dots (one per page)
    pub count: usize,
    /// Index of the highlighted dot
    pub active: usize,
}

impl DotIndicator {
    /// Indicator for `active` out of `count` pages.
    #[must_use]
    pub const fn new(active: usize, count: usize) -> Self {
        Self { count, active }
    }

    /// Per-dot highlight flags in page order.
    pub fn dots(self) -> impl Iterator<Item = bool> {
        (0..self.count).map(move |i| i == self.active)
    }

    /// Text rendering such as `○●○○○`.
    #[must_use]
    pub fn render(self) -> String {
        self.dots().map(|on| if on { '●' } else { '○' }).collect()
    }
}
