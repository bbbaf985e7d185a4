//! Inputs delivered by the presentation layer.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A button tap or gesture routed into the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward button
    Next,
    /// Back button
    Back,
    /// Close/skip button
    Skip,
    /// Swipe to the page at the given index
    PageChanged(usize),
}

impl FromStr for Input {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "next" | "n" => Ok(Self::Next),
            "back" | "b" => Ok(Self::Back),
            "skip" | "s" => Ok(Self::Skip),
            _ => token
                .strip_prefix("page=")
                .and_then(|index| index.parse().ok())
                .map(Self::PageChanged)
                .ok_or_else(|| Error::InvalidInput(s.to_string())),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Back => f.write_str("back"),
            Self::Skip => f.write_str("skip"),
            Self::PageChanged(index) => write!(f, "page={index}"),
        }
    }
}
