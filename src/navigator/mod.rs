//! Onboarding navigator
//!
//! Drives a walk over the [`SlideCatalog`] and gates entry into the main
//! application behind the persisted completion flag. Every transition runs
//! synchronously to completion and yields at most one [`NavEvent`].

mod event;
mod policy;

pub use event::NavEvent;
pub use policy::{ButtonPolicy, DotIndicator, NextLabel, Position};

use crate::catalog::{SlideCatalog, SlidePage};
use crate::error::Result;
use crate::input::Input;
use crate::store::{DEFAULT_FLAG_KEY, FlagStore};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Mutable onboarding state, owned by the [`Navigator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingState {
    /// Index of the page on screen, always below the catalog's page count
    pub current_index: usize,
    /// Whether the completion flag has been read as set or durably written
    pub completed: bool,
}

/// First-run onboarding controller.
#[derive(Debug)]
pub struct Navigator<S> {
    catalog: SlideCatalog,
    store: S,
    flag_key: String,
    state: OnboardingState,
}

impl<S: FlagStore> Navigator<S> {
    /// Start onboarding using the default flag key.
    ///
    /// See [`Navigator::initialize_with_key`].
    #[must_use]
    pub fn initialize(catalog: SlideCatalog, store: S) -> (Self, NavEvent) {
        Self::initialize_with_key(catalog, store, DEFAULT_FLAG_KEY)
    }

    /// Start onboarding, reading the completion flag stored under `flag_key`.
    ///
    /// Returns the navigator with its first event: `Redirect` if onboarding was
    /// already completed, otherwise `RenderPage` for page 0. A store that
    /// cannot be read counts as not completed.
    #[must_use]
    pub fn initialize_with_key(
        catalog: SlideCatalog,
        store: S,
        flag_key: impl Into<String>,
    ) -> (Self, NavEvent) {
        let flag_key = flag_key.into();
        let completed = store.is_completed(&flag_key).unwrap_or_else(|e| {
            warn!("Failed to read onboarding flag, showing onboarding: {}", e);
            false
        });

        let navigator = Self {
            catalog,
            store,
            flag_key,
            state: OnboardingState {
                current_index: 0,
                completed,
            },
        };

        if completed {
            info!("Onboarding already completed, redirecting");
            return (navigator, NavEvent::Redirect);
        }

        debug!(pages = navigator.catalog.page_count(), "Starting onboarding");
        let event = navigator.render_event(navigator.catalog.first().clone());
        (navigator, event)
    }

    /// Forward button: advance, or complete on the last page.
    ///
    /// Returns `None` once onboarding has been completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`](crate::Error::StoreUnavailable) if
    /// the completion flag cannot be written. The navigator stays on the last
    /// page and the call may be retried.
    pub fn on_next(&mut self) -> Result<Option<NavEvent>> {
        if self.state.completed {
            debug!("Ignoring next after completion");
            return Ok(None);
        }
        if self.position().is_last() {
            return self.complete().map(Some);
        }
        let next = self.state.current_index + 1;
        let page = self.catalog.page_at(next)?.clone();
        self.state.current_index = next;
        debug!(index = next, "Advanced to page");
        Ok(Some(self.render_event(page)))
    }

    /// Back button: step to the previous page.
    ///
    /// A no-op on the first page and after completion.
    pub fn on_back(&mut self) -> Option<NavEvent> {
        if self.state.completed {
            return None;
        }
        let prev = self.state.current_index.checked_sub(1)?;
        let page = self.catalog.page_at(prev).ok()?.clone();
        self.state.current_index = prev;
        debug!(index = prev, "Went back to page");
        Some(self.render_event(page))
    }

    /// Skip the remaining pages and complete immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`](crate::Error::StoreUnavailable) if
    /// the completion flag cannot be written.
    pub fn on_skip(&mut self) -> Result<Option<NavEvent>> {
        if self.state.completed {
            return Ok(None);
        }
        debug!(index = self.state.current_index, "Skipping onboarding");
        self.complete().map(Some)
    }

    /// Externally driven page change, e.g. a swipe.
    ///
    /// Returns `None` if `new_index` is already current or onboarding is
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](crate::Error::OutOfRange) if `new_index`
    /// is not a valid page. The current page is left unchanged.
    pub fn on_page_changed(&mut self, new_index: usize) -> Result<Option<NavEvent>> {
        if self.state.completed {
            return Ok(None);
        }
        let page = match self.catalog.page_at(new_index) {
            Ok(page) => page.clone(),
            Err(e) => {
                warn!("Rejected page change: {}", e);
                return Err(e);
            }
        };
        if new_index == self.state.current_index {
            return Ok(None);
        }
        self.state.current_index = new_index;
        debug!(index = new_index, "Page changed externally");
        Ok(Some(self.render_event(page)))
    }

    /// Route an [`Input`] to its handler.
    ///
    /// # Errors
    ///
    /// Propagates errors from the handler.
    pub fn dispatch(&mut self, input: Input) -> Result<Option<NavEvent>> {
        match input {
            Input::Next => self.on_next(),
            Input::Back => Ok(self.on_back()),
            Input::Skip => self.on_skip(),
            Input::PageChanged(index) => self.on_page_changed(index),
        }
    }

    fn complete(&mut self) -> Result<NavEvent> {
        if let Err(e) = self.store.mark_completed(&self.flag_key, Utc::now()) {
            warn!("Failed to persist onboarding completion: {}", e);
            return Err(e);
        }
        self.state.completed = true;
        info!("Onboarding completed, redirecting");
        Ok(NavEvent::Redirect)
    }
}

impl<S> Navigator<S> {
    /// Event for the current index, showing `page` looked up for it.
    fn render_event(&self, page: SlidePage) -> NavEvent {
        NavEvent::RenderPage {
            index: self.state.current_index,
            page,
            policy: self.policy(),
            dots: self.dots(),
        }
    }

    /// Current state snapshot
    #[must_use]
    pub const fn state(&self) -> OnboardingState {
        self.state
    }

    /// Index of the page on screen
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Whether onboarding has been completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Position of the current page
    #[must_use]
    pub fn position(&self) -> Position {
        Position::of(self.state.current_index, self.catalog.page_count())
    }

    /// Button state for the current page
    #[must_use]
    pub fn policy(&self) -> ButtonPolicy {
        ButtonPolicy::for_position(self.position())
    }

    /// Indicator state for the current page
    #[must_use]
    pub fn dots(&self) -> DotIndicator {
        DotIndicator::new(self.state.current_index, self.catalog.page_count())
    }

    /// The catalog being walked
    #[must_use]
    pub const fn catalog(&self) -> &SlideCatalog {
        &self.catalog
    }

    /// Key the completion flag is stored under
    #[must_use]
    pub fn flag_key(&self) -> &str {
        &self.flag_key
    }

    /// The backing flag store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the navigator, returning its flag store
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
