//! Firstrun - first-run onboarding controller
//!
//! Walks the user through a fixed slide catalog, persists a completion flag
//! when they finish, and redirects straight to the main application on every
//! later launch.

pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod navigator;
pub mod paths;
pub mod store;

pub use catalog::{SlideCatalog, SlidePage};
pub use config::Config;
pub use error::{Error, Result};
pub use input::Input;
pub use navigator::{ButtonPolicy, DotIndicator, NavEvent, Navigator, NextLabel, Position};
pub use store::{FlagStore, JsonFileStore, MemoryStore};
