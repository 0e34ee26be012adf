//! # flipbook-core-view
//!
//! Core page navigation and flip animation library for page flip book widgets.
//!
//! This crate provides platform-agnostic state and logic for:
//! - Navigating a stack of pages with a fixed-duration flip lock
//! - Computing the page stack and control states for any presenter
//! - Mapping keys, indicator clicks and touch swipes to navigation
//! - Scheduling the flip unlock on a cooperative timer
//! - Mounting the book on a web page (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`BookConfig`] from a TOML string
//! - `web` - Enable web/WASM DOM presentation, event wiring and effects
//!
//! ## Example
//!
//! ```rust,ignore
//! use flipbook_core_view::{BookConfig, FlipBook};
//! use flipbook_core_view::timer::ManualTimer;
//!
//! // Any type implementing `PresentationAdapter`
//! let timer = ManualTimer::new();
//! let book = FlipBook::new(&BookConfig::with_pages(4), presenter, timer.clone());
//!
//! book.next_page();
//! timer.advance(400); // flip lock released, controls refreshed
//!
//! // In the browser, with the `web` feature
//! let book = flipbook_core_view::book::web::mount(&BookConfig::default())?;
//! ```

pub mod book;
mod config;
pub mod effects;
pub mod input;
mod navigator;
pub mod render;
pub mod timer;

pub use book::FlipBook;
pub use config::{BookConfig, ConfigError, DEFAULT_FLIP_DURATION_MS, DEFAULT_SWIPE_THRESHOLD, DEFAULT_TOTAL_PAGES};
pub use input::{NavInput, SwipeTracker};
pub use navigator::{NavigatorState, PageNavigator, TransitionState};
pub use render::{ControlsState, PageFace, PageStyle, PresentationAdapter};

#[cfg(feature = "web")]
pub use book::web::mount;
#[cfg(feature = "web")]
pub use render::web::DomPresenter;
