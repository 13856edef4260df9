//! Golden Extreme storefront
//!
//! A native catalog front-end for an automotive parts retailer:
//! - `api` talks to the remote product catalog
//! - `state` holds per-page view state (catalog, detail, hero carousel)
//! - `ui` renders that state with iced
//! - `assets` converts the static image/video assets (developer tool)

pub mod api;
pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod route;
pub mod state;
pub mod ui;

pub use error::{Error, Result};
