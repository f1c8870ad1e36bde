//! Browser session management
//!
//! A [`BrowserSession`] drives a Chrome/Chromium instance over the DevTools
//! protocol. It is the privileged side of a capture: it screenshots the visible
//! viewport and snapshots the live DOM for the capture engine.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
