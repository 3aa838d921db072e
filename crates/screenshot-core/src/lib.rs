//! screenshot-core: Screenshot capture sequencing library
//!
//! This library drives the desktop side of a screenshot request: bringing an
//! application forward, optionally switching it to a sub-view, toggling
//! fullscreen around the capture, and saving the image into a dated
//! directory. OS automation is reached through the [`capture::DesktopAutomation`]
//! trait so the sequencing can run against a mock in tests.

pub mod capture;
pub mod error;
pub mod model;
pub mod util;
