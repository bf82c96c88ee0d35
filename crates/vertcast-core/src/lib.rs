//! Vertcast Core - Domain Model for the Vertical Output
//!
//! This crate contains the shared state the vertical output controller
//! operates on:
//! - The runtime [`Config`] toggled by the embedding application
//! - The [`OutputEvent`] channel linking device signals to listeners

#![warn(missing_docs)]

pub mod config;
pub mod events;

pub use config::{Config, SharedConfig};
pub use events::{event_channel, OutputEvent};
