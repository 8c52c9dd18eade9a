//! Event handling module for keyboard and mouse events.
//!
//! Handlers map raw terminal events to `Action`s; the App applies them.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::Action;
pub use handler::EventHandler;
