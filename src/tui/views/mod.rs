//! # Views Module
//!
//! Draws the active session onto a [`RenderStream`](crate::tui::io::RenderStream).

pub mod terminal_renderer;

pub use terminal_renderer::{fit_to_width, SessionRenderer};
