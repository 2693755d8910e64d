//! # Models Module
//!
//! Plain data owned by the sessions.

pub mod text_field;

pub use text_field::TextField;
