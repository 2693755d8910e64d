//! # Controllers Module
//!
//! The session driver: input in, state transitions, frames out.

pub mod app_controller;

pub use app_controller::AppController;
