//! Terminal coding-exercise workspace with a floating question panel.
//!
//! The panel controller ([`window::FloatingPanel`]) works in abstract
//! viewport units and knows nothing about terminals; [`app::CodepadApp`]
//! hosts it inside a ratatui screen.

pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod question;
pub mod runner;
pub mod tracing_sub;
pub mod ui;
pub mod window;
