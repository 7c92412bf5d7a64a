//! Parley is a terminal chat client that talks to one fixed remote
//! inference endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state, the turn lifecycle, durable
//!   history, configuration, and the inference request service.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the JSON payloads exchanged with the inference
//!   endpoint.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! dispatches into [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod core;
pub mod ui;
