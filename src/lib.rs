//! Khet.ai chat is a terminal client for the Khet.ai agricultural assistant.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the chat session state machine, the controller that turns
//!   session changes into view events, the HTTP exchange, the weather, crop
//!   and disease clients, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`api`] defines the request and reply payloads of the backend routes.
//! - [`cli`] parses arguments and dispatches to the chat screen, one-shot
//!   questions, the farm tools, and settings commands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
