//! Terminal UI layer for interactive chat sessions.
//!
//! The UI module owns rendering, keyboard handling, and loop control for the
//! text user interface. It is the presentation layer for
//! [`crate::core::controller::ChatController`]: [`view::ChatView`] receives the
//! controller's render callbacks, [`renderer`] draws frames from it, and
//! [`chat_loop`] turns key presses into controller calls.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
pub mod view;
pub mod wrap;
