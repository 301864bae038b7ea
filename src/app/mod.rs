// Application layer: the line-oriented terminal front end over CartManager.

pub mod commands;
pub mod session;

pub use commands::Command;
pub use session::{render_error, render_event, Reply, Session};
