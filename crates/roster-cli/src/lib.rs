//! Library components of the roster CLI: logging, settings, the terminal
//! renderer, and the interactive session.

pub mod logging;
pub mod render;
pub mod session;
pub mod settings;
pub mod summary;
