//! The `utils` module provides the error type and logging setup shared
//! across the `display-board` application.

pub mod error;
pub mod logging;
