//! # Plugcheck Core Kernel
//!
//! Shared foundations for the checker: descriptor vocabulary and well-known
//! paths in [`constants`], and the crate-wide [`Error`](error::Error) type with
//! its `Result` alias in [`error`].
pub mod constants;
pub mod error;

pub use error::{Error, Result};
