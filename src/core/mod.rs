//! Core types for the harness pipeline: builder, cancellation, and error handling.

pub mod builder;
pub mod cancel;
pub mod error;

pub use builder::{Harness, HarnessBuilder};
pub use cancel::CancelToken;
pub use error::{Error, Result};
