// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error type carried by [`Event::Error`](crate::Event::Error).
//!
//! Upstream failures travel through a multicast coordinator as data: the
//! same error is delivered to every subscriber, so [`FluxionError`] is
//! [`Clone`].
//!
//! # Examples
//!
//! ```
//! use fluxion_core::{FluxionError, Result};
//!
//! fn connect() -> Result<()> {
//!     Err(FluxionError::stream_error("upstream not ready"))
//! }
//!
//! assert!(connect().is_err());
//! ```

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

/// Root error type for fluxion sources and subscribers.
#[derive(Debug, thiserror::Error)]
pub enum FluxionError {
    /// The producer failed while generating items.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by user-provided producers and callbacks.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn core::error::Error + Send + Sync>),
}

impl FluxionError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized Result type for fluxion operations
pub type Result<T> = core::result::Result<T, FluxionError>;

impl Clone for FluxionError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source cannot be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
        }
    }
}
