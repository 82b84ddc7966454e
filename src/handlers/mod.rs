//! Handler builders and associated traits.
//!
//! Builders validate user supplied settings before any socket is created and
//! return the concrete handler, ready to be shared between threads.

use std::io;

use thiserror::Error;

use crate::handler::FemtoHandlerTrait;

pub mod journal_builder;

pub use journal_builder::JournalHandlerBuilder;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// Invalid user supplied configuration.
    #[error("invalid handler configuration: {0}")]
    InvalidConfig(String),
    /// Underlying I/O error whilst creating the handler.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait: Send + Sync {
    type Handler: FemtoHandlerTrait;

    /// Build the concrete handler instance.
    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler behind a trait object.
    fn build(&self) -> Result<Box<dyn FemtoHandlerTrait>, HandlerBuildError>
    where
        Self::Handler: 'static,
    {
        Ok(Box::new(self.build_inner()?))
    }
}
