use thiserror::Error;

/// Errors returned by voting power engine initialization.
///
/// Reads never fail; they answer 0 for ownerless principals and unbound
/// engines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("binding slot `{slot}` is empty")]
    InvalidBinding { slot: &'static str },

    #[error("engine is already initialized")]
    AlreadyInitialized,
}
