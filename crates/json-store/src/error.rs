use json_store_patch::PatchError;
use thiserror::Error;

/// Rendering a query as a string failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{what} cannot be serialized to a query string")]
    SerializationUnsupported { what: &'static str },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("collection already contains an item with id {id:?}")]
    DuplicateIdentity { id: String },
    #[error("no item with id {id:?}")]
    UnknownIdentity { id: String },
    /// The value at the identity path is missing or neither a string nor a number.
    #[error("item has no usable identity at {path}")]
    MissingIdentity { path: String },
    #[error("patch changes the identity of {from:?} to {to:?}")]
    IdentityChanged { from: String, to: String },
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type StoreResult<T> = Result<T, StoreError>;
