use thiserror::Error;

use super::{ident::Slot, types::Type};

/// The tree handed to the analysis is malformed. This is a compiler bug in
/// whatever built the tree, not a user error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocalsError {
    #[error("local {slot} declared with type {found}, but it was already declared with type {previous}")]
    TypeMismatch {
        slot: Slot,
        previous: Type,
        found: Type,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrintError {
    #[error("printing {construct} is not supported")]
    Unsupported { construct: &'static str },
}
