use thiserror::Error;

use crate::domain::leaf::LeafError;

/// Reasons a tree construction can fail. Every variant aborts the whole build.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("at least one leaf is required")]
    EmptyInput,

    #[error("leaf {index} could not be converted to bytes")]
    LeafEncodingFailed {
        index: usize,
        #[source]
        source: LeafError,
    },

    #[error("hash function consumed {actual} of {expected} bytes")]
    IncompleteWrite { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, BuildError>;
