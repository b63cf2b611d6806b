//! Errors returned by the public operations that can fail on valid input.
//!
//! Misuse of the tree internals (merging trees whose keys interleave, rotating
//! a walker that has no son on that side and so on) is not reported through this type:
//! those are either asserted or reported as `None`/`Err(())` by the walker methods.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// Keys in a tree are unique; the tree was left unchanged.
    #[error("the key is already present in the tree")]
    DuplicateKey,

    /// Color arrays are indexed from `1` to `len`.
    #[error("index {index} is out of range for a color array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0:?} does not name a color, expected 'w' or 'b'")]
    UnknownColor(char),
}
