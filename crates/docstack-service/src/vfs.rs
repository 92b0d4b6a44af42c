//! Virtual filesystem errors.
//!
//! The VFS reports its well-known failures as dedicated variants of
//! [`VfsError`]. Callers match on the variant, never on the message text.
//! Lower-level failures (host filesystem, CouchDB index) are wrapped and stay
//! reachable through [`std::error::Error::source`].

use std::error::Error as StdError;
use std::io;

use crate::couchdb::CouchError;

/// Virtual filesystem errors.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// The directory a file or folder is created into is missing.
    #[error("parent directory with given DirID does not exist")]
    ParentDoesNotExist,

    /// The document `type` attribute is neither "file" nor "directory".
    #[error("Invalid document type")]
    DocTypeInvalid,

    /// The name is empty or contains a forbidden character.
    #[error("Invalid filename: empty or contains an illegal character")]
    IllegalFilename,

    /// The uploaded content does not match the announced checksum.
    #[error("Invalid hash")]
    InvalidHash,

    /// The uploaded content does not match the announced size.
    #[error("Content length does not match")]
    ContentLengthMismatch,

    /// Host filesystem error.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Error from the CouchDB index backing the VFS.
    #[error("{0}")]
    Couch(#[from] CouchError),
}

/// Iterates over `err` and its causes, outermost first.
///
/// Besides `source()`, the walk descends into the payload of a custom
/// `io::Error`, which `io::Error::source` skips over.
pub fn causes<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&cause| next_cause(cause))
}

fn next_cause<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    if let Some(payload) = err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
        let payload: &(dyn StdError + 'static) = payload;
        return Some(payload);
    }
    err.source()
}

/// Whether the error reports that the target already exists.
///
/// A non-empty directory in the way of a rename or removal counts too.
pub fn is_exist(err: &(dyn StdError + 'static)) -> bool {
    has_io_kind(err, &[
        io::ErrorKind::AlreadyExists,
        io::ErrorKind::DirectoryNotEmpty,
    ])
}

/// Whether the error reports that the target does not exist.
pub fn is_not_exist(err: &(dyn StdError + 'static)) -> bool {
    has_io_kind(err, &[io::ErrorKind::NotFound])
}

fn has_io_kind(err: &(dyn StdError + 'static), kinds: &[io::ErrorKind]) -> bool {
    causes(err).any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| kinds.contains(&e.kind()))
    })
}
