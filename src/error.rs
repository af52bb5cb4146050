/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Error taxonomy shared by every engine.
//!
//! The core performs no I/O, so there are exactly two failure kinds and both
//! are reported immediately: an id that is not in its catalog, or an argument
//! outside its accepted range. An empty path list is a successful result, not
//! an error.

use core::fmt;

use thiserror::Error;

/// Which of the three catalogs an id was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// The Entity Type catalog.
    Entity,
    /// The Force catalog.
    Force,
    /// The Work Item catalog.
    WorkItem,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatalogKind::Entity => "entity",
            CatalogKind::Force => "force",
            CatalogKind::WorkItem => "work item",
        })
    }
}

/// Errors returned by registry lookups and engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The id does not exist in the relevant catalog.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Catalog that was searched.
        kind: CatalogKind,
        /// The id as supplied by the caller.
        id: String,
    },
    /// An argument is outside its accepted range, or fixture data handed to
    /// [`RegistryBuilder`](crate::registry::RegistryBuilder) is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn not_found(kind: CatalogKind, id: &str) -> Self {
        Error::NotFound { kind, id: id.to_owned() }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_catalog_and_id() {
        let e = Error::not_found(CatalogKind::Force, "F99");
        assert_eq!(e.to_string(), "force 'F99' not found");
        assert!(e.is_not_found());
    }

    #[test]
    fn test_invalid_argument_is_not_not_found() {
        let e = Error::invalid("max_steps must be at least 1");
        assert!(!e.is_not_found());
        assert_eq!(e.to_string(), "invalid argument: max_steps must be at least 1");
    }
}
