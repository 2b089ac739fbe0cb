//! Naming error types

use std::fmt;

use thiserror::Error;

use super::name::Name;
use crate::context::ContextRef;

/// Result type for naming operations
pub type Result<T> = std::result::Result<T, NamingError>;

/// Why a name could not be found
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotFoundReason {
    /// Nothing is bound under the component
    MissingNode,
    /// Bound, but not to a context where one was required
    NotContext,
    /// Bound to a context where an object was required
    NotObject,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingNode => "missing_node",
            Self::NotContext => "not_context",
            Self::NotObject => "not_object",
        };
        f.write_str(reason)
    }
}

/// Naming service errors
#[derive(Error, Debug)]
pub enum NamingError {
    /// Malformed or structurally illegal name
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Resolution failed; `rest_of_name` starts at the failing component
    #[error("not found ({reason}): `{rest_of_name}`")]
    NotFound {
        reason: NotFoundReason,
        rest_of_name: Name,
    },

    /// A delegated context could not complete the operation
    #[error("cannot proceed in context {context:?}: `{rest_of_name}`")]
    CannotProceed {
        context: ContextRef,
        rest_of_name: Name,
    },

    /// Non-rebind bind onto an occupied name
    #[error("already bound: `{0}`")]
    AlreadyBound(Name),

    /// Destroy attempted on a context that still holds bindings
    #[error("context not empty: {0} binding(s)")]
    NotEmpty(usize),

    /// Malformed address in a URL form
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Client protocol misuse
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// Target context or iterator has been destroyed
    #[error("object does not exist")]
    ObjectNotExist,
}

impl NamingError {
    pub fn invalid_name(detail: impl Into<String>) -> Self {
        Self::InvalidName(detail.into())
    }

    pub fn missing_node(rest_of_name: Name) -> Self {
        Self::NotFound {
            reason: NotFoundReason::MissingNode,
            rest_of_name,
        }
    }

    pub fn not_context(rest_of_name: Name) -> Self {
        Self::NotFound {
            reason: NotFoundReason::NotContext,
            rest_of_name,
        }
    }

    pub fn not_object(rest_of_name: Name) -> Self {
        Self::NotFound {
            reason: NotFoundReason::NotObject,
            rest_of_name,
        }
    }

    pub fn cannot_proceed(context: ContextRef, rest_of_name: Name) -> Self {
        Self::CannotProceed {
            context,
            rest_of_name,
        }
    }

    pub fn already_bound(name: Name) -> Self {
        Self::AlreadyBound(name)
    }

    pub fn invalid_address(detail: impl Into<String>) -> Self {
        Self::InvalidAddress(detail.into())
    }

    pub fn bad_param(detail: impl Into<String>) -> Self {
        Self::BadParam(detail.into())
    }

    /// The reason code if this is a `NotFound`
    pub fn not_found_reason(&self) -> Option<NotFoundReason> {
        match self {
            Self::NotFound { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// The unresolved remainder carried by `NotFound` and `CannotProceed`
    pub fn rest_of_name(&self) -> Option<&Name> {
        match self {
            Self::NotFound { rest_of_name, .. } | Self::CannotProceed { rest_of_name, .. } => {
                Some(rest_of_name)
            }
            _ => None,
        }
    }
}
