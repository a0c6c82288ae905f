use thiserror::Error;

use crate::syntax::Span;

/// Fatal errors raised while building the declaration model.
///
/// Every variant indicates input outside the supported language subset or a
/// structural precondition violation; the partial module must be discarded.
/// All builds are deterministic, so retrying cannot help.
///
/// Skipped embedded-interface members are not errors: they are recorded on
/// the produced [`crate::model::Interface`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A type expression of a category the resolver does not model.
    #[error("unsupported type expression `{kind}`")]
    UnsupportedTypeExpr {
        /// Syntax-node category name.
        kind: &'static str,
        /// Location of the offending expression.
        span: Span,
    },

    /// An interface member that is neither a method signature nor an
    /// embedded named type.
    #[error("unsupported member `{kind}` in interface `{interface}`")]
    UnsupportedInterfaceMember {
        /// Owning interface name.
        interface: String,
        /// Syntax-node category name of the member's type.
        kind: &'static str,
    },

    /// A method declaration with an empty receiver list.
    #[error("method `{method}` has no receiver")]
    MissingReceiver {
        /// Method name.
        method: String,
    },

    /// A staged method whose receiver names no record in the module.
    #[error("cannot bind method `{method}`: no record named `{receiver}`")]
    UnresolvedReceiver {
        /// Method name.
        method: String,
        /// Bare receiver type name that failed to match.
        receiver: String,
    },
}

/// Convenience alias used across the crate.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
