use ladle_common::FetchError;
use ladle_dom::NodeKind;

/// Everything that can go wrong while building a [`Document`](crate::Document)
/// or running an operation on a [`Handle`](crate::Handle).
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A search or navigation step produced nothing.
    #[error("{what} not found")]
    NotFound {
        /// The operation that failed, e.g. `"find"` or `"next_sibling"`.
        operation: &'static str,
        /// What was being looked for.
        what: String,
    },

    /// The operation only makes sense on a different kind of node.
    #[error("{operation} needs an {expected} node, found a {found} node")]
    WrongNodeType {
        /// The operation that failed.
        operation: &'static str,
        /// The kind of node the operation requires.
        expected: NodeKind,
        /// The kind of node it was called on.
        found: NodeKind,
    },

    /// The markup could not be turned into a usable tree.
    #[error("unable to parse the HTML: {0}")]
    Parse(String),

    /// A query was built from the wrong number of arguments.
    #[error("a query takes a tag, or a tag with an attribute key and value; got {arity} arguments")]
    MalformedQuery {
        /// How many arguments were supplied.
        arity: usize,
    },

    /// The document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl QueryError {
    /// Name of the operation that produced this error.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::NotFound { operation, .. } | Self::WrongNodeType { operation, .. } => *operation,
            Self::Parse(_) => "parse",
            Self::MalformedQuery { .. } => "query",
            Self::Fetch(_) => "fetch",
        }
    }

    pub(crate) fn not_found(operation: &'static str, what: impl Into<String>) -> Self {
        Self::NotFound {
            operation,
            what: what.into(),
        }
    }

    /// Whether this is a [`QueryError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
