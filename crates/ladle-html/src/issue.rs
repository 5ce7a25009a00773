use core::fmt;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "This specification defines the parsing rules for HTML documents...
/// The handling of parse errors is well-defined."
///
/// Parse errors never stop parsing. They are collected so that a caller who
/// wants well-formed input can refuse the document afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the parse error, using the WHATWG error code where one exists.
    pub message: String,
    /// Index into the token stream where this error was encountered.
    pub token_index: usize,
    /// "Parse errors are only errors with the content; they are not, for instance,
    /// errors in the syntax of the specification itself."
    ///
    /// `false` marks a warning about a construct this parser handles loosely.
    pub is_error: bool,
}

impl ParseIssue {
    /// An error-level issue.
    #[must_use]
    pub fn error(message: impl Into<String>, token_index: usize) -> Self {
        Self {
            message: message.into(),
            token_index,
            is_error: true,
        }
    }

    /// A warning-level issue.
    #[must_use]
    pub fn warning(message: impl Into<String>, token_index: usize) -> Self {
        Self {
            message: message.into(),
            token_index,
            is_error: false,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level} at token {}: {}", self.token_index, self.message)
    }
}
