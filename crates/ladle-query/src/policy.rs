use crate::error::QueryError;

/// What happens when an operation fails.
///
/// Every operation returns a `Result` either way. The policy only decides
/// whether the failure is also written to the log, so it can be chosen once
/// when a [`Document`](crate::Document) is built and never changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Hand the error back and say nothing.
    #[default]
    Silent,
    /// Hand the error back after logging it with `log::error!`.
    Log,
}

impl ErrorPolicy {
    /// Pass `result` through, logging it first if it is an error and the
    /// policy asks for that.
    ///
    /// # Errors
    ///
    /// Returns the error contained in `result`, unchanged.
    pub fn report<T>(self, result: Result<T, QueryError>) -> Result<T, QueryError> {
        if self == Self::Log
            && let Err(error) = &result
        {
            log::error!("error in {}: {error}", error.operation());
        }
        result
    }
}

/// Settings fixed when a [`Document`](crate::Document) is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Failure reporting for the document and every handle taken from it.
    pub policy: ErrorPolicy,
    /// Refuse markup with parse errors instead of recovering from them.
    pub strict: bool,
}

impl DocumentOptions {
    /// Options with the given failure policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Options that reject markup with parse errors.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
