use crate::common::error::RmgrError;

/// Result alias used throughout the crate.
pub type RmgrResult<T> = Result<T, RmgrError>;

/// Helpers for converting `Option` values into `RmgrResult`.
pub trait OptionExt<T> {
    /// Convert an `Option` into an `RmgrResult` with an internal error message.
    fn ok_or_internal_error(self, message: impl Into<String>) -> RmgrResult<T>;

    /// Convert an `Option` into a validation error for the given field.
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> RmgrResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_internal_error(self, message: impl Into<String>) -> RmgrResult<T> {
        self.ok_or_else(|| RmgrError::internal_error(message))
    }

    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> RmgrResult<T> {
        self.ok_or_else(|| RmgrError::validation_error(field, message, None))
    }
}

/// Context helper for chaining `RmgrResult` operations.
pub trait RmgrResultExt<T> {
    /// Wrap the error with additional context.
    fn with_context(self, context: impl Into<String>) -> RmgrResult<T>;
}

impl<T> RmgrResultExt<T> for RmgrResult<T> {
    fn with_context(self, context: impl Into<String>) -> RmgrResult<T> {
        self.map_err(|e| RmgrError::internal_error_with_source(context, e))
    }
}
