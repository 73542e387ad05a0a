//! Option helper extensions for HTTP handlers.

use salvo::prelude::StatusError;

/// Map a missing resource to a 404 with a brief message.
pub(crate) trait OptionExt<T> {
    fn or_404(self, what: &str) -> Result<T, StatusError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_404(self, what: &str) -> Result<T, StatusError> {
        self.ok_or_else(|| StatusError::not_found().brief(format!("{what} not found")))
    }
}
