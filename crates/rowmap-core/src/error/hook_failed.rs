use super::Error;

/// Error returned by a user hook.
///
/// The engine hands it back to the caller as-is, without adding context.
#[derive(Debug)]
pub(super) struct HookFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for HookFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for HookFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "hook failed: {}", self.inner)
    }
}

impl Error {
    /// Wraps an error raised inside a hook.
    pub fn hook_failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
        Error::from(super::ErrorKind::HookFailed(HookFailed { inner: err.into() }))
    }

    pub fn is_hook_failed(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::HookFailed(_)))
    }
}
