//! Adapter trait shared by the Shibboleth and fake adapters.

use crate::models::AuthenticationResult;

/// Authentication adapter.
///
/// Both adapters implement this trait so calling code can swap the real
/// Shibboleth adapter for the fake one without changes:
///
/// ```ignore
/// let adapter: Arc<dyn AuthNAdapter> = Arc::new(service);
///
/// let result = adapter.authenticate();
/// if !result.is_success() {
///     // translate result.code() / result.messages() into a response
/// }
/// ```
///
/// Adapters own an immutable configuration (and, for the Shibboleth adapter,
/// an immutable environment snapshot), so calls never mutate shared state.
pub trait AuthNAdapter: Send + Sync {
    /// Decide whether the request is authenticated.
    ///
    /// Every outcome, including "no session", is reported through the
    /// returned [`AuthenticationResult`] rather than as an error.
    fn authenticate(&self) -> AuthenticationResult;
}
