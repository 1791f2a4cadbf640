//! Adapter trait implementation for the fake `AuthN` service.

use shib_authn_sdk::{AuthNAdapter, AuthenticationResult};

use super::service::Service;

impl AuthNAdapter for Service {
    fn authenticate(&self) -> AuthenticationResult {
        Service::authenticate(self)
    }
}
