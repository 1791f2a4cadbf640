//! Adapter trait implementation for the Shibboleth `AuthN` service.

use shib_authn_sdk::{AuthNAdapter, AuthenticationResult};

use super::service::Service;

impl AuthNAdapter for Service {
    fn authenticate(&self) -> AuthenticationResult {
        Service::authenticate(self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use shib_authn_sdk::FailureCode;

    use super::*;
    use crate::config::ShibbolethAuthNConfig;
    use crate::domain::Environment;

    #[test]
    fn adapter_trait_succeeds_with_session_and_identity() {
        let env = [("Shib-Session-ID", "abc123"), ("eppn", "jdoe")]
            .into_iter()
            .collect();
        let service = Service::new(ShibbolethAuthNConfig::default(), env).unwrap();
        let adapter: Arc<dyn AuthNAdapter> = Arc::new(service);

        assert!(adapter.authenticate().is_success());
    }

    #[test]
    fn adapter_trait_reports_missing_session() {
        let service =
            Service::new(ShibbolethAuthNConfig::default(), Environment::default()).unwrap();
        let adapter: &dyn AuthNAdapter = &service;

        let result = adapter.authenticate();
        assert_eq!(result.code(), Some(FailureCode::GenericFailure));
    }
}
