//! Tests for reading the mocking flag from `MOCKGATE_ENV`.
//!
//! The flag is read once per process, so everything that depends on the
//! environment runs inside a single test in this binary.

use std::sync::Arc;

use async_trait::async_trait;
use mockgate::profile::PROFILE_ENV_VAR;
use mockgate::{
    mocking_enabled, Gateway, GatewayError, Profile, RequestConfig, RequestOptions,
    ResponseEnvelope, Settings, Transport,
};

struct Offline;

#[async_trait]
impl Transport for Offline {
    async fn send(&self, config: RequestConfig) -> Result<ResponseEnvelope, GatewayError> {
        Err(GatewayError::status(503, format!("offline: {}", config.path)))
    }
}

#[test]
fn test_profile_from_environment() {
    std::env::set_var(PROFILE_ENV_VAR, "test");

    // First read latches the flag for the rest of the process.
    assert!(mocking_enabled());

    let gateway = Gateway::builder()
        .transport(Arc::new(Offline))
        .build()
        .expect("gateway should build");
    assert!(gateway.mocking_active());

    let runtime = tokio::runtime::Runtime::new().expect("runtime should start");
    let data = runtime
        .block_on(gateway.fetch_resource("/todos", RequestOptions::new()))
        .expect("fixture should resolve");
    assert_eq!(data["todos"][0]["userId"], 26);

    let err = runtime
        .block_on(gateway.fetch_resource("/unknown", RequestOptions::new()))
        .unwrap_err();
    assert_eq!(err.code(), Some(503));

    // The environment wins over the settings file.
    let settings = Settings {
        profile: Some("production".to_string()),
        ..Default::default()
    };
    assert_eq!(settings.resolve_profile(), Profile::Test);

    // Unset: the settings file profile applies.
    std::env::remove_var(PROFILE_ENV_VAR);
    assert_eq!(
        Profile::from_env_or(Some("development")),
        Profile::Development
    );
    let settings = Settings {
        profile: Some("development".to_string()),
        ..Default::default()
    };
    assert!(settings.resolve_profile().mocking_enabled());
    assert_eq!(Profile::from_env_or(None), Profile::Production);

    // Unrecognised names never mock.
    std::env::set_var(PROFILE_ENV_VAR, "staging");
    let profile = Profile::from_env_or(Some("development"));
    assert_eq!(profile, Profile::Other("staging".to_string()));
    assert!(!profile.mocking_enabled());

    // Already latched: later environment changes are not observed.
    assert!(mocking_enabled());
}
