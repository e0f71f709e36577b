use serial_test::serial;
use std::sync::Arc;

use crate::cli_context::{CliContext, CliContextBuilder};
use crate::client::MemoryClient;
use crate::config::Config;
use crate::constants::DEFAULT_ORG_ENV;
use crate::models::SessionKind;

#[test]
fn test_cli_context_builder() {
    let mut context = CliContextBuilder::new()
        .with_config(Config::default())
        .with_api_key("test-api-key".to_string())
        .build()
        .unwrap();

    assert!(context.has_api_key());
    assert_eq!(context.api_key().unwrap(), "test-api-key");
}

#[test]
fn test_verified_client_with_api_key() {
    let mut context = CliContextBuilder::new()
        .with_config(Config::default())
        .with_api_key("test-api-key".to_string())
        .build()
        .unwrap();

    let first = context.verified_client().unwrap();
    let second = context.verified_client().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_injected_client_is_used() {
    let memory = MemoryClient::new().with_session("u1", "alice", SessionKind::User);
    let mut context = CliContextBuilder::new()
        .with_config(Config::default())
        .with_client(Arc::new(memory.clone()))
        .build()
        .unwrap();

    let client = context.verified_client().unwrap();
    let session = client.who_am_i().await.unwrap();
    assert_eq!(session.username, "alice");
    assert_eq!(memory.calls().len(), 1);
}

#[test]
#[serial]
fn test_org_flag_overrides_default_org() {
    std::env::remove_var(DEFAULT_ORG_ENV);

    let config = Config {
        default_org: Some("configured".to_string()),
        ..Config::default()
    };

    let context = CliContextBuilder::new()
        .with_config(config.clone())
        .with_org("flagged")
        .build()
        .unwrap();
    assert_eq!(context.org_name().as_deref(), Some("flagged"));

    let context = CliContextBuilder::new().with_config(config).build().unwrap();
    assert_eq!(context.org_name().as_deref(), Some("configured"));
}

#[test]
fn test_no_color_disables_colors() {
    let context = CliContext::new().with_no_color(true);
    assert!(!context.render_config().enable_colors);
}
