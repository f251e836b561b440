//! Saved credentials driving the API client against a mock endpoint.

use alidns_client::{AliDnsClient, ApiError, DnsApi};
use alidns_core::Settings;
use alidns_credentials::{CredentialStore, LoadOutcome};
use alidns_integration_tests::store_for;
use serde_json::json;
use wiremock::matchers::{header, header_regex, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.endpoint.url = server.uri();
    settings.endpoint.timeout_secs = 5;
    settings
}

#[tokio::test]
async fn test_saved_credentials_sign_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "DescribeDomainRecords"))
        .and(query_param("DomainName", "example.com"))
        .and(header_regex(
            "authorization",
            "^ACS3-HMAC-SHA256 Credential=LTAI_example_id,SignedHeaders=host;",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TotalCount": 1,
            "DomainRecords": {"Record": [
                {"RecordId": "1", "RR": "www", "Type": "A", "Value": "192.0.2.1",
                 "TTL": 600, "Line": "unicom", "Status": "ENABLE", "Locked": true}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (store, _dir) = store_for("alice");
    store.save("LTAI_example_id", "SecretValue123!").unwrap();

    let record = match store.load() {
        LoadOutcome::Loaded(record) => record,
        other => panic!("expected Loaded, got {other:?}"),
    };
    let client =
        AliDnsClient::from_settings(record.identifier(), record.secret(), &settings_for(&server))
            .unwrap();

    let records = client.list_records("example.com").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line.label(), "联通");
    assert!(records[0].locked);
}

#[tokio::test]
async fn test_cleared_store_is_not_configured() {
    let server = MockServer::start().await;
    let (store, _dir) = store_for("alice");
    store.save("LTAI_example_id", "SecretValue123!").unwrap();
    store.clear();

    let (identifier, secret) = store.load().into_pair();
    let result = AliDnsClient::from_settings(
        &identifier,
        &secret.into(),
        &settings_for(&server),
    );
    assert!(matches!(result, Err(ApiError::NotConfigured)));
}
