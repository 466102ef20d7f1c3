//! Db2 provider pieces against a mock Db2 SaaS API

use std::sync::Arc;

use ibmcloud_core::BearerTokenAuthenticator;
use ibmcloud_db2saas::{Db2saasV1, Db2saasV1Options};
use ibmcloud_provider::db2::{db_profile, Db2InstanceSettings, Db2TuneableParamDataSource};
use ibmcloud_provider::{Config, DataSource, DataSourceWithConfigValidators, Severity};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CRN: &str = "crn:v1:bluemix:public:dashdb-for-transactions:us-south:a/abc123:def456::";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}

fn client(server: &MockServer) -> Db2saasV1 {
    let authenticator = Arc::new(BearerTokenAuthenticator::new("test-token").unwrap());
    Db2saasV1::new(Db2saasV1Options::new(authenticator).with_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_tuneable_param_read_flattens_response() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/tuneable_param"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tuneable_param": {
                "db": {"ACT_SORTMEM_LIMIT": "'NONE', 'range(10, 100)'", "LOCKTIMEOUT": "'-1', 'range(0, 32767)'"},
                "dbm": {"COMM_BANDWIDTH": "'range(0.1, 100000)', '-1'"},
                "registry": {"DB2_WORKLOAD": "'ANALYTICS', 'SAP'"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data_source = Db2TuneableParamDataSource::new(client(&server));
    let config = Config::default();
    assert!(data_source.validate_data_source_config(&config).is_empty());

    let state = data_source.read(&config).await.unwrap();
    assert!(state.id().is_some_and(|id| chrono::DateTime::parse_from_rfc3339(id).is_ok()));
    assert_eq!(
        state.get("tuneable_param"),
        Some(&json!([{
            "db": [{"act_sortmem_limit": "'NONE', 'range(10, 100)'", "locktimeout": "'-1', 'range(0, 32767)'"}],
            "dbm": [{"comm_bandwidth": "'range(0.1, 100000)', '-1'"}],
            "registry": [{"db2_workload": "'ANALYTICS', 'SAP'"}]
        }]))
    );
}

#[tokio::test]
async fn test_tuneable_param_read_failure_is_error_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/tuneable_param"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"code": "internal", "message": "backend unavailable"}]
        })))
        .mount(&server)
        .await;

    let diags = Db2TuneableParamDataSource::new(client(&server))
        .read(&Config::default())
        .await
        .unwrap_err();
    let diag = diags.errors().next().unwrap();
    assert!(diag.detail.contains("backend unavailable"));
    assert!(diag.detail.contains("get_db2_saas_tuneable_param"));
}

#[tokio::test]
async fn test_instance_settings_apply_with_escaped_crn() {
    let server = MockServer::start().await;
    let profile = db_profile(CRN);
    Mock::given(method("PUT"))
        .and(path("/manage/scaling/auto"))
        .and(header("x-db-profile", profile.as_str()))
        .and(body_json(json!({
            "auto_scaling_enabled": "true",
            "auto_scaling_threshold": 85,
            "auto_scaling_over_time_period": 15.0,
            "auto_scaling_allow_plan_limit": "NO"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/manage/deployments/custom_setting"))
        .and(header("x-db-profile", profile.as_str()))
        .and(body_json(json!({
            "db": {"LOCKTIMEOUT": "30"},
            "registry": {"DB2_WORKLOAD": "ANALYTICS"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "Custom settings applied",
            "id": "task-1",
            "status": "completed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::from_value(json!({
        "autoscale_config": [{
            "auto_scaling_enabled": true,
            "auto_scaling_threshold": "85",
            "auto_scaling_over_time_period": "15",
            "auto_scaling_allow_plan_limit": false
        }],
        "custom_setting_config": [{
            "db": [{"locktimeout": "30"}],
            "registry": [{"db2_workload": "ANALYTICS"}]
        }]
    }))
    .unwrap();

    let settings = Db2InstanceSettings::from_config(&config).unwrap();
    let diags = settings.apply(&client(&server), CRN).await;
    assert!(diags.is_empty(), "{diags:?}");
}

#[tokio::test]
async fn test_instance_settings_failures_are_warnings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/manage/scaling/auto"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": "forbidden", "message": "plan does not allow autoscaling"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::from_value(json!({"autoscale_config": [{"auto_scaling_enabled": true}]})).unwrap();
    let diags = Db2InstanceSettings::from_config(&config).unwrap().apply(&client(&server), CRN).await;

    assert!(!diags.has_error());
    let warning = diags.iter().next().unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.detail.contains("plan does not allow autoscaling"));
}
