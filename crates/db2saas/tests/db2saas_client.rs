//! End-to-end tests of the Db2 SaaS client against a mock server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ibmcloud_common::codes;
use ibmcloud_core::{BearerTokenAuthenticator, NoAuthAuthenticator};
use ibmcloud_db2saas::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static ENV_LOCK: Mutex<()> = Mutex::new(());

const CRN: &str = "crn:v1:bluemix:public:dashdb-for-transactions:us-south:a/abc123:def456::";
const ENCODED_CRN: &str =
    "crn%3Av1%3Abluemix%3Apublic%3Adashdb-for-transactions%3Aus-south%3Aa%2Fabc123%3Adef456%3A%3A";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}

fn client(server: &MockServer) -> Db2saasV1 {
    let authenticator = Arc::new(BearerTokenAuthenticator::new("test-token").unwrap());
    Db2saasV1::new(Db2saasV1Options::new(authenticator).with_url(server.uri())).unwrap()
}

fn user_json() -> serde_json::Value {
    json!({
        "dvRole": "test-role",
        "metadata": {"created": "2024-10-01"},
        "formatedIbmid": "test-formated-ibm-id",
        "role": "bluadmin",
        "iamid": "test-iam-id",
        "permittedActions": ["read", "write"],
        "allClean": false,
        "password": "",
        "iam": false,
        "name": "admin",
        "ibmid": "test-ibm-id",
        "id": "bluadmin",
        "locked": "no",
        "initErrorMsg": "",
        "email": "user@example.com",
        "authentication": {"method": "internal", "policy_id": "Default"}
    })
}

#[tokio::test]
async fn test_get_connection_info_escapes_path_and_sets_headers() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/connectioninfo/{ENCODED_CRN}")))
        .and(header("x-deployment-id", CRN))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_regex(
            "x-ibmcloud-sdk-analytics",
            "service_name=db2saas;service_version=V1;operation_id=GetDb2SaasConnectionInfo",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public": {
                "hostname": "db.example.com",
                "databaseName": "bludb",
                "sslPort": "30376",
                "ssl": true,
                "databaseVersion": "11.5.0"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .get_db2_saas_connection_info(&GetDb2SaasConnectionInfoOptions::new(CRN, CRN))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let public = response.result.unwrap().public.unwrap();
    assert_eq!(public.database_name.as_deref(), Some("bludb"));
    assert_eq!(public.ssl, Some(true));
}

#[tokio::test]
async fn test_post_user_sends_complete_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(header("x-deployment-id", CRN))
        .and(body_json(json!({
            "id": "test-user",
            "iam": false,
            "ibmid": "test-ibmid",
            "name": "test_user",
            "password": "dEkMc43@gfAPl!867^dSbu",
            "role": "bluuser",
            "email": "test_user@mycompany.com",
            "locked": "no",
            "authentication": {"method": "internal", "policy_id": "Default"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let options = PostDb2SaasUserOptions::new(
        CRN,
        "test-user",
        "test-ibmid",
        "test_user",
        "dEkMc43@gfAPl!867^dSbu",
        "test_user@mycompany.com",
        UserAuthentication::new("internal", "Default").unwrap(),
    );
    let response = client(&server).post_db2_saas_user(&options).await.unwrap();

    assert_eq!(response.status_code, 201);
    let user = response.result.unwrap();
    assert_eq!(user.role, UserRole::Bluadmin);
    assert_eq!(user.permitted_actions, vec!["read", "write"]);
}

#[tokio::test]
async fn test_put_autoscale_sends_only_given_settings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/manage/scaling/auto"))
        .and(header("x-db-profile", CRN))
        .and(body_json(json!({
            "auto_scaling_enabled": "true",
            "auto_scaling_threshold": 90,
            "auto_scaling_over_time_period": 5.0,
            "auto_scaling_allow_plan_limit": "YES"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Autoscaling updated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = PutDb2SaasAutoscaleOptions::new(CRN)
        .with_auto_scaling_enabled(true)
        .with_auto_scaling_threshold(90)
        .with_auto_scaling_over_time_period(5.0)
        .with_auto_scaling_allow_plan_limit(AllowPlanLimit::Yes);
    let response = client(&server).put_db2_saas_autoscale(&options).await.unwrap();

    assert_eq!(response.result.unwrap().message, "Autoscaling updated");
}

#[tokio::test]
async fn test_get_autoscale_decodes_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/scaling/auto"))
        .and(header("x-db-profile", CRN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auto_scaling_allow_plan_limit": true,
            "auto_scaling_enabled": true,
            "auto_scaling_max_storage": 4096,
            "auto_scaling_over_time_period": 15,
            "auto_scaling_pause_limit": 60,
            "auto_scaling_threshold": 90,
            "storage_unit": "GB",
            "storage_utilization_percentage": 42,
            "support_auto_scaling": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .get_db2_saas_autoscale(&GetDb2SaasAutoscaleOptions::new(CRN))
        .await
        .unwrap();
    let scaling = response.result.unwrap();
    assert_eq!(scaling.auto_scaling_max_storage, 4096);
    assert_eq!(scaling.storage_unit, "GB");
}

#[tokio::test]
async fn test_post_db_configuration_sends_setting_groups() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/deployments/custom_setting"))
        .and(header("x-db-profile", CRN))
        .and(body_json(json!({
            "registry": {"DB2_WORKLOAD": "ANALYTICS"},
            "db": {"LOCKTIMEOUT": "30"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "Applied",
            "id": "task-1",
            "status": "completed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = CustomSettingsRegistry {
        db2_workload: Some("ANALYTICS".to_string()),
        ..Default::default()
    };
    let db = CustomSettingsDb { locktimeout: Some("30".to_string()), ..Default::default() };
    let options = PostDb2SaasDbConfigurationOptions::new(CRN).with_registry(registry).with_db(db);

    let response = client(&server).post_db2_saas_db_configuration(&options).await.unwrap();
    assert_eq!(response.result.unwrap().status, "completed");
}

#[tokio::test]
async fn test_allowlist_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dbsettings/whitelistips"))
        .and(body_json(json!({
            "ip_addresses": [{"address": "127.0.0.1", "description": "loopback"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dbsettings/whitelistips"))
        .and(header("x-deployment-id", CRN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip_addresses": [{"address": "127.0.0.1", "description": "loopback"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let ips = vec![IpAddress::new("127.0.0.1", "loopback").unwrap()];
    let posted = client
        .post_db2_saas_allowlist(&PostDb2SaasAllowlistOptions::new(CRN, ips.clone()))
        .await
        .unwrap();
    assert_eq!(posted.result.unwrap().status, "success");

    let listed =
        client.get_db2_saas_allowlist(&GetDb2SaasAllowlistOptions::new(CRN)).await.unwrap();
    assert_eq!(listed.result.unwrap().ip_addresses, ips);
}

#[tokio::test]
async fn test_user_listing_lookup_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "resources": [{"id": "bluadmin", "role": "bluadmin"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/bluadmin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/test%20user"))
        .and(header("x-deployment-id", CRN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let users = client.get_db2_saas_user(&GetDb2SaasUserOptions::new(CRN)).await.unwrap();
    assert_eq!(users.result.unwrap().count, 1);

    let admin =
        client.getbyid_db2_saas_user(&GetbyidDb2SaasUserOptions::new(CRN)).await.unwrap();
    assert_eq!(admin.result.unwrap().id, "bluadmin");

    let deleted = client
        .delete_db2_saas_user(&DeleteDb2SaasUserOptions::new(CRN, "test user"))
        .await
        .unwrap();
    assert_eq!(deleted.result.unwrap().get("deleted"), Some(&json!(true)));
}

#[tokio::test]
async fn test_backups_and_tuneable_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "backups": [{
                "id": "b1",
                "type": "on_demand",
                "status": "completed",
                "created_at": "2024-10-01T04:00:00Z",
                "size": 2048,
                "duration": 120
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/manage/backups/backup"))
        .and(header("x-db-profile", CRN))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"task": {"id": "t1"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/manage/tuneable_param"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tuneable_param": {"dbm": {"DIAGLEVEL": "3"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let backups = client.get_db2_saas_backup(&GetDb2SaasBackupOptions::new(CRN)).await.unwrap();
    assert_eq!(backups.result.unwrap().backups[0].duration, 120);

    let created =
        client.post_db2_saas_backup(&PostDb2SaasBackupOptions::new(CRN)).await.unwrap();
    assert_eq!(created.status_code, 202);
    assert_eq!(created.result.unwrap().task.id.as_deref(), Some("t1"));

    let params = client
        .get_db2_saas_tuneable_param(&GetDb2SaasTuneableParamOptions::new())
        .await
        .unwrap();
    let dbm = params.result.unwrap().tuneable_param.unwrap().dbm.unwrap();
    assert_eq!(dbm.diaglevel.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_caller_headers_cannot_override_operation_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/backups"))
        .and(header("accept", "application/json"))
        .and(header("x-db-profile", CRN))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"backups": []})))
        .expect(1)
        .mount(&server)
        .await;

    let options = GetDb2SaasBackupOptions::new(CRN).with_headers(HashMap::from([
        ("Accept".to_string(), "text/plain".to_string()),
        ("X-Db-Profile".to_string(), "other".to_string()),
        ("X-Trace".to_string(), "abc".to_string()),
    ]));
    let response = client(&server).get_db2_saas_backup(&options).await.unwrap();
    assert!(response.result.unwrap().backups.is_empty());
}

#[tokio::test]
async fn test_invalid_options_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let err = client(&server)
        .get_db2_saas_connection_info(&GetDb2SaasConnectionInfoOptions::new("", CRN))
        .await
        .unwrap_err();

    assert_eq!(err.code(), codes::STRUCT_VALIDATION_ERROR);
    assert_eq!(err.component().unwrap().name, "ibmcloud-db2saas");
}

#[tokio::test]
async fn test_error_response_is_tagged_with_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/backups"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"code": "bad_request", "message": "Invalid x-db-profile"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .get_db2_saas_backup(&GetDb2SaasBackupOptions::new("bogus"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), codes::HTTP_REQUEST_ERR);
    let problem = err.http_problem().unwrap();
    assert_eq!(problem.status_code, 400);
    assert_eq!(problem.operation_id, "get_db2_saas_backup");
    assert_eq!(problem.message, "Invalid x-db-profile");
    assert_eq!(problem.service.as_deref(), Some("db2saas"));
    assert!(err.component().is_some());
}

#[tokio::test]
async fn test_malformed_body_is_unmarshal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/scaling/auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"storage_unit": 7})))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_db2_saas_autoscale(&GetDb2SaasAutoscaleOptions::new(CRN))
        .await
        .unwrap_err();
    assert_eq!(err.code(), codes::UNMARSHAL_RESP_ERROR);
}

#[tokio::test]
async fn test_gzip_compresses_request_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dbsettings/whitelistips"))
        .and(header("content-encoding", "gzip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    client.set_enable_gzip_compression(true);
    assert!(client.enable_gzip_compression());

    client
        .post_db2_saas_allowlist(&PostDb2SaasAllowlistOptions::new(CRN, Vec::new()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_external_config_from_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manage/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"backups": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");
        std::env::set_var("DB2SAAS_EXT_TEST_AUTH_TYPE", "noAuth");
        std::env::set_var("DB2SAAS_EXT_TEST_URL", server.uri());
        std::env::set_var("DB2SAAS_EXT_TEST_ENABLE_RETRIES", "true");

        let client = Db2saasV1::new_using_external_config(
            Db2saasV1Options::default().with_service_name("db2saas_ext_test"),
        );

        for key in ["AUTH_TYPE", "URL", "ENABLE_RETRIES"] {
            std::env::remove_var(format!("DB2SAAS_EXT_TEST_{key}"));
        }
        std::env::remove_var("IBM_CREDENTIALS_FILE");
        client.unwrap()
    };

    assert_eq!(client.service_url(), server.uri());
    client.get_db2_saas_backup(&GetDb2SaasBackupOptions::new(CRN)).await.unwrap();
}

#[test]
fn test_external_config_without_credentials_is_env_auth_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");

    let err = Db2saasV1::new_using_external_config(
        Db2saasV1Options::default().with_service_name("db2saas_missing_test"),
    )
    .unwrap_err();

    std::env::remove_var("IBM_CREDENTIALS_FILE");
    assert_eq!(err.code(), codes::ENV_AUTH_ERROR);
}

#[test]
fn test_explicit_url_overrides_external_config() {
    let options = Db2saasV1Options::new(Arc::new(NoAuthAuthenticator))
        .with_service_name("db2saas_url_test")
        .with_url("https://db2.example.com/dbapi/v4/");
    let client = {
        let _guard = ENV_LOCK.lock().unwrap();
        Db2saasV1::new_using_external_config(options).unwrap()
    };
    assert_eq!(client.service_url(), "https://db2.example.com/dbapi/v4");

    let bad = Db2saasV1Options::new(Arc::new(NoAuthAuthenticator))
        .with_service_name("db2saas_url_test")
        .with_url("not a url");
    let err = {
        let _guard = ENV_LOCK.lock().unwrap();
        Db2saasV1::new_using_external_config(bad).unwrap_err()
    };
    assert_eq!(err.code(), codes::URL_SET_ERROR);
}
