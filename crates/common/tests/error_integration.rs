//! Integration tests for error reporting across validation and HTTP layers

use ibmcloud_common::{
    codes, string_enum, ComponentInfo, ErrorClassification, ErrorKind, ErrorSeverity, HttpProblem,
    SdkError, SdkResult, Validate, ValidationError,
};
use serde_json::json;

string_enum! {
    /// Instance plan
    pub enum Plan {
        Standard => "standard",
        Enterprise => "enterprise",
    }
}

struct CreateWidgetOptions {
    name: String,
    tags: Vec<String>,
    owner: Option<String>,
    replicas: i64,
}

impl Validate for CreateWidgetOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("name", &self.name);
        errors.require("tags", &self.tags);
        errors.require("owner", &self.owner);
        if !(1..=10).contains(&self.replicas) {
            errors.add_field_error("replicas", "must be between 1 and 10");
        }
        errors.into_result()
    }
}

#[test]
fn test_validation_reports_every_missing_field() {
    let options = CreateWidgetOptions {
        name: String::new(),
        tags: Vec::new(),
        owner: Some(String::new()),
        replicas: 0,
    };

    let err = options.validate().unwrap_err();
    assert_eq!(err.code(), codes::STRUCT_VALIDATION_ERROR);
    assert_eq!(err.kind(), ErrorKind::Validation);
    for field in ["name", "tags", "owner", "replicas"] {
        assert!(err.message().contains(field), "missing {field} in {}", err.message());
    }
}

#[test]
fn test_complete_options_validate() {
    let options = CreateWidgetOptions {
        name: "w".to_string(),
        tags: vec!["a".to_string()],
        owner: Some("me".to_string()),
        replicas: 3,
    };
    assert!(options.validate().is_ok());
}

#[test]
fn test_http_problem_survives_component_wrapping() {
    let body = json!({"errors": [{"code": "not_found", "message": "Policy was not found"}]});
    let problem = HttpProblem::from_response(404, "get_policy", Some(body.to_string()), "Not Found")
        .with_service("iam_policy_management");

    let err = SdkError::http(problem)
        .with_component(ComponentInfo::new("ibmcloud-iam-policy", "0.1.0"));

    assert_eq!(err.code(), codes::HTTP_REQUEST_ERR);
    assert_eq!(err.message(), "Policy was not found");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.component().map(ToString::to_string).as_deref(), Some("ibmcloud-iam-policy@0.1.0"));

    let problem = err.http_problem().expect("problem");
    assert_eq!(problem.error_code.as_deref(), Some("not_found"));
    assert_eq!(problem.service.as_deref(), Some("iam_policy_management"));
    assert_eq!(err.severity(), ErrorSeverity::Info);
    assert!(!err.is_retryable());
}

#[test]
fn test_server_errors_are_retryable_and_relabelled_codes_stick() {
    let problem = HttpProblem::from_response(503, "list_widgets", None, "Service Unavailable");
    let err = SdkError::http(problem);
    assert!(err.is_retryable());
    assert_eq!(err.message(), "Service Unavailable");

    let err = SdkError::url(codes::URL_RESOLVE_ERROR, "bad url").with_code(codes::URL_SET_ERROR);
    assert_eq!(err.code(), codes::URL_SET_ERROR);
    assert_eq!(err.kind(), ErrorKind::Url);
    assert_eq!(err.message(), "bad url");
}

#[test]
fn test_open_enum_round_trips_unknown_values() {
    let plans: Vec<Plan> = serde_json::from_value(json!(["standard", "performance"])).unwrap();
    assert_eq!(plans[0], Plan::Standard);
    assert_eq!(plans[1], Plan::Other("performance".to_string()));
    assert!(!plans[1].is_documented());
    assert_eq!(serde_json::to_value(&plans).unwrap(), json!(["standard", "performance"]));
    assert_eq!(Plan::DOCUMENTED, &["standard", "enterprise"]);
}
