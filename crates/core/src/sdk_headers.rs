//! Telemetry headers sent with every generated operation

/// Version reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying per-operation analytics.
pub const HEADER_SDK_ANALYTICS: &str = "X-IBMCloud-SDK-Analytics";

/// `ibm-cloud-sdk-rust/<version> (lang=rust; arch=<arch>; os=<os>)`
pub fn user_agent() -> String {
    format!(
        "ibm-cloud-sdk-rust/{SDK_VERSION} (lang=rust; arch={}; os={})",
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}

/// Headers identifying the SDK and the operation being invoked.
pub fn get_sdk_headers(
    service_name: &str,
    service_version: &str,
    operation_id: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("User-Agent", user_agent()),
        (
            HEADER_SDK_ANALYTICS,
            format!(
                "service_name={service_name};service_version={service_version};operation_id={operation_id}"
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_header_format() {
        let headers = get_sdk_headers("db2saas", "V1", "GetDb2SaasBackup");
        let analytics = headers
            .iter()
            .find(|(name, _)| *name == HEADER_SDK_ANALYTICS)
            .map(|(_, value)| value.as_str());
        assert_eq!(
            analytics,
            Some("service_name=db2saas;service_version=V1;operation_id=GetDb2SaasBackup")
        );
    }

    #[test]
    fn test_user_agent_names_platform() {
        let agent = user_agent();
        assert!(agent.starts_with("ibm-cloud-sdk-rust/"));
        assert!(agent.contains("lang=rust"));
        assert!(agent.contains(std::env::consts::OS));
    }
}
