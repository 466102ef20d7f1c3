//! Connection details and the IP allowlist

use ibmcloud_common::{SdkResult, ValidationError};
use serde::{Deserialize, Serialize};

/// Connection details of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessConnectionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<SuccessConnectionInfoPublic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<SuccessConnectionInfoPrivate>,
}

/// Public endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessConnectionInfoPublic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(rename = "databaseName", default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(rename = "sslPort", default, skip_serializing_if = "Option::is_none")]
    pub ssl_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(rename = "databaseVersion", default, skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
}

/// Private endpoint, reachable over a VPE or private service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessConnectionInfoPrivate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(rename = "databaseName", default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(rename = "sslPort", default, skip_serializing_if = "Option::is_none")]
    pub ssl_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(rename = "databaseVersion", default, skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
    #[serde(rename = "private_serviceName", default, skip_serializing_if = "Option::is_none")]
    pub private_service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_service_offering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpe_service_crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_vpc_endpoint_service: Option<String>,
}

/// An allowlisted address with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    /// IPv4 or IPv6 address, optionally in CIDR form.
    pub address: String,
    pub description: String,
}

impl IpAddress {
    /// # Errors
    /// `struct-validation-error` when either value is empty.
    pub fn new(address: impl Into<String>, description: impl Into<String>) -> SdkResult<Self> {
        let ip = Self { address: address.into(), description: description.into() };
        let mut errors = ValidationError::new();
        errors.require("address", &ip.address);
        errors.require("description", &ip.description);
        errors.into_result()?;
        Ok(ip)
    }
}

/// The current allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessGetAllowlistIPs {
    pub ip_addresses: Vec<IpAddress>,
}

/// Result of replacing the allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPostAllowedlistIPs {
    pub status: String,
}
