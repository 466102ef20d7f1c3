//! # IAM Policy Management client
//!
//! Manage access and authorization policies (v1 and v2), custom roles and
//! policy templates in an IBM Cloud account.
//!
//! Policies written through the v2 API carry a [`V2PolicyRule`] that is
//! either a single time-based condition or a group of conditions; the JSON
//! shape decides which variant is decoded. Likewise [`ControlResponse`]
//! resolves to enriched roles when the service includes role actions.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

use ibmcloud_common::ComponentInfo;

pub mod client;
// Field-for-field mirrors of the API's request and response bodies.
#[allow(missing_docs)]
pub mod models;
#[allow(missing_docs)]
pub mod options;

pub use client::{IamPolicyManagementV1, IamPolicyManagementV1Options};
pub use models::*;
pub use options::*;

/// Default endpoint of the service.
pub const DEFAULT_SERVICE_URL: &str = "https://iam.cloud.ibm.com";

/// Name used to look up external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "iam_policy_management";

/// Service name and version sent in the analytics header.
pub(crate) const SDK_SERVICE_NAME: &str = "iam_policy_management";
pub(crate) const SDK_SERVICE_VERSION: &str = "V1";

/// Identifies this crate on every error it raises.
pub fn component_info() -> ComponentInfo {
    ComponentInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
