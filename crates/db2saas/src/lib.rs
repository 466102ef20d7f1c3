//! # Db2 SaaS administration client
//!
//! Typed access to the Db2 on Cloud admin API (`/dbapi/v4`): connection
//! details, IP allowlist, database users, autoscaling, configuration
//! settings and backups.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ibmcloud_core::IamAuthenticator;
//! use ibmcloud_db2saas::{Db2saasV1, Db2saasV1Options, GetDb2SaasBackupOptions};
//!
//! # async fn run() -> ibmcloud_common::SdkResult<()> {
//! let authenticator = Arc::new(IamAuthenticator::new("my-api-key")?);
//! let client = Db2saasV1::new(Db2saasV1Options::new(authenticator))?;
//!
//! let backups = client
//!     .get_db2_saas_backup(&GetDb2SaasBackupOptions::new("crn:v1:bluemix:public:dashdb-for-transactions:..."))
//!     .await?;
//! println!("{:?}", backups.result);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

use ibmcloud_common::ComponentInfo;

pub mod client;
// Field-for-field mirrors of the API's request and response bodies.
#[allow(missing_docs)]
pub mod models;
#[allow(missing_docs)]
pub mod options;

pub use client::{Db2saasV1, Db2saasV1Options};
pub use models::*;
pub use options::*;

/// Default endpoint of the service.
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.db2.saas.ibm.com/dbapi/v4";

/// Name used to look up external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "db2saas";

/// Endpoint template; `region` defaults to `us-south`.
pub const PARAMETERIZED_SERVICE_URL: &str = "https://{region}.db2.saas.ibm.com/dbapi/v4";

/// Service name and version sent in the analytics header.
pub(crate) const SDK_SERVICE_NAME: &str = "db2saas";
pub(crate) const SDK_SERVICE_VERSION: &str = "V1";

/// Identifies this crate on every error it raises.
pub fn component_info() -> ComponentInfo {
    ComponentInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
