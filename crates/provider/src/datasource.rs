//! Data source contract
//!
//! Terraform validates a configuration before it reads, so a data source
//! that declares validators never sees a configuration they reject.

use async_trait::async_trait;

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::{Config, State};

/// A read-only Terraform data source.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name under `provider_type_name`, e.g. `ibm_db2_tuneable_param`.
    fn metadata(&self, provider_type_name: &str) -> String;

    /// Attributes the data source accepts and computes.
    fn schema(&self) -> Schema;

    /// Read the current state for `config`.
    ///
    /// # Errors
    /// Diagnostics with at least one error when the read fails.
    async fn read(&self, config: &Config) -> Result<State, Diagnostics>;
}

/// A declarative check over a whole configuration.
pub trait ConfigValidator: Send + Sync {
    /// Plain-text description for documentation.
    fn description(&self) -> String;

    /// Diagnostics for `config`; empty when it passes.
    fn validate(&self, config: &Config) -> Diagnostics;
}

/// A data source whose configuration is checked by [`ConfigValidator`]s.
pub trait DataSourceWithConfigValidators: DataSource {
    /// Validators run before every read.
    fn config_validators(&self) -> Vec<Box<dyn ConfigValidator>>;

    /// Run every validator and merge their diagnostics, in order.
    fn validate_data_source_config(&self, config: &Config) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for validator in self.config_validators() {
            diags.extend(validator.validate(config));
        }
        diags
    }
}
