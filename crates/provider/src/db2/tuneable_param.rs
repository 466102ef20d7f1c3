//! The `db2_tuneable_param` data source

use async_trait::async_trait;
use chrono::Utc;
use ibmcloud_db2saas::{
    CustomSettingsDb, CustomSettingsDbm, CustomSettingsRegistry, Db2saasV1,
    GetDb2SaasTuneableParamOptions, TuneableParam,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::{flatten_settings, setting_attributes};
use crate::datasource::{ConfigValidator, DataSource, DataSourceWithConfigValidators};
use crate::diagnostics::Diagnostics;
use crate::schema::{AttributeKind, Schema, SchemaAttribute};
use crate::validators::NoArguments;
use crate::value::{Config, State};

/// Lists the Db2 parameters that can be tuned.
#[derive(Debug, Clone)]
pub struct Db2TuneableParamDataSource {
    client: Db2saasV1,
}

impl Db2TuneableParamDataSource {
    /// A data source reading through `client`.
    pub fn new(client: Db2saasV1) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for Db2TuneableParamDataSource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_db2_tuneable_param")
    }

    fn schema(&self) -> Schema {
        let group = |names: &[&str], description: &str| {
            SchemaAttribute::computed(AttributeKind::Block(setting_attributes(
                names,
                SchemaAttribute::computed,
            )))
            .with_description(description)
        };

        let tuneable_param = [
            (
                "db".to_string(),
                group(
                    CustomSettingsDb::SETTING_NAMES,
                    "Tunable parameters related to the Db2 database instance.",
                ),
            ),
            (
                "dbm".to_string(),
                group(
                    CustomSettingsDbm::SETTING_NAMES,
                    "Tunable parameters related to the Db2 instance manager (dbm).",
                ),
            ),
            (
                "registry".to_string(),
                group(
                    CustomSettingsRegistry::SETTING_NAMES,
                    "Tunable parameters related to the Db2 registry.",
                ),
            ),
        ]
        .into_iter()
        .collect();

        Schema::new("Tunable parameters of a Db2 SaaS deployment.")
            .with_attribute("id", SchemaAttribute::computed(AttributeKind::String))
            .with_attribute(
                "tuneable_param",
                SchemaAttribute::computed(AttributeKind::Block(tuneable_param)),
            )
    }

    #[instrument(skip_all, fields(data_source = "db2_tuneable_param"))]
    async fn read(&self, _config: &Config) -> Result<State, Diagnostics> {
        let response = self
            .client
            .get_db2_saas_tuneable_param(&GetDb2SaasTuneableParamOptions::default())
            .await
            .map_err(|err| {
                let mut diags = Diagnostics::new();
                diags.add_sdk_error("Unable to read Db2 tuneable parameters", &err);
                diags
            })?;
        debug!(status = response.status_code, "read tuneable parameters");

        let mut state = State::new();
        state.set_id(Utc::now().to_rfc3339());
        if let Some(tuneable_param) = response.result.and_then(|r| r.tuneable_param) {
            state.set("tuneable_param", single_block(flatten(&tuneable_param)));
        }
        Ok(state)
    }
}

impl DataSourceWithConfigValidators for Db2TuneableParamDataSource {
    fn config_validators(&self) -> Vec<Box<dyn ConfigValidator>> {
        vec![Box::new(NoArguments)]
    }
}

fn flatten(tuneable_param: &TuneableParam) -> Map<String, Value> {
    let mut groups = Map::new();
    if let Some(db) = &tuneable_param.db {
        groups.insert("db".to_string(), single_block(flatten_settings(db.settings())));
    }
    if let Some(dbm) = &tuneable_param.dbm {
        groups.insert("dbm".to_string(), single_block(flatten_settings(dbm.settings())));
    }
    if let Some(registry) = &tuneable_param.registry {
        groups.insert("registry".to_string(), single_block(flatten_settings(registry.settings())));
    }
    groups
}

fn single_block(values: Map<String, Value>) -> Value {
    Value::Array(vec![Value::Object(values)])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ibmcloud_core::NoAuthAuthenticator;
    use ibmcloud_db2saas::Db2saasV1Options;
    use serde_json::json;

    use super::*;

    fn data_source() -> Db2TuneableParamDataSource {
        let client = Db2saasV1::new(Db2saasV1Options::new(Arc::new(NoAuthAuthenticator))).unwrap();
        Db2TuneableParamDataSource::new(client)
    }

    #[test]
    fn type_name_is_prefixed() {
        assert_eq!(data_source().metadata("ibm"), "ibm_db2_tuneable_param");
    }

    #[test]
    fn schema_is_computed_lower_snake() {
        let schema = data_source().schema();
        assert_eq!(schema.configurable().count(), 0);
        let groups = schema.attributes["tuneable_param"].attributes().unwrap();
        let db = groups["db"].attributes().unwrap();
        assert!(db.contains_key("act_sortmem_limit"));
        assert!(db.contains_key("locktimeout"));
        let registry = groups["registry"].attributes().unwrap();
        assert!(registry.contains_key("db2_workload"));
        assert_eq!(registry.len(), CustomSettingsRegistry::SETTING_NAMES.len());
    }

    #[test]
    fn flatten_keeps_only_present_groups_and_values() {
        let mut db = CustomSettingsDb::default();
        db.set("LOCKTIMEOUT", "30");
        let flattened = flatten(&TuneableParam { db: Some(db), dbm: None, registry: None });
        assert_eq!(Value::Object(flattened), json!({"db": [{"locktimeout": "30"}]}));
    }

    #[test]
    fn arguments_are_rejected() {
        let config = Config::from_value(json!({"deployment_id": "crn"})).unwrap();
        assert!(data_source().validate_data_source_config(&config).has_error());
        assert!(data_source().validate_data_source_config(&Config::default()).is_empty());
    }
}
