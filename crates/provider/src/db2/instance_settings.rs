//! Autoscale and custom settings of a Db2 instance
//!
//! A Db2 instance resource accepts two optional blocks, `autoscale_config`
//! and `custom_setting_config`. Both are applied through the Db2 SaaS API
//! once the instance exists. Failures there are reported as warnings: the
//! instance is already created and stays usable with default settings.

use std::collections::BTreeMap;

use ibmcloud_db2saas::{
    CustomSettingsDb, CustomSettingsDbm, CustomSettingsRegistry, Db2saasV1,
    PostDb2SaasDbConfigurationOptions, PutDb2SaasAutoscaleOptions,
};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::setting_attributes;
use crate::datasource::ConfigValidator;
use crate::diagnostics::Diagnostics;
use crate::schema::{AttributeKind, SchemaAttribute};
use crate::validators::{KnownKeys, NumericString};
use crate::value::{block_of, AttributePath, Config};

const AUTOSCALE_CONFIG: &str = "autoscale_config";
const CUSTOM_SETTING_CONFIG: &str = "custom_setting_config";

/// Instance CRN escaped for the `x-db-profile` header.
pub fn db_profile(instance_crn: &str) -> String {
    url::form_urlencoded::byte_serialize(instance_crn.as_bytes()).collect()
}

/// The `autoscale_config` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoscaleConfig {
    /// Turn storage autoscaling on or off.
    pub enabled: Option<bool>,
    /// Storage utilization percentage.
    pub threshold: Option<i64>,
    /// Minutes.
    pub over_time_period: Option<f64>,
    /// Minutes.
    pub pause_limit: Option<i64>,
    /// Allow scaling beyond the plan's limit.
    pub allow_plan_limit: Option<bool>,
}

impl AutoscaleConfig {
    fn to_options(&self, x_db_profile: &str) -> PutDb2SaasAutoscaleOptions {
        let mut options = PutDb2SaasAutoscaleOptions::new(x_db_profile);
        if let Some(enabled) = self.enabled {
            options = options.with_auto_scaling_enabled(enabled);
        }
        if let Some(threshold) = self.threshold {
            options = options.with_auto_scaling_threshold(threshold);
        }
        if let Some(period) = self.over_time_period {
            options = options.with_auto_scaling_over_time_period(period);
        }
        if let Some(pause) = self.pause_limit {
            options = options.with_auto_scaling_pause_limit(pause);
        }
        if let Some(allow) = self.allow_plan_limit {
            options = options.with_auto_scaling_allow_plan_limit(allow);
        }
        options
    }
}

/// The `custom_setting_config` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomSettingConfig {
    /// Database configuration.
    pub db: Option<CustomSettingsDb>,
    /// Database manager configuration.
    pub dbm: Option<CustomSettingsDbm>,
    /// Registry variables.
    pub registry: Option<CustomSettingsRegistry>,
}

impl CustomSettingConfig {
    fn to_options(&self, x_db_profile: &str) -> PostDb2SaasDbConfigurationOptions {
        let mut options = PostDb2SaasDbConfigurationOptions::new(x_db_profile);
        if let Some(db) = &self.db {
            options = options.with_db(db.clone());
        }
        if let Some(dbm) = &self.dbm {
            options = options.with_dbm(dbm.clone());
        }
        if let Some(registry) = &self.registry {
            options = options.with_registry(registry.clone());
        }
        options
    }
}

/// Settings parsed from a Db2 instance configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Db2InstanceSettings {
    /// Parsed `autoscale_config`, when present.
    pub autoscale: Option<AutoscaleConfig>,
    /// Parsed `custom_setting_config`, when present.
    pub custom_settings: Option<CustomSettingConfig>,
}

impl Db2InstanceSettings {
    /// Schema of the two blocks, for the instance resource to embed.
    pub fn schema_attributes() -> BTreeMap<String, SchemaAttribute> {
        let autoscale: BTreeMap<String, SchemaAttribute> = [
            ("auto_scaling_threshold", AttributeKind::String),
            ("auto_scaling_over_time_period", AttributeKind::String),
            ("auto_scaling_enabled", AttributeKind::Bool),
            ("auto_scaling_allow_plan_limit", AttributeKind::Bool),
            ("auto_scaling_pause_limit", AttributeKind::Int64),
        ]
        .into_iter()
        .map(|(name, kind)| (name.to_string(), SchemaAttribute::optional(kind)))
        .collect();

        let group = |names: &[&str]| {
            SchemaAttribute::optional(AttributeKind::Block(setting_attributes(
                names,
                SchemaAttribute::optional,
            )))
        };
        let custom: BTreeMap<String, SchemaAttribute> = [
            ("db".to_string(), group(CustomSettingsDb::SETTING_NAMES)),
            ("dbm".to_string(), group(CustomSettingsDbm::SETTING_NAMES)),
            ("registry".to_string(), group(CustomSettingsRegistry::SETTING_NAMES)),
        ]
        .into_iter()
        .collect();

        BTreeMap::from([
            (
                AUTOSCALE_CONFIG.to_string(),
                SchemaAttribute::optional(AttributeKind::Block(autoscale))
                    .with_description("The db2 auto scaling config"),
            ),
            (
                CUSTOM_SETTING_CONFIG.to_string(),
                SchemaAttribute::optional(AttributeKind::Block(custom))
                    .with_description("Db and Dbm configurations"),
            ),
        ])
    }

    /// Numeric autoscale values and known setting names.
    pub fn config_validators() -> Vec<Box<dyn ConfigValidator>> {
        let autoscale = |name: &str| AttributePath::root(AUTOSCALE_CONFIG).attribute(name);
        let custom = |name: &str| AttributePath::root(CUSTOM_SETTING_CONFIG).attribute(name);
        vec![
            Box::new(NumericString::<i64>::new(autoscale("auto_scaling_threshold")).between(0, 100)),
            Box::new(NumericString::<f64>::new(autoscale("auto_scaling_over_time_period")).min(0.0)),
            Box::new(NumericString::<i64>::new(autoscale("auto_scaling_pause_limit")).min(0)),
            Box::new(KnownKeys::new(custom("db"), CustomSettingsDb::SETTING_NAMES)),
            Box::new(KnownKeys::new(custom("dbm"), CustomSettingsDbm::SETTING_NAMES)),
            Box::new(KnownKeys::new(custom("registry"), CustomSettingsRegistry::SETTING_NAMES)),
        ]
    }

    /// Validate and parse the two blocks of `config`.
    ///
    /// # Errors
    /// The diagnostics of every failed validator.
    pub fn from_config(config: &Config) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        for validator in Self::config_validators() {
            diags.extend(validator.validate(config));
        }
        if diags.has_error() {
            return Err(diags);
        }

        Ok(Self {
            autoscale: config.block(AUTOSCALE_CONFIG).map(parse_autoscale),
            custom_settings: config.block(CUSTOM_SETTING_CONFIG).map(parse_custom_settings),
        })
    }

    /// True when neither block was configured.
    pub fn is_empty(&self) -> bool {
        self.autoscale.is_none() && self.custom_settings.is_none()
    }

    /// Apply the settings to the instance `instance_crn`.
    ///
    /// Returns a warning per failed call; never errors.
    #[instrument(skip_all)]
    pub async fn apply(&self, client: &Db2saasV1, instance_crn: &str) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let profile = db_profile(instance_crn);

        if let Some(autoscale) = &self.autoscale {
            match client.put_db2_saas_autoscale(&autoscale.to_options(&profile)).await {
                Ok(response) => info!(status = response.status_code, "updated autoscaling"),
                Err(err) => {
                    warn!(code = err.code(), error = %err.message(), "autoscaling update failed");
                    diags.add_warning(
                        "Autoscaling settings were not applied",
                        format!("{} (code: {})", err.message(), err.code()),
                    );
                }
            }
        }

        if let Some(custom) = &self.custom_settings {
            match client.post_db2_saas_db_configuration(&custom.to_options(&profile)).await {
                Ok(response) => info!(status = response.status_code, "applied custom settings"),
                Err(err) => {
                    warn!(code = err.code(), error = %err.message(), "custom settings failed");
                    diags.add_warning(
                        "Custom settings were not applied",
                        format!("{} (code: {})", err.message(), err.code()),
                    );
                }
            }
        }

        diags
    }
}

fn parse_autoscale(block: &Map<String, Value>) -> AutoscaleConfig {
    AutoscaleConfig {
        enabled: block.get("auto_scaling_enabled").and_then(Value::as_bool),
        threshold: number(block, "auto_scaling_threshold"),
        over_time_period: number(block, "auto_scaling_over_time_period"),
        pause_limit: number(block, "auto_scaling_pause_limit"),
        allow_plan_limit: block.get("auto_scaling_allow_plan_limit").and_then(Value::as_bool),
    }
}

/// A number written as a JSON number or a numeric string.
fn number<T: std::str::FromStr>(block: &Map<String, Value>, name: &str) -> Option<T> {
    match block.get(name)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

fn parse_custom_settings(block: &Map<String, Value>) -> CustomSettingConfig {
    CustomSettingConfig {
        db: settings_group(block, "db"),
        dbm: settings_group(block, "dbm"),
        registry: settings_group(block, "registry"),
    }
}

/// Common surface of the generated settings groups.
trait SettingsGroup: Default {
    fn set(&mut self, name: &str, value: String) -> bool;
    fn is_empty(&self) -> bool;
}

macro_rules! settings_group {
    ($($ty:ty),+) => {
        $(impl SettingsGroup for $ty {
            fn set(&mut self, name: &str, value: String) -> bool {
                <$ty>::set(self, name, value)
            }

            fn is_empty(&self) -> bool {
                <$ty>::is_empty(self)
            }
        })+
    };
}

settings_group!(CustomSettingsDb, CustomSettingsDbm, CustomSettingsRegistry);

/// `None` when the group is absent or sets nothing.
fn settings_group<G: SettingsGroup>(block: &Map<String, Value>, name: &str) -> Option<G> {
    let values = block_of(block.get(name)?)?;
    let mut group = G::default();
    for (key, value) in values {
        if let Some(text) = value.as_str() {
            group.set(key, text.to_string());
        }
    }
    (!group.is_empty()).then_some(group)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const CRN: &str = "crn:v1:bluemix:public:dashdb-for-transactions:us-south:a/abc123:def456::";

    #[test]
    fn db_profile_is_query_escaped() {
        assert_eq!(
            db_profile(CRN),
            "crn%3Av1%3Abluemix%3Apublic%3Adashdb-for-transactions%3Aus-south%3Aa%2Fabc123%3Adef456%3A%3A"
        );
    }

    #[test]
    fn parses_both_blocks() {
        let config = Config::from_value(json!({
            "name": "db2-instance",
            "autoscale_config": [{
                "auto_scaling_enabled": true,
                "auto_scaling_threshold": "90",
                "auto_scaling_over_time_period": "15",
                "auto_scaling_pause_limit": 70,
                "auto_scaling_allow_plan_limit": false
            }],
            "custom_setting_config": [{
                "db": [{"locktimeout": "30", "applheapsz": null}],
                "registry": [{"db2_workload": "ANALYTICS"}],
                "dbm": []
            }]
        }))
        .unwrap();

        let settings = Db2InstanceSettings::from_config(&config).unwrap();
        assert_eq!(
            settings.autoscale,
            Some(AutoscaleConfig {
                enabled: Some(true),
                threshold: Some(90),
                over_time_period: Some(15.0),
                pause_limit: Some(70),
                allow_plan_limit: Some(false),
            })
        );
        let custom = settings.custom_settings.unwrap();
        assert_eq!(custom.db.unwrap().get("LOCKTIMEOUT"), Some("30"));
        assert_eq!(custom.registry.unwrap().get("DB2_WORKLOAD"), Some("ANALYTICS"));
        assert!(custom.dbm.is_none());
    }

    #[test]
    fn rejects_non_numeric_and_unknown_settings() {
        let config = Config::from_value(json!({
            "autoscale_config": [{"auto_scaling_threshold": "high"}],
            "custom_setting_config": [{"db": [{"not_a_setting": "1"}]}]
        }))
        .unwrap();
        let diags = Db2InstanceSettings::from_config(&config).unwrap_err();
        assert_eq!(diags.errors().count(), 2);
    }

    #[test]
    fn absent_blocks_parse_as_empty() {
        let settings = Db2InstanceSettings::from_config(&Config::default()).unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn schema_exposes_both_blocks() {
        let attributes = Db2InstanceSettings::schema_attributes();
        let autoscale = attributes[AUTOSCALE_CONFIG].attributes().unwrap();
        assert_eq!(autoscale["auto_scaling_pause_limit"].kind, AttributeKind::Int64);
        let custom = attributes[CUSTOM_SETTING_CONFIG].attributes().unwrap();
        assert!(custom["dbm"].attributes().unwrap().contains_key("wlm_disp_min_util"));
    }
}
