//! Db2 SaaS data sources and instance settings

mod instance_settings;
mod tuneable_param;

pub use instance_settings::{db_profile, AutoscaleConfig, CustomSettingConfig, Db2InstanceSettings};
pub use tuneable_param::Db2TuneableParamDataSource;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::schema::{AttributeKind, SchemaAttribute};

/// Lower-snake attribute names for a settings group.
pub(crate) fn setting_attributes(
    names: &[&str],
    attribute: fn(AttributeKind) -> SchemaAttribute,
) -> BTreeMap<String, SchemaAttribute> {
    names
        .iter()
        .map(|name| (name.to_ascii_lowercase(), attribute(AttributeKind::String)))
        .collect()
}

/// Present settings of a group, keyed by lower-snake name.
pub(crate) fn flatten_settings(settings: Vec<(&str, Option<&str>)>) -> Map<String, Value> {
    settings
        .into_iter()
        .filter_map(|(name, value)| {
            value.map(|v| (name.to_ascii_lowercase(), Value::String(v.to_string())))
        })
        .collect()
}
