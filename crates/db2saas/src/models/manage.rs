//! Autoscaling, configuration and backup models

use ibmcloud_common::string_enum;
use serde::{Deserialize, Serialize};

use super::settings::{CustomSettingsDb, CustomSettingsDbm, CustomSettingsRegistry};

string_enum! {
    /// Autoscaling switch; the API expects the strings `"true"`/`"false"`
    pub enum AutoScalingEnabled {
        True => "true",
        False => "false",
    }
}

impl From<bool> for AutoScalingEnabled {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::True
        } else {
            Self::False
        }
    }
}

string_enum! {
    /// Whether autoscaling may grow storage past the plan limit
    pub enum AllowPlanLimit {
        Yes => "YES",
        No => "NO",
    }
}

impl From<bool> for AllowPlanLimit {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Current autoscaling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessAutoScaling {
    pub auto_scaling_allow_plan_limit: bool,
    pub auto_scaling_enabled: bool,
    pub auto_scaling_max_storage: i64,
    pub auto_scaling_over_time_period: i64,
    pub auto_scaling_pause_limit: i64,
    pub auto_scaling_threshold: i64,
    pub storage_unit: String,
    pub storage_utilization_percentage: i64,
    pub support_auto_scaling: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessUpdateAutoScale {
    pub message: String,
}

/// Acknowledgement of a custom settings change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPostCustomSettings {
    pub description: String,
    pub id: String,
    pub status: String,
}

/// Settings that can be tuned on a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTuneableParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuneable_param: Option<TuneableParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneableParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<CustomSettingsDb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbm: Option<CustomSettingsDbm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<CustomSettingsRegistry>,
}

/// One backup of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    pub id: String,
    #[serde(rename = "type")]
    pub backup_type: String,
    pub status: String,
    pub created_at: String,
    /// Size in bytes.
    pub size: i64,
    /// Duration in seconds.
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessGetBackups {
    pub backups: Vec<Backup>,
}

/// The task started by an on-demand backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessCreateBackup {
    pub task: SuccessCreateBackupTask,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessCreateBackupTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn autoscale_enums_use_wire_strings() {
        assert_eq!(serde_json::to_value(AutoScalingEnabled::from(true)).unwrap(), json!("true"));
        assert_eq!(AllowPlanLimit::from(false).as_str(), "NO");
        assert_eq!(AllowPlanLimit::from("yes"), AllowPlanLimit::Other("yes".to_string()));
    }

    #[test]
    fn decodes_backups() {
        let backups: SuccessGetBackups = serde_json::from_value(json!({
            "backups": [{
                "id": "crn:v1:backup:1",
                "type": "scheduled",
                "status": "completed",
                "created_at": "2024-10-01T04:00:00Z",
                "size": 1024,
                "duration": 3600
            }]
        }))
        .unwrap();
        assert_eq!(backups.backups[0].backup_type, "scheduled");
        assert_eq!(backups.backups[0].size, 1024);
    }

    #[test]
    fn tuneable_params_round_trip() {
        let value = json!({
            "tuneable_param": {
                "db": {"LOCKTIMEOUT": "30", "LOGBUFSZ": "2048"},
                "registry": {"DB2_WORKLOAD": "ANALYTICS"}
            }
        });
        let params: SuccessTuneableParams = serde_json::from_value(value.clone()).unwrap();
        let param = params.tuneable_param.as_ref().unwrap();
        assert_eq!(param.db.as_ref().unwrap().get("locktimeout"), Some("30"));
        assert!(param.dbm.is_none());
        assert_eq!(serde_json::to_value(&params).unwrap(), value);
    }
}
