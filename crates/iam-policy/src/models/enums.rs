//! Documented values of enumerated string fields
//!
//! Values the service adds later decode into `Other` and are sent back
//! unchanged.

use ibmcloud_common::string_enum;

string_enum! {
    /// Kind of policy
    pub enum PolicyType {
        Access => "access",
        Authorization => "authorization",
    }
}

string_enum! {
    /// Lifecycle state of a policy or policy template
    pub enum PolicyState {
        Active => "active",
        Deleted => "deleted",
    }
}

/// Policy templates share the policy lifecycle states.
pub type PolicyTemplateState = PolicyState;

string_enum! {
    /// Response format of policy reads
    pub enum PolicyFormat {
        Display => "display",
        IncludeLastPermit => "include_last_permit",
    }
}

string_enum! {
    /// Service category filter
    pub enum ServiceType {
        Service => "service",
        PlatformService => "platform_service",
    }
}

string_enum! {
    /// Sort keys of v1 policy listings; prefix with `-` for descending
    pub enum PolicySort {
        Id => "id",
        Type => "type",
        Href => "href",
        CreatedAt => "created_at",
        CreatedById => "created_by_id",
        LastModifiedAt => "last_modified_at",
        LastModifiedById => "last_modified_by_id",
        State => "state",
    }
}

string_enum! {
    /// Time-based rule operators
    pub enum RuleOperator {
        TimeLessThan => "timeLessThan",
        TimeLessThanOrEquals => "timeLessThanOrEquals",
        TimeGreaterThan => "timeGreaterThan",
        TimeGreaterThanOrEquals => "timeGreaterThanOrEquals",
        DateTimeLessThan => "dateTimeLessThan",
        DateTimeLessThanOrEquals => "dateTimeLessThanOrEquals",
        DateTimeGreaterThan => "dateTimeGreaterThan",
        DateTimeGreaterThanOrEquals => "dateTimeGreaterThanOrEquals",
        DayOfWeekEquals => "dayOfWeekEquals",
        DayOfWeekAnyOf => "dayOfWeekAnyOf",
    }
}

string_enum! {
    /// How a group of conditions combines
    pub enum ConditionOperator {
        And => "and",
        Or => "or",
    }
}

string_enum! {
    /// Operators of subject, resource and tag attributes
    pub enum AttributeOperator {
        StringEquals => "stringEquals",
        StringExists => "stringExists",
        StringMatch => "stringMatch",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_pass_descending_prefix_through() {
        assert_eq!(PolicySort::CreatedAt.as_str(), "created_at");
        let descending = PolicySort::from("-created_at");
        assert!(!descending.is_documented());
        assert_eq!(descending.to_string(), "-created_at");
    }

    #[test]
    fn rule_operators_are_case_sensitive() {
        assert_eq!(RuleOperator::from("dayOfWeekAnyOf"), RuleOperator::DayOfWeekAnyOf);
        assert_eq!(
            RuleOperator::from("dayofweekanyof"),
            RuleOperator::Other("dayofweekanyof".to_string())
        );
        assert_eq!(RuleOperator::DOCUMENTED.len(), 10);
    }
}
