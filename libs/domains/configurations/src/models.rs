use chrono::{DateTime, Utc};
use domain_pricing::{CostBreakdown, EnvironmentSize, ResourceRequest, ResourceTotals};
use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::ConfigurationError;

/// Catalog of LaaS option names accepted in persisted configurations
pub const OPTION_CATALOG: [&str; 4] = [
    "Sandbox",
    "Developer Machines",
    "Pipeline Combined",
    "Custom System",
];

/// Length of generated share tokens
const SHARE_TOKEN_LEN: usize = 24;

/// One immutable snapshot in a configuration's history.
///
/// A version captures the composed resource requests together with the
/// totals, resolved size and cost breakdown computed for them at save
/// time. Once appended it is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigVersion {
    pub resource_requests: Vec<ResourceRequest>,
    pub totals: ResourceTotals,
    pub environment_size: EnvironmentSize,
    pub costs: CostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

impl ConfigVersion {
    /// Build a version from client-supplied data, stamping author and time.
    pub fn from_input(input: VersionInput, created_by: Uuid) -> Self {
        Self {
            resource_requests: input.resource_requests,
            totals: input.totals,
            environment_size: input.environment_size,
            costs: input.costs,
            notes: input.notes,
            created_at: Utc::now(),
            created_by,
        }
    }
}

/// A named, owned, versioned environment configuration.
///
/// Always holds at least one version; `current_version` equals the most
/// recently appended version or the version most recently reverted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: Uuid,
    pub is_public: bool,
    pub share_token: String,
    pub current_version: ConfigVersion,
    pub versions: Vec<ConfigVersion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_catalog_names(requests: &[ResourceRequest]) -> Result<(), validator::ValidationError> {
    for request in requests {
        if !OPTION_CATALOG.contains(&request.name.as_str()) {
            let mut error = validator::ValidationError::new("unknown_option_name");
            error.message = Some(format!("'{}' is not a known LaaS option", request.name).into());
            return Err(error);
        }
    }
    Ok(())
}

/// Client-supplied version data: the request list plus the calculation
/// result being snapshotted
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionInput {
    #[validate(nested)]
    #[validate(custom(function = validate_catalog_names))]
    pub resource_requests: Vec<ResourceRequest>,
    pub totals: ResourceTotals,
    pub environment_size: EnvironmentSize,
    pub costs: CostBreakdown,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// DTO for creating a new configuration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfiguration {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[validate(nested)]
    pub initial_version: VersionInput,
}

/// DTO for updating an existing configuration
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfiguration {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub is_public: Option<bool>,
    /// When present, appended as a new version which becomes current
    #[validate(nested)]
    pub new_version: Option<VersionInput>,
}

/// Filters for listing configurations, chosen by the service layer (the
/// caller never supplies owner scoping directly)
#[derive(Debug, Clone)]
pub struct ConfigurationFilter {
    pub owner: Option<Uuid>,
    pub is_public: Option<bool>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ConfigurationFilter {
    fn default() -> Self {
        Self {
            owner: None,
            is_public: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> usize {
    50
}

impl Configuration {
    /// Create a configuration from a CreateConfiguration DTO.
    ///
    /// The initial version becomes both the history's first entry and the
    /// current version; there is no zero-version state.
    pub fn new(input: CreateConfiguration, owner: Uuid) -> Self {
        let now = Utc::now();
        let initial = ConfigVersion::from_input(input.initial_version, owner);

        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            owner,
            is_public: input.is_public,
            share_token: generate_share_token(),
            current_version: initial.clone(),
            versions: vec![initial],
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply metadata updates and, when present, append the new version.
    pub fn apply_update(&mut self, update: UpdateConfiguration, acting_user: Uuid) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        if let Some(new_version) = update.new_version {
            self.add_version(new_version, acting_user);
        } else {
            self.updated_at = Utc::now();
        }
    }

    /// Append a new version and make it current.
    pub fn add_version(&mut self, input: VersionInput, created_by: Uuid) {
        let version = ConfigVersion::from_input(input, created_by);
        self.versions.push(version.clone());
        self.current_version = version;
        self.updated_at = Utc::now();
    }

    /// Repoint the current version at an entry of the history.
    ///
    /// The versions list itself is unmodified; reverting appends nothing.
    pub fn revert_to_version(&mut self, index: usize) -> Result<(), ConfigurationError> {
        let version = self.versions.get(index).ok_or(
            ConfigurationError::InvalidVersionIndex {
                index,
                len: self.versions.len(),
            },
        )?;

        self.current_version = version.clone();
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Random URL-safe token for share links
fn generate_share_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_version_input() -> VersionInput {
        let plan = domain_pricing::RatePlan::default();
        let requests = vec![ResourceRequest {
            name: "Sandbox".to_string(),
            quantity: 1,
            vcpu: 12.0,
            memory: 64.0,
            storage: 1024.0,
        }];
        let estimate = domain_pricing::calculate(&requests, &plan);

        VersionInput {
            resource_requests: requests,
            totals: estimate.totals,
            environment_size: estimate.environment_size,
            costs: estimate.costs,
            notes: None,
        }
    }

    fn sample_configuration(owner: Uuid) -> Configuration {
        Configuration::new(
            CreateConfiguration {
                name: "Team lab".to_string(),
                description: None,
                is_public: false,
                initial_version: sample_version_input(),
            },
            owner,
        )
    }

    #[test]
    fn test_new_configuration_has_exactly_one_version() {
        let owner = Uuid::now_v7();
        let config = sample_configuration(owner);

        assert_eq!(config.versions.len(), 1);
        assert_eq!(config.current_version, config.versions[0]);
        assert_eq!(config.current_version.created_by, owner);
        assert_eq!(config.share_token.len(), SHARE_TOKEN_LEN);
    }

    #[test]
    fn test_add_version_appends_and_becomes_current() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);
        let editor = Uuid::now_v7();

        config.add_version(sample_version_input(), editor);

        assert_eq!(config.versions.len(), 2);
        assert_eq!(config.current_version, config.versions[1]);
        assert_eq!(config.current_version.created_by, editor);
    }

    #[test]
    fn test_revert_repoints_without_appending() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);
        config.add_version(sample_version_input(), owner);
        let first = config.versions[0].clone();

        config.revert_to_version(0).unwrap();

        assert_eq!(config.versions.len(), 2);
        assert_eq!(config.current_version, first);
    }

    #[test]
    fn test_revert_is_idempotent() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);
        config.add_version(sample_version_input(), owner);

        config.revert_to_version(0).unwrap();
        let after_first = config.current_version.clone();
        config.revert_to_version(0).unwrap();

        assert_eq!(config.current_version, after_first);
        assert_eq!(config.versions.len(), 2);
    }

    #[test]
    fn test_revert_out_of_range_fails() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);
        config.add_version(sample_version_input(), owner);
        config.add_version(sample_version_input(), owner);

        // Three versions stored, index 5 is out of range
        let result = config.revert_to_version(5);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidVersionIndex { index: 5, len: 3 })
        ));
    }

    #[test]
    fn test_apply_update_metadata_only_keeps_versions() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);

        config.apply_update(
            UpdateConfiguration {
                name: Some("Renamed lab".to_string()),
                is_public: Some(true),
                ..Default::default()
            },
            owner,
        );

        assert_eq!(config.name, "Renamed lab");
        assert!(config.is_public);
        assert_eq!(config.versions.len(), 1);
    }

    #[test]
    fn test_apply_update_with_new_version() {
        let owner = Uuid::now_v7();
        let mut config = sample_configuration(owner);

        config.apply_update(
            UpdateConfiguration {
                new_version: Some(sample_version_input()),
                ..Default::default()
            },
            owner,
        );

        assert_eq!(config.versions.len(), 2);
    }

    #[test]
    fn test_version_input_rejects_unknown_option_name() {
        let mut input = sample_version_input();
        input.resource_requests[0].name = "Mystery Box".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_version_input_accepts_catalog_names() {
        let input = sample_version_input();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_share_tokens_are_unique() {
        let a = generate_share_token();
        let b = generate_share_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
