//! View types returned by the Auto Scaling adapter.
//!
//! These are deliberately narrow projections of the provider's wire shapes:
//! just the fields fleetwire reads when wiring groups to load balancers.
//! They serialize to JSON for CLI output and test fixtures. The full domain
//! model stays with the provider.

use serde::{Deserialize, Serialize};

// ── Groups ─────────────────────────────────────────────────────────

/// A described auto scaling group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetail {
    pub name: String,
    pub min_size: i32,
    pub max_size: i32,
    pub desired_capacity: i32,
    /// Group-level status (set while the group is being deleted).
    pub status: Option<String>,
    pub availability_zones: Vec<String>,
    /// Classic load balancers currently associated with the group.
    pub load_balancer_names: Vec<String>,
    /// Target groups currently associated with the group.
    pub target_group_arns: Vec<String>,
    pub instances: Vec<GroupInstance>,
}

/// An instance inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInstance {
    pub id: String,
    pub availability_zone: String,
    /// Provider lifecycle state, e.g. `Pending`, `InService`, `Terminating`.
    pub lifecycle_state: String,
    /// `Healthy` or `Unhealthy`.
    pub health_status: String,
}

// ── Attachments ────────────────────────────────────────────────────

/// A classic load balancer association and its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerAttachment {
    pub name: String,
    pub state: AttachmentState,
}

/// A target group association and its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroupAttachment {
    pub arn: String,
    pub state: AttachmentState,
}

/// Lifecycle of a load balancer or target group association.
///
/// The provider reports these as strings; unrecognized values are carried
/// through verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentState {
    /// Instances are being registered.
    Adding,
    /// All instances are registered.
    Added,
    /// At least one instance passed the load balancer's health checks.
    InService,
    /// Instances are being deregistered.
    Removing,
    /// The association has been deleted.
    Removed,
    Unknown(String),
}

impl AttachmentState {
    /// Parse the provider's state string.
    pub fn parse(state: &str) -> Self {
        match state {
            "Adding" => Self::Adding,
            "Added" => Self::Added,
            "InService" => Self::InService,
            "Removing" => Self::Removing,
            "Removed" => Self::Removed,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Adding => "Adding",
            Self::Added => "Added",
            Self::InService => "InService",
            Self::Removing => "Removing",
            Self::Removed => "Removed",
            Self::Unknown(other) => other,
        }
    }

    /// Registered and passing traffic.
    pub fn is_in_service(&self) -> bool {
        matches!(self, Self::InService)
    }

    /// Registration or deregistration still in flight.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Adding | Self::Removing)
    }
}

impl std::fmt::Display for AttachmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
