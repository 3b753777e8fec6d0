//! Schedule configs and participant role quotas.
//!
//! A [`ScheduleConfig`] is the named bundle a tenant's admins manage: one
//! or more recurrence expressions plus the role quotas to fill for each
//! celebration. Persistence, tenant isolation, and editing flows belong to
//! the surrounding application; the engine only reads the expression list
//! during reconciliation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// One participant role and how many people it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuota {
    pub name: String,
    pub required: u32,
}

/// Ordered list of role quotas. Names are unique within the set and every
/// headcount is positive; both are enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRoleSet {
    roles: Vec<RoleQuota>,
}

impl ParticipantRoleSet {
    pub fn new(roles: Vec<RoleQuota>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for role in &roles {
            if role.required == 0 {
                return Err(ScheduleError::ZeroHeadcount {
                    name: role.name.clone(),
                });
            }
            if !seen.insert(role.name.as_str()) {
                return Err(ScheduleError::DuplicateRole {
                    name: role.name.clone(),
                });
            }
        }
        Ok(Self { roles })
    }

    pub fn roles(&self) -> &[RoleQuota] {
        &self.roles
    }

    pub fn total_required(&self) -> u32 {
        self.roles.iter().map(|role| role.required).sum()
    }
}

/// Fallback quotas applied when an event has no config attached.
pub fn default_role_set() -> ParticipantRoleSet {
    ParticipantRoleSet {
        roles: vec![
            RoleQuota {
                name: "Celebrant".to_string(),
                required: 1,
            },
            RoleQuota {
                name: "Lector".to_string(),
                required: 2,
            },
            RoleQuota {
                name: "Altar server".to_string(),
                required: 2,
            },
            RoleQuota {
                name: "Eucharistic minister".to_string(),
                required: 2,
            },
            RoleQuota {
                name: "Musician".to_string(),
                required: 1,
            },
        ],
    }
}

/// A named, tenant-owned bundle of recurrence expressions and role quotas.
///
/// The store holds these as JSON; `tenant` is an opaque owner id the engine
/// never interprets. Events reference a config by id, optionally — an event
/// without a config falls back to [`default_role_set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub name: String,
    pub tenant: String,
    /// Recurrence expression strings. The UI manages exactly one, but the
    /// stored shape is a list.
    pub expressions: Vec<String>,
    pub roles: ParticipantRoleSet,
}
