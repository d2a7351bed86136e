//! Caller roles.
//!
//! A caller presents a plain identity string. `"BA"` is the business analyst;
//! any other identity is a team role whose name is the identity itself, so team
//! names and identities share one namespace.

use std::fmt;

use crate::errors::CoreError;

pub const ROLE_BA: &str = "BA";
pub const ROLE_DEV: &str = "DEV";
pub const ROLE_QA: &str = "QA";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    BusinessAnalyst,
    Team(String),
}

impl Role {
    #[must_use]
    pub fn from_identity(identity: &str) -> Self {
        if identity == ROLE_BA {
            Self::BusinessAnalyst
        } else {
            Self::Team(identity.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BusinessAnalyst => ROLE_BA,
            Self::Team(name) => name,
        }
    }

    /// Require the business analyst role.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` naming `BA` for any other role.
    pub fn require_business_analyst(&self) -> Result<(), CoreError> {
        match self {
            Self::BusinessAnalyst => Ok(()),
            Self::Team(_) => Err(CoreError::Forbidden {
                required: ROLE_BA.to_string(),
            }),
        }
    }

    /// Require that the caller identity is exactly `team`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` naming `team` when the identity differs.
    pub fn require_team(&self, team: &str) -> Result<(), CoreError> {
        if self.as_str() == team {
            Ok(())
        } else {
            Err(CoreError::Forbidden {
                required: team.to_string(),
            })
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ba_identity_is_business_analyst() {
        assert_eq!(Role::from_identity("BA"), Role::BusinessAnalyst);
        assert_eq!(Role::from_identity("ba"), Role::Team("ba".into()));
        assert!(Role::from_identity("BA").require_business_analyst().is_ok());
    }

    #[test]
    fn team_role_cannot_act_as_business_analyst() {
        let err = Role::from_identity("DEV")
            .require_business_analyst()
            .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: requires role BA");
    }

    #[test]
    fn team_check_is_exact() {
        let dev = Role::from_identity("DEV");
        assert!(dev.require_team("DEV").is_ok());
        assert!(matches!(
            dev.require_team("QA"),
            Err(CoreError::Forbidden { required }) if required == "QA"
        ));
        assert!(dev.require_team("dev").is_err());
    }
}
