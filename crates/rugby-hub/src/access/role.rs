use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AccessError;

/// Job function of a squad member or staff user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    HeadCoach,
    AssistantCoach,
    StrengthConditioning,
    MedicalStaff,
    Physiotherapist,
    Analyst,
    TeamManager,
    Player,
}

impl Role {
    pub const COUNT: usize = 9;

    /// Every role, in declaration order.
    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Admin,
            Self::HeadCoach,
            Self::AssistantCoach,
            Self::StrengthConditioning,
            Self::MedicalStaff,
            Self::Physiotherapist,
            Self::Analyst,
            Self::TeamManager,
            Self::Player,
        ]
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::HeadCoach => "head_coach",
            Self::AssistantCoach => "assistant_coach",
            Self::StrengthConditioning => "strength_conditioning",
            Self::MedicalStaff => "medical_staff",
            Self::Physiotherapist => "physiotherapist",
            Self::Analyst => "analyst",
            Self::TeamManager => "team_manager",
            Self::Player => "player",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::HeadCoach => "Head Coach",
            Self::AssistantCoach => "Assistant Coach",
            Self::StrengthConditioning => "Strength & Conditioning",
            Self::MedicalStaff => "Medical Staff",
            Self::Physiotherapist => "Physiotherapist",
            Self::Analyst => "Performance Analyst",
            Self::TeamManager => "Team Manager",
            Self::Player => "Player",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    /// Accepts the snake_case label, tolerating case, spaces and hyphens
    /// (`Head Coach`, `head-coach`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = super::label_key(raw);
        Self::ordered()
            .into_iter()
            .find(|role| role.label() == key)
            .ok_or_else(|| AccessError::InvalidRole(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_matches_discriminants() {
        for (position, role) in Role::ordered().into_iter().enumerate() {
            assert_eq!(role.index(), position);
        }
    }

    #[test]
    fn parses_labels_leniently() {
        assert_eq!("head_coach".parse::<Role>().unwrap(), Role::HeadCoach);
        assert_eq!("Head Coach".parse::<Role>().unwrap(), Role::HeadCoach);
        assert_eq!(" medical-staff ".parse::<Role>().unwrap(), Role::MedicalStaff);
        for role in Role::ordered() {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn rejects_unknown_roles() {
        match "kit_manager".parse::<Role>() {
            Err(AccessError::InvalidRole(raw)) => assert_eq!(raw, "kit_manager"),
            other => panic!("expected invalid role, got {other:?}"),
        }
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&Role::StrengthConditioning).unwrap();
        assert_eq!(json, "\"strength_conditioning\"");
        let role: Role = serde_json::from_str("\"team_manager\"").unwrap();
        assert_eq!(role, Role::TeamManager);
    }
}
