use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AccessError;

/// A single grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewAllPlayers,
    ViewOwnData,
    EditPlayerData,
    AccessMedicalData,
    EditMedicalData,
    ViewWellnessData,
    SubmitWellness,
    ReviewWellness,
    ViewTrainingLoad,
    ManageTraining,
    ManageMatches,
    ViewAnalytics,
    UploadData,
    GenerateAiInsights,
    ManageTeam,
    ManageUsers,
}

impl Permission {
    pub const COUNT: usize = 16;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::ViewAllPlayers,
            Self::ViewOwnData,
            Self::EditPlayerData,
            Self::AccessMedicalData,
            Self::EditMedicalData,
            Self::ViewWellnessData,
            Self::SubmitWellness,
            Self::ReviewWellness,
            Self::ViewTrainingLoad,
            Self::ManageTraining,
            Self::ManageMatches,
            Self::ViewAnalytics,
            Self::UploadData,
            Self::GenerateAiInsights,
            Self::ManageTeam,
            Self::ManageUsers,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ViewAllPlayers => "view_all_players",
            Self::ViewOwnData => "view_own_data",
            Self::EditPlayerData => "edit_player_data",
            Self::AccessMedicalData => "access_medical_data",
            Self::EditMedicalData => "edit_medical_data",
            Self::ViewWellnessData => "view_wellness_data",
            Self::SubmitWellness => "submit_wellness",
            Self::ReviewWellness => "review_wellness",
            Self::ViewTrainingLoad => "view_training_load",
            Self::ManageTraining => "manage_training",
            Self::ManageMatches => "manage_matches",
            Self::ViewAnalytics => "view_analytics",
            Self::UploadData => "upload_data",
            Self::GenerateAiInsights => "generate_ai_insights",
            Self::ManageTeam => "manage_team",
            Self::ManageUsers => "manage_users",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ViewAllPlayers => "View every player profile in the squad",
            Self::ViewOwnData => "View your own profile, wellness and load data",
            Self::EditPlayerData => "Edit player profiles and positions",
            Self::AccessMedicalData => "Read injury and medical records",
            Self::EditMedicalData => "Create and update injury and medical records",
            Self::ViewWellnessData => "View squad wellness submissions and trends",
            Self::SubmitWellness => "Submit daily wellness questionnaires",
            Self::ReviewWellness => "Annotate wellness submissions after staff review",
            Self::ViewTrainingLoad => "View GPS and training load data",
            Self::ManageTraining => "Plan and edit training sessions",
            Self::ManageMatches => "Manage fixtures and match-day squads",
            Self::ViewAnalytics => "View match and performance analytics",
            Self::UploadData => "Upload CSV exports into the system",
            Self::GenerateAiInsights => "Request generated player and match insights",
            Self::ManageTeam => "Manage squad membership and staff assignments",
            Self::ManageUsers => "Create users and assign roles",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = super::label_key(raw);
        Self::ordered()
            .into_iter()
            .find(|permission| permission.label() == key)
            .ok_or_else(|| AccessError::InvalidPermission(raw.to_string()))
    }
}
