use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::{Permission, Role};

pub type PermissionSet = BTreeSet<Permission>;

const ALL_PERMISSIONS: [Permission; Permission::COUNT] = Permission::ordered();

static ROLE_PERMISSIONS: OnceLock<[PermissionSet; Role::COUNT]> = OnceLock::new();

/// Allow-list for `role`. The table is built on first use and never mutated.
pub fn permissions_for(role: Role) -> &'static PermissionSet {
    &role_permissions()[role.index()]
}

/// Hierarchy level used by `can_act_as`. `Admin` holds the strict maximum.
pub const fn rank(role: Role) -> u8 {
    match role {
        Role::Admin => 100,
        Role::HeadCoach => 90,
        Role::TeamManager => 80,
        Role::MedicalStaff => 70,
        Role::AssistantCoach => 60,
        Role::StrengthConditioning => 50,
        Role::Physiotherapist => 50,
        Role::Analyst => 40,
        Role::Player => 10,
    }
}

fn role_permissions() -> &'static [PermissionSet; Role::COUNT] {
    ROLE_PERMISSIONS.get_or_init(|| {
        Role::ordered().map(|role| grants(role).iter().copied().collect())
    })
}

fn grants(role: Role) -> &'static [Permission] {
    use Permission::*;

    match role {
        Role::Admin => &ALL_PERMISSIONS,
        Role::HeadCoach => &[
            ViewAllPlayers,
            EditPlayerData,
            AccessMedicalData,
            ViewWellnessData,
            ReviewWellness,
            ViewTrainingLoad,
            ManageTraining,
            ManageMatches,
            ViewAnalytics,
            UploadData,
            GenerateAiInsights,
            ManageTeam,
        ],
        Role::AssistantCoach => &[
            ViewAllPlayers,
            ViewWellnessData,
            ViewTrainingLoad,
            ManageTraining,
            ManageMatches,
            ViewAnalytics,
            UploadData,
        ],
        Role::StrengthConditioning => &[
            ViewAllPlayers,
            ViewWellnessData,
            ReviewWellness,
            ViewTrainingLoad,
            ManageTraining,
            ViewAnalytics,
            UploadData,
            GenerateAiInsights,
        ],
        Role::MedicalStaff => &[
            ViewAllPlayers,
            AccessMedicalData,
            EditMedicalData,
            ViewWellnessData,
            SubmitWellness,
            ReviewWellness,
            ViewTrainingLoad,
            UploadData,
        ],
        Role::Physiotherapist => &[
            ViewAllPlayers,
            AccessMedicalData,
            EditMedicalData,
            ViewWellnessData,
            ReviewWellness,
            ViewTrainingLoad,
        ],
        Role::Analyst => &[
            ViewAllPlayers,
            ViewWellnessData,
            ViewTrainingLoad,
            ViewAnalytics,
            UploadData,
            GenerateAiInsights,
        ],
        Role::TeamManager => &[
            ViewAllPlayers,
            EditPlayerData,
            ManageMatches,
            ViewAnalytics,
            UploadData,
            ManageTeam,
        ],
        Role::Player => &[ViewOwnData, SubmitWellness],
    }
}
