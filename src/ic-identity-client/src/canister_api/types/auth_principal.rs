//! Replies about the caller's principal.
use candid::{CandidType, Principal};
use serde::Deserialize;

/// The reply of `check_auth_principal`.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub enum CheckAuthPrincipalResponse {
    /// The caller is not linked to any user.
    NotFound,
    /// The caller is a current auth principal.
    Success,
    /// The caller is a legacy principal that has not been migrated yet.
    Legacy,
}

/// The payload of a successful migration.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MigrateLegacyPrincipalSuccess {
    /// The principal that replaces the legacy one.
    pub new_principal: Principal,
}

/// The reply of `migrate_legacy_principal`.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub enum MigrateLegacyPrincipalResponse {
    /// The caller is not linked to any user.
    NotFound,
    /// The legacy principal was migrated.
    Success(MigrateLegacyPrincipalSuccess),
    /// The canister failed while migrating.
    InternalError(String),
    /// A previous call already migrated the caller.
    AlreadyMigrated,
}
