//! This module contains the names of the methods that are exposed by the canister.

/// Whether the caller's principal is known, and in which form.
pub const CHECK_AUTH_PRINCIPAL: &str = "check_auth_principal";
/// Fetch a delegation signed by an earlier `prepare_delegation`.
pub const GET_DELEGATION: &str = "get_delegation";
/// Move the caller off its legacy principal.
pub const MIGRATE_LEGACY_PRINCIPAL: &str = "migrate_legacy_principal";
/// Have the canister sign a delegation for a session key.
pub const PREPARE_DELEGATION: &str = "prepare_delegation";
