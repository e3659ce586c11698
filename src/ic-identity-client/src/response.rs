use crate::canister_api::types::auth_principal as wire_principal;
use crate::canister_api::types::delegation as wire_delegation;
use candid::Principal;
use ic_agent::identity::{Delegation, SignedDelegation};

/// Whether the caller's principal is known to the identity canister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckAuthPrincipalResponse {
    /// The caller is a current auth principal.
    Success,
    /// The caller still uses a legacy principal.
    Legacy,
    /// The caller is not linked to any user.
    NotFound,
}

impl CheckAuthPrincipalResponse {
    /// The snake case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Legacy => "legacy",
            Self::NotFound => "not_found",
        }
    }
}

impl From<wire_principal::CheckAuthPrincipalResponse> for CheckAuthPrincipalResponse {
    fn from(value: wire_principal::CheckAuthPrincipalResponse) -> Self {
        match value {
            wire_principal::CheckAuthPrincipalResponse::NotFound => Self::NotFound,
            wire_principal::CheckAuthPrincipalResponse::Success => Self::Success,
            wire_principal::CheckAuthPrincipalResponse::Legacy => Self::Legacy,
        }
    }
}

/// The outcome of migrating a legacy principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrateLegacyPrincipalResponse {
    /// The caller now authenticates as `new_principal`.
    Success {
        /// The principal replacing the legacy one.
        new_principal: Principal,
    },
    /// The caller was migrated by an earlier call.
    AlreadyMigrated,
    /// The caller is not linked to any user.
    NotFound,
    /// The canister failed to migrate the caller.
    InternalError {
        /// The canister's description of the failure.
        error: String,
    },
}

impl MigrateLegacyPrincipalResponse {
    /// The snake case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::AlreadyMigrated => "already_migrated",
            Self::NotFound => "not_found",
            Self::InternalError { .. } => "internal_error",
        }
    }
}

impl From<wire_principal::MigrateLegacyPrincipalResponse> for MigrateLegacyPrincipalResponse {
    fn from(value: wire_principal::MigrateLegacyPrincipalResponse) -> Self {
        match value {
            wire_principal::MigrateLegacyPrincipalResponse::NotFound => Self::NotFound,
            wire_principal::MigrateLegacyPrincipalResponse::Success(success) => Self::Success {
                new_principal: success.new_principal,
            },
            wire_principal::MigrateLegacyPrincipalResponse::InternalError(error) => {
                Self::InternalError { error }
            }
            wire_principal::MigrateLegacyPrincipalResponse::AlreadyMigrated => {
                Self::AlreadyMigrated
            }
        }
    }
}

/// The outcome of asking the canister to sign a delegation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareDelegationResponse {
    /// The delegation is ready to be fetched with `get_delegation`.
    Success {
        /// The DER-encoded canister signature public key of the user.
        user_key: Vec<u8>,
        /// Nanoseconds since the epoch at which the delegation expires.
        expiration: u64,
    },
    /// The caller is not linked to any user.
    NotFound,
}

impl PrepareDelegationResponse {
    /// The snake case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::NotFound => "not_found",
        }
    }
}

impl From<wire_delegation::PrepareDelegationResponse> for PrepareDelegationResponse {
    fn from(value: wire_delegation::PrepareDelegationResponse) -> Self {
        match value {
            wire_delegation::PrepareDelegationResponse::NotFound => Self::NotFound,
            wire_delegation::PrepareDelegationResponse::Success(success) => Self::Success {
                user_key: success.user_key.into_vec(),
                expiration: success.expiration,
            },
        }
    }
}

/// A signed delegation, or the lack of one.
#[derive(Debug, Clone)]
pub enum GetDelegationResponse {
    /// The delegation prepared for the session key.
    Success {
        /// The delegation. Its `targets` are always `None`.
        delegation: Delegation,
        /// The canister signature over `delegation`.
        signature: Vec<u8>,
    },
    /// No delegation was prepared for this session key and expiration.
    NotFound,
}

impl GetDelegationResponse {
    /// The snake case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::NotFound => "not_found",
        }
    }

    /// The delegation and its signature, in the form `ic-agent` uses for delegated identities.
    pub fn into_signed_delegation(self) -> Option<SignedDelegation> {
        match self {
            Self::Success {
                delegation,
                signature,
            } => Some(SignedDelegation {
                delegation,
                signature,
            }),
            Self::NotFound => None,
        }
    }
}

impl From<wire_delegation::GetDelegationResponse> for GetDelegationResponse {
    fn from(value: wire_delegation::GetDelegationResponse) -> Self {
        match value {
            wire_delegation::GetDelegationResponse::NotFound => Self::NotFound,
            wire_delegation::GetDelegationResponse::Success(signed) => Self::Success {
                delegation: Delegation {
                    pubkey: signed.delegation.pubkey.into_vec(),
                    expiration: signed.delegation.expiration,
                    targets: None,
                },
                signature: signed.signature.into_vec(),
            },
        }
    }
}
