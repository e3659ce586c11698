//! Delegation arguments and replies.
use crate::canister_api::types::{Nanoseconds, PublicKey, TimestampNanoseconds};
use candid::CandidType;
use serde::Deserialize;
use serde_bytes::ByteBuf;

/// The arguments to the `prepare_delegation` method.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PrepareDelegationArgs {
    /// The session key the delegation is issued to.
    pub session_key: PublicKey,
    /// Upper bound on the delegation lifetime. `None` lets the canister pick.
    pub max_time_to_live: Option<Nanoseconds>,
}

/// The payload of a successful `prepare_delegation`.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PrepareDelegationSuccess {
    /// The canister signature public key of the user.
    pub user_key: PublicKey,
    /// When the prepared delegation expires.
    pub expiration: TimestampNanoseconds,
}

/// The reply of `prepare_delegation`.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub enum PrepareDelegationResponse {
    /// The caller is not linked to any user.
    NotFound,
    /// The delegation was prepared and can now be fetched.
    Success(PrepareDelegationSuccess),
}

/// The arguments to the `get_delegation` method.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GetDelegationArgs {
    /// The session key passed to `prepare_delegation`.
    pub session_key: PublicKey,
    /// The expiration returned by `prepare_delegation`.
    pub expiration: TimestampNanoseconds,
}

/// A delegation of authority to a session key.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Delegation {
    /// The session key.
    pub pubkey: PublicKey,
    /// When the delegation stops being valid.
    pub expiration: TimestampNanoseconds,
}

/// A delegation together with the canister signature over it.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SignedDelegation {
    /// The signature, made with the user key.
    pub signature: ByteBuf,
    /// The signed delegation.
    pub delegation: Delegation,
}

/// The reply of `get_delegation`.
#[derive(CandidType, Debug, Clone, Deserialize, PartialEq, Eq)]
pub enum GetDelegationResponse {
    /// No delegation was prepared for this session key and expiration.
    NotFound,
    /// The signed delegation.
    Success(SignedDelegation),
}
