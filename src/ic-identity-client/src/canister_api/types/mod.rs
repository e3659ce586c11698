//! Arguments and replies of the identity canister, as they appear on the wire.
pub mod auth_principal;
pub mod delegation;

use candid::CandidType;
use serde::Deserialize;

/// The argument of methods that take no input.
#[derive(CandidType, Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct EmptyRecord {}

/// A DER-encoded public key.
pub type PublicKey = serde_bytes::ByteBuf;

/// Nanoseconds since the unix epoch.
pub type TimestampNanoseconds = u64;

/// A duration in nanoseconds.
pub type Nanoseconds = u64;
