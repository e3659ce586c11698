use ic_agent::AgentError;
use thiserror::Error;

/// Errors related to calling the identity canister.
///
/// Replies the canister models itself (`NotFound`, `AlreadyMigrated` and so on)
/// are never errors; they come back as response variants.
#[derive(Error, Debug)]
pub enum IdentityCallError {
    /// The caller's identity has no public key to use as a session key.
    #[error("the identity has no public key to use as a session key")]
    MissingSessionKey,

    /// The arguments could not be Candid-encoded.
    #[error("failed to encode arguments of '{method}'")]
    EncodeArguments {
        /// The method being called.
        method: &'static str,
        /// The encoder error.
        #[source]
        source: candid::Error,
    },

    /// The agent rejected or failed the call.
    #[error("call to '{method}' failed")]
    Call {
        /// The method being called.
        method: &'static str,
        /// The transport error, unchanged.
        #[source]
        source: AgentError,
    },

    /// The reply did not decode as the declared response type.
    #[error("failed to decode the reply of '{method}'")]
    DecodeResponse {
        /// The method being called.
        method: &'static str,
        /// The decoder error.
        #[source]
        source: candid::Error,
    },
}
