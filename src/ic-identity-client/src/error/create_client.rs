use ic_agent::AgentError;
use thiserror::Error;

/// Errors related to building an identity client.
#[derive(Error, Debug)]
pub enum CreateIdentityClientError {
    /// The url of the replica or boundary node could not be parsed.
    #[error("invalid url")]
    InvalidUrl(#[source] url::ParseError),

    /// The agent could not be built for the given url and identity.
    #[error("failed to create agent")]
    CreateAgent(#[source] AgentError),

    /// The root key of a non-mainnet replica could not be fetched.
    #[error("failed to fetch root key")]
    FetchRootKey(#[source] AgentError),
}
