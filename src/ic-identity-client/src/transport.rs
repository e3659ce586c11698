use async_trait::async_trait;
use candid::Principal;
use ic_agent::{Agent, AgentError};
use std::fmt;

/// Carries Candid-encoded calls to the identity canister.
///
/// [`AgentTransport`] is the production implementation. Anything that can
/// answer a method name and an encoded argument with encoded reply bytes
/// will do.
#[async_trait]
pub trait IdentityTransport: Send + Sync {
    /// Issue a query call and return the reply bytes.
    async fn query(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, AgentError>;

    /// Issue an update call, wait for it to complete and return the reply bytes.
    async fn update(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, AgentError>;
}

/// An [`IdentityTransport`] over an [`Agent`] bound to one canister.
#[derive(Clone)]
pub struct AgentTransport {
    agent: Agent,
    canister_id: Principal,
}

impl AgentTransport {
    /// Send calls through `agent` to `canister_id`.
    pub fn new(agent: Agent, canister_id: Principal) -> Self {
        Self { agent, canister_id }
    }

    /// The agent the calls go through.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The canister the calls go to.
    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }
}

impl fmt::Debug for AgentTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTransport")
            .field("canister_id", &self.canister_id.to_text())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityTransport for AgentTransport {
    async fn query(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, AgentError> {
        self.agent
            .query(&self.canister_id, method)
            .with_arg(arg)
            .call()
            .await
    }

    async fn update(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, AgentError> {
        self.agent
            .update(&self.canister_id, method)
            .with_arg(arg)
            .call_and_wait()
            .await
    }
}
