use crate::canister_api::types::auth_principal as wire_principal;
use crate::canister_api::types::delegation::{
    self as wire_delegation, GetDelegationArgs, PrepareDelegationArgs,
};
use crate::canister_api::types::EmptyRecord;
use crate::delegation_chain::DelegationChain;
use crate::error::{CreateIdentityClientError, IdentityCallError};
use crate::response::{
    CheckAuthPrincipalResponse, GetDelegationResponse, MigrateLegacyPrincipalResponse,
    PrepareDelegationResponse,
};
use crate::schema::{
    CallMode, MethodSchema, CHECK_AUTH_PRINCIPAL_METHOD, GET_DELEGATION_METHOD,
    MIGRATE_LEGACY_PRINCIPAL_METHOD, PREPARE_DELEGATION_METHOD,
};
use crate::transport::{AgentTransport, IdentityTransport};
use candid::{CandidType, Principal};
use ic_agent::{Agent, Identity};
use serde::de::DeserializeOwned;
use serde_bytes::ByteBuf;
use slog::{debug, Logger};
use std::fmt;
use std::sync::Arc;
use url::Url;

const MAINNET_GATEWAYS: [&str; 3] = ["https://icp0.io", "https://ic0.app", "https://icp-api.io"];

/// Whether `url` points at a mainnet boundary node, whose root key is built into the agent.
pub(crate) fn is_mainnet_url(url: &str) -> bool {
    let normalized = url.strip_suffix('/').unwrap_or(url);
    MAINNET_GATEWAYS.contains(&normalized)
}

/// Builds an [`IdentityClient`] that talks to the identity canister through an [`Agent`].
pub struct IdentityClientBuilder {
    identity: Arc<dyn Identity>,
    identity_canister: Principal,
    ic_url: String,
    logger: Logger,

    /// Fetch the root key from the replica before the first call.
    /// This is insecure and only meant for local replicas and testnets.
    /// When unset, the root key is fetched for any url that is not a mainnet gateway.
    fetch_root_key: Option<bool>,
}

impl IdentityClientBuilder {
    fn new(identity: Arc<dyn Identity>, identity_canister: Principal, ic_url: &str) -> Self {
        Self {
            identity,
            identity_canister,
            ic_url: ic_url.to_string(),
            logger: Logger::root(slog::Discard, slog::o!()),
            fetch_root_key: None,
        }
    }

    /// Log calls and their outcomes to `logger`.
    pub fn with_logger(self, logger: Logger) -> Self {
        Self { logger, ..self }
    }

    /// Force fetching (or not fetching) the replica's root key.
    pub fn with_fetch_root_key(self, fetch_root_key: bool) -> Self {
        Self {
            fetch_root_key: Some(fetch_root_key),
            ..self
        }
    }

    /// Build the agent and, when needed, fetch the root key.
    pub async fn build(self) -> Result<IdentityClient, CreateIdentityClientError> {
        let url = Url::parse(&self.ic_url).map_err(CreateIdentityClientError::InvalidUrl)?;
        let agent = Agent::builder()
            .with_url(url.as_str())
            .with_arc_identity(self.identity.clone())
            .build()
            .map_err(CreateIdentityClientError::CreateAgent)?;

        let fetch_root_key = self
            .fetch_root_key
            .unwrap_or_else(|| !is_mainnet_url(&self.ic_url));
        if fetch_root_key {
            debug!(self.logger, "Fetching root key from {}", self.ic_url);
            agent
                .fetch_root_key()
                .await
                .map_err(CreateIdentityClientError::FetchRootKey)?;
        }

        let logger = self
            .logger
            .new(slog::o!("canister" => self.identity_canister.to_text()));
        Ok(IdentityClient {
            identity: self.identity,
            transport: AgentTransport::new(agent, self.identity_canister),
            logger,
        })
    }
}

impl fmt::Debug for IdentityClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityClientBuilder")
            .field("identity_canister", &self.identity_canister.to_text())
            .field("ic_url", &self.ic_url)
            .field("fetch_root_key", &self.fetch_root_key)
            .finish_non_exhaustive()
    }
}

/// A client of the identity canister.
///
/// Each method is a single call. Replies the canister models (`NotFound`,
/// `AlreadyMigrated`, ...) come back as `Ok`; only encoding problems and
/// transport failures are errors. The client keeps no state between calls
/// and can be shared between tasks.
pub struct IdentityClient<T = AgentTransport> {
    identity: Arc<dyn Identity>,
    transport: T,
    logger: Logger,
}

impl IdentityClient<AgentTransport> {
    /// Start building a client that calls `identity_canister` at `ic_url` as `identity`.
    pub fn builder(
        identity: Arc<dyn Identity>,
        identity_canister: Principal,
        ic_url: &str,
    ) -> IdentityClientBuilder {
        IdentityClientBuilder::new(identity, identity_canister, ic_url)
    }

    /// Create a client with the default settings.
    pub async fn create(
        identity: Arc<dyn Identity>,
        identity_canister: Principal,
        ic_url: &str,
    ) -> Result<Self, CreateIdentityClientError> {
        Self::builder(identity, identity_canister, ic_url)
            .build()
            .await
    }
}

impl<T: IdentityTransport> IdentityClient<T> {
    /// Create a client that sends its calls through `transport`.
    pub fn with_transport(identity: Arc<dyn Identity>, transport: T) -> Self {
        Self {
            identity,
            transport,
            logger: Logger::root(slog::Discard, slog::o!()),
        }
    }

    /// Log calls and their outcomes to `logger`.
    pub fn with_logger(self, logger: Logger) -> Self {
        Self { logger, ..self }
    }

    /// The identity calls are made as.
    pub fn identity(&self) -> &Arc<dyn Identity> {
        &self.identity
    }

    /// The transport calls go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The DER-encoded public key of the caller's identity.
    pub fn session_key(&self) -> Result<Vec<u8>, IdentityCallError> {
        self.identity
            .public_key()
            .ok_or(IdentityCallError::MissingSessionKey)
    }

    /// Ask whether the caller's principal is a current auth principal, a legacy one, or unknown.
    pub async fn check_auth_principal(
        &self,
    ) -> Result<CheckAuthPrincipalResponse, IdentityCallError> {
        let response: wire_principal::CheckAuthPrincipalResponse = self
            .call(CHECK_AUTH_PRINCIPAL_METHOD, &EmptyRecord {})
            .await?;
        let response = CheckAuthPrincipalResponse::from(response);
        self.log_outcome(CHECK_AUTH_PRINCIPAL_METHOD, response.kind());
        Ok(response)
    }

    /// Migrate the caller's legacy principal.
    ///
    /// This changes canister state. Once a call succeeds, later calls answer
    /// [`MigrateLegacyPrincipalResponse::AlreadyMigrated`].
    pub async fn migrate_legacy_principal(
        &self,
    ) -> Result<MigrateLegacyPrincipalResponse, IdentityCallError> {
        let response: wire_principal::MigrateLegacyPrincipalResponse = self
            .call(MIGRATE_LEGACY_PRINCIPAL_METHOD, &EmptyRecord {})
            .await?;
        let response = MigrateLegacyPrincipalResponse::from(response);
        self.log_outcome(MIGRATE_LEGACY_PRINCIPAL_METHOD, response.kind());
        Ok(response)
    }

    /// Have the canister sign a delegation to the caller's own public key.
    ///
    /// The lifetime is left to the canister.
    pub async fn prepare_delegation(
        &self,
    ) -> Result<PrepareDelegationResponse, IdentityCallError> {
        let args = PrepareDelegationArgs {
            session_key: ByteBuf::from(self.session_key()?),
            max_time_to_live: None,
        };
        let response: wire_delegation::PrepareDelegationResponse =
            self.call(PREPARE_DELEGATION_METHOD, &args).await?;
        let response = PrepareDelegationResponse::from(response);
        self.log_outcome(PREPARE_DELEGATION_METHOD, response.kind());
        Ok(response)
    }

    /// Fetch the delegation prepared for `session_key` that expires at `expiration`.
    ///
    /// Both values are sent as given. They must match what was passed to and
    /// returned by `prepare_delegation`, otherwise the canister answers
    /// [`GetDelegationResponse::NotFound`].
    pub async fn get_delegation(
        &self,
        session_key: &[u8],
        expiration: u64,
    ) -> Result<GetDelegationResponse, IdentityCallError> {
        let args = GetDelegationArgs {
            session_key: ByteBuf::from(session_key.to_vec()),
            expiration,
        };
        let response: wire_delegation::GetDelegationResponse =
            self.call(GET_DELEGATION_METHOD, &args).await?;
        let response = GetDelegationResponse::from(response);
        self.log_outcome(GET_DELEGATION_METHOD, response.kind());
        Ok(response)
    }

    /// Prepare a delegation to the caller's public key and fetch it.
    ///
    /// Returns `None` if either step answers `NotFound`.
    pub async fn delegation_chain(&self) -> Result<Option<DelegationChain>, IdentityCallError> {
        let session_key = self.session_key()?;
        let (user_key, expiration) = match self.prepare_delegation().await? {
            PrepareDelegationResponse::Success {
                user_key,
                expiration,
            } => (user_key, expiration),
            PrepareDelegationResponse::NotFound => return Ok(None),
        };

        let Some(signed_delegation) = self
            .get_delegation(&session_key, expiration)
            .await?
            .into_signed_delegation()
        else {
            return Ok(None);
        };

        Ok(Some(DelegationChain {
            user_key,
            delegations: vec![signed_delegation],
        }))
    }

    async fn call<A, R>(&self, method: MethodSchema, arg: &A) -> Result<R, IdentityCallError>
    where
        A: CandidType + Sync,
        R: CandidType + DeserializeOwned,
    {
        let arg = candid::encode_one(arg).map_err(|source| IdentityCallError::EncodeArguments {
            method: method.name,
            source,
        })?;

        debug!(self.logger, "Calling {}", method.name; "mode" => ?method.mode);
        let reply = match method.mode {
            CallMode::Query => self.transport.query(method.name, arg).await,
            CallMode::Update => self.transport.update(method.name, arg).await,
        }
        .map_err(|source| IdentityCallError::Call {
            method: method.name,
            source,
        })?;

        candid::decode_one(&reply).map_err(|source| IdentityCallError::DecodeResponse {
            method: method.name,
            source,
        })
    }

    fn log_outcome(&self, method: MethodSchema, outcome: &str) {
        debug!(self.logger, "{} answered {}", method.name, outcome; "outcome" => outcome);
    }
}

impl<T: fmt::Debug> fmt::Debug for IdentityClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityClient")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canister_api::method_names::{
        CHECK_AUTH_PRINCIPAL, GET_DELEGATION, MIGRATE_LEGACY_PRINCIPAL, PREPARE_DELEGATION,
    };
    use crate::canister_api::types::auth_principal::MigrateLegacyPrincipalSuccess;
    use crate::canister_api::types::delegation::{PrepareDelegationSuccess, SignedDelegation};
    use crate::test_support::{test_identity, MockTransport, Reply};
    use candid::Decode;
    use ic_agent::identity::AnonymousIdentity;
    use ic_agent::AgentError;

    fn client_with(replies: Vec<(&'static str, Reply)>) -> IdentityClient<MockTransport> {
        IdentityClient::with_transport(test_identity(), MockTransport::new(replies))
    }

    fn signed_delegation(pubkey: Vec<u8>, expiration: u64) -> SignedDelegation {
        SignedDelegation {
            signature: ByteBuf::from(vec![0x5a; 32]),
            delegation: wire_delegation::Delegation {
                pubkey: ByteBuf::from(pubkey),
                expiration,
            },
        }
    }

    #[tokio::test]
    async fn check_auth_principal_not_found() {
        let client = client_with(vec![(
            CHECK_AUTH_PRINCIPAL,
            Reply::candid(&wire_principal::CheckAuthPrincipalResponse::NotFound),
        )]);

        let response = client.check_auth_principal().await.unwrap();
        assert_eq!(response, CheckAuthPrincipalResponse::NotFound);
        assert_eq!(response.kind(), "not_found");

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, CHECK_AUTH_PRINCIPAL);
        assert_eq!(calls[0].mode, CallMode::Query);
        assert_eq!(Decode!(&calls[0].arg, EmptyRecord).unwrap(), EmptyRecord {});
    }

    #[tokio::test]
    async fn check_auth_principal_success_and_legacy() {
        let client = client_with(vec![(
            CHECK_AUTH_PRINCIPAL,
            Reply::candid(&wire_principal::CheckAuthPrincipalResponse::Success),
        )]);
        let response = client.check_auth_principal().await.unwrap();
        assert_eq!(response.kind(), "success");

        let client = client_with(vec![(
            CHECK_AUTH_PRINCIPAL,
            Reply::candid(&wire_principal::CheckAuthPrincipalResponse::Legacy),
        )]);
        let response = client.check_auth_principal().await.unwrap();
        assert_eq!(response, CheckAuthPrincipalResponse::Legacy);
    }

    #[tokio::test]
    async fn migrate_legacy_principal_is_an_update() {
        let new_principal = Principal::from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let client = client_with(vec![(
            MIGRATE_LEGACY_PRINCIPAL,
            Reply::candid(&wire_principal::MigrateLegacyPrincipalResponse::Success(
                MigrateLegacyPrincipalSuccess { new_principal },
            )),
        )]);

        let response = client.migrate_legacy_principal().await.unwrap();
        assert_eq!(
            response,
            MigrateLegacyPrincipalResponse::Success { new_principal }
        );

        let calls = client.transport().calls();
        assert_eq!(calls[0].mode, CallMode::Update);
        assert_eq!(Decode!(&calls[0].arg, EmptyRecord).unwrap(), EmptyRecord {});
    }

    #[tokio::test]
    async fn migrate_legacy_principal_logical_outcomes() {
        let client = client_with(vec![(
            MIGRATE_LEGACY_PRINCIPAL,
            Reply::candid(&wire_principal::MigrateLegacyPrincipalResponse::AlreadyMigrated),
        )]);
        let response = client.migrate_legacy_principal().await.unwrap();
        assert_eq!(response.kind(), "already_migrated");

        let client = client_with(vec![(
            MIGRATE_LEGACY_PRINCIPAL,
            Reply::candid(&wire_principal::MigrateLegacyPrincipalResponse::InternalError(
                "boom".to_string(),
            )),
        )]);
        let response = client.migrate_legacy_principal().await.unwrap();
        assert_eq!(
            response,
            MigrateLegacyPrincipalResponse::InternalError {
                error: "boom".to_string()
            }
        );
        assert_eq!(response.kind(), "internal_error");
    }

    #[tokio::test]
    async fn prepare_delegation_uses_the_identity_public_key() {
        let client = client_with(vec![(
            PREPARE_DELEGATION,
            Reply::candid(&wire_delegation::PrepareDelegationResponse::Success(
                PrepareDelegationSuccess {
                    user_key: ByteBuf::from(vec![1; 60]),
                    expiration: 1_800_000_000_000_000_000,
                },
            )),
        )]);

        let response = client.prepare_delegation().await.unwrap();
        assert_eq!(
            response,
            PrepareDelegationResponse::Success {
                user_key: vec![1; 60],
                expiration: 1_800_000_000_000_000_000,
            }
        );

        let calls = client.transport().calls();
        assert_eq!(calls[0].mode, CallMode::Update);
        let args = Decode!(&calls[0].arg, PrepareDelegationArgs).unwrap();
        assert_eq!(
            args.session_key.into_vec(),
            test_identity().public_key().unwrap()
        );
        assert_eq!(args.max_time_to_live, None);
    }

    #[tokio::test]
    async fn prepare_delegation_without_public_key_fails_before_calling() {
        let client = IdentityClient::with_transport(
            Arc::new(AnonymousIdentity),
            MockTransport::new(vec![]),
        );

        let err = client.prepare_delegation().await.unwrap_err();
        assert!(matches!(err, IdentityCallError::MissingSessionKey));
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn get_delegation_passes_arguments_through() {
        let session_key = vec![0x30, 0x2a, 0x00, 0xff, 0x10];
        let expiration = u64::MAX - 7;
        let client = client_with(vec![(
            GET_DELEGATION,
            Reply::candid(&wire_delegation::GetDelegationResponse::Success(
                signed_delegation(session_key.clone(), expiration),
            )),
        )]);

        let response = client.get_delegation(&session_key, expiration).await.unwrap();
        match response {
            GetDelegationResponse::Success {
                delegation,
                signature,
            } => {
                assert_eq!(delegation.pubkey, session_key);
                assert_eq!(delegation.expiration, expiration);
                assert_eq!(signature, vec![0x5a; 32]);
            }
            GetDelegationResponse::NotFound => panic!("expected a delegation"),
        }

        let calls = client.transport().calls();
        assert_eq!(calls[0].mode, CallMode::Query);
        let args = Decode!(&calls[0].arg, GetDelegationArgs).unwrap();
        assert_eq!(args.session_key.into_vec(), session_key);
        assert_eq!(args.expiration, expiration);
    }

    #[tokio::test]
    async fn prepare_then_get_passes_values_unchanged() {
        let user_key = vec![0x42; 61];
        let expiration = 1_234_567_890_123_456_789;
        let client = client_with(vec![
            (
                PREPARE_DELEGATION,
                Reply::candid(&wire_delegation::PrepareDelegationResponse::Success(
                    PrepareDelegationSuccess {
                        user_key: ByteBuf::from(user_key.clone()),
                        expiration,
                    },
                )),
            ),
            (
                GET_DELEGATION,
                Reply::candid(&wire_delegation::GetDelegationResponse::NotFound),
            ),
        ]);

        let PrepareDelegationResponse::Success {
            user_key: returned_key,
            expiration: returned_expiration,
        } = client.prepare_delegation().await.unwrap()
        else {
            panic!("expected prepare_delegation to succeed");
        };
        let response = client
            .get_delegation(&returned_key, returned_expiration)
            .await
            .unwrap();
        assert_eq!(response.kind(), "not_found");

        let calls = client.transport().calls();
        let args = Decode!(&calls[1].arg, GetDelegationArgs).unwrap();
        assert_eq!(args.session_key.into_vec(), user_key);
        assert_eq!(args.expiration, expiration);
    }

    #[tokio::test]
    async fn delegation_chain_fetches_what_was_prepared() {
        let session_key = test_identity().public_key().unwrap();
        let expiration = 1_900_000_000_000_000_000;
        let client = client_with(vec![
            (
                PREPARE_DELEGATION,
                Reply::candid(&wire_delegation::PrepareDelegationResponse::Success(
                    PrepareDelegationSuccess {
                        user_key: ByteBuf::from(vec![0x77; 62]),
                        expiration,
                    },
                )),
            ),
            (
                GET_DELEGATION,
                Reply::candid(&wire_delegation::GetDelegationResponse::Success(
                    signed_delegation(session_key.clone(), expiration),
                )),
            ),
        ]);

        let chain = client.delegation_chain().await.unwrap().unwrap();
        assert_eq!(chain.user_key, vec![0x77; 62]);
        assert_eq!(chain.delegations.len(), 1);
        assert_eq!(chain.delegations[0].delegation.pubkey, session_key);
        assert_eq!(chain.expiration(), Some(expiration));

        let calls = client.transport().calls();
        let args = Decode!(&calls[1].arg, GetDelegationArgs).unwrap();
        assert_eq!(args.session_key.into_vec(), session_key);
        assert_eq!(args.expiration, expiration);
    }

    #[tokio::test]
    async fn delegation_chain_stops_at_not_found() {
        let client = client_with(vec![(
            PREPARE_DELEGATION,
            Reply::candid(&wire_delegation::PrepareDelegationResponse::NotFound),
        )]);

        assert!(client.delegation_chain().await.unwrap().is_none());
        assert_eq!(client.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn transport_rejection_is_an_error() {
        let client = client_with(vec![(CHECK_AUTH_PRINCIPAL, Reply::Reject)]);

        let err = client.check_auth_principal().await.unwrap_err();
        match err {
            IdentityCallError::Call { method, source } => {
                assert_eq!(method, CHECK_AUTH_PRINCIPAL);
                assert!(matches!(source, AgentError::TimeoutWaitingForResponse()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn reply_of_the_wrong_type_is_a_decode_error() {
        let client = client_with(vec![(
            MIGRATE_LEGACY_PRINCIPAL,
            Reply::candid(&"not a variant".to_string()),
        )]);

        let err = client.migrate_legacy_principal().await.unwrap_err();
        assert!(matches!(
            err,
            IdentityCallError::DecodeResponse {
                method: MIGRATE_LEGACY_PRINCIPAL,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let client = client_with(vec![
            (
                CHECK_AUTH_PRINCIPAL,
                Reply::candid(&wire_principal::CheckAuthPrincipalResponse::Success),
            ),
            (
                MIGRATE_LEGACY_PRINCIPAL,
                Reply::candid(&wire_principal::MigrateLegacyPrincipalResponse::AlreadyMigrated),
            ),
        ]);

        let (checked, migrated) = tokio::join!(
            client.check_auth_principal(),
            client.migrate_legacy_principal()
        );
        assert_eq!(checked.unwrap(), CheckAuthPrincipalResponse::Success);
        assert_eq!(
            migrated.unwrap(),
            MigrateLegacyPrincipalResponse::AlreadyMigrated
        );
        assert_eq!(client.transport().calls().len(), 2);
    }

    #[test]
    fn mainnet_gateways() {
        assert!(is_mainnet_url("https://icp0.io"));
        assert!(is_mainnet_url("https://ic0.app/"));
        assert!(!is_mainnet_url("http://localhost:4943/"));
    }

    #[tokio::test]
    async fn builder_without_root_key_does_not_touch_the_network() {
        let canister_id = Principal::from_text("rdmx6-jaaaa-aaaaa-aaadq-cai").unwrap();
        let client = IdentityClient::builder(test_identity(), canister_id, "http://localhost:4943")
            .with_fetch_root_key(false)
            .build()
            .await
            .unwrap();
        assert_eq!(client.transport().canister_id(), canister_id);
    }

    #[tokio::test]
    async fn builder_rejects_invalid_urls() {
        let err = IdentityClient::builder(test_identity(), Principal::anonymous(), "not a url")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, CreateIdentityClientError::InvalidUrl(_)));
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IdentityClient>();
    }
}
