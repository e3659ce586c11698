use crate::support::format_expiration;
use ic_identity_client::{IdentityClient, PrepareDelegationResponse};
use slog::{info, warn, Logger};

pub async fn prepare_delegation(client: &IdentityClient, logger: &Logger) -> anyhow::Result<()> {
    match client.prepare_delegation().await? {
        PrepareDelegationResponse::Success {
            user_key,
            expiration,
        } => {
            info!(logger, "user key:    {}", hex::encode(user_key));
            info!(
                logger,
                "expiration:  {} ({})",
                expiration,
                format_expiration(expiration)?
            );
            info!(
                logger,
                "session key: {}",
                hex::encode(client.session_key()?)
            );
        }
        PrepareDelegationResponse::NotFound => {
            warn!(logger, "The principal is not linked to any user.");
        }
    }
    Ok(())
}
