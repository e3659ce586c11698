use crate::support::format_expiration;
use crate::GetDelegationOpts;
use anyhow::Context;
use ic_identity_client::{GetDelegationResponse, IdentityClient};
use slog::{info, warn, Logger};

pub async fn get_delegation(
    client: &IdentityClient,
    opts: &GetDelegationOpts,
    logger: &Logger,
) -> anyhow::Result<()> {
    let session_key = match &opts.session_key {
        Some(session_key) => hex::decode(session_key).context("Invalid hex in --session-key.")?,
        None => client.session_key()?,
    };

    match client.get_delegation(&session_key, opts.expiration).await? {
        GetDelegationResponse::Success {
            delegation,
            signature,
        } => {
            info!(logger, "pubkey:     {}", hex::encode(&delegation.pubkey));
            info!(
                logger,
                "expiration: {} ({})",
                delegation.expiration,
                format_expiration(delegation.expiration)?
            );
            info!(logger, "signature:  {}", hex::encode(signature));
        }
        GetDelegationResponse::NotFound => {
            warn!(
                logger,
                "No delegation was prepared for this session key and expiration."
            );
        }
    }
    Ok(())
}
