use crate::support::format_expiration;
use anyhow::bail;
use ic_identity_client::IdentityClient;
use slog::{info, Logger};

pub async fn delegation_chain(client: &IdentityClient, logger: &Logger) -> anyhow::Result<()> {
    let Some(chain) = client.delegation_chain().await? else {
        bail!("The principal is not linked to any user.");
    };

    if let Some(expiration) = chain.expiration() {
        info!(logger, "Delegation expires at {}.", format_expiration(expiration)?);
    }
    println!("{}", serde_json::to_string_pretty(&chain)?);
    Ok(())
}
