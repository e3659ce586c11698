use ic_identity_client::{CheckAuthPrincipalResponse, IdentityClient};
use slog::{info, Logger};

pub async fn check_auth_principal(client: &IdentityClient, logger: &Logger) -> anyhow::Result<()> {
    let principal = client
        .identity()
        .sender()
        .map_err(anyhow::Error::msg)?;
    match client.check_auth_principal().await? {
        CheckAuthPrincipalResponse::Success => {
            info!(logger, "{} is an auth principal.", principal)
        }
        CheckAuthPrincipalResponse::Legacy => info!(
            logger,
            "{} is a legacy principal. Run migrate-legacy-principal to migrate it.", principal
        ),
        CheckAuthPrincipalResponse::NotFound => {
            info!(logger, "{} is not linked to any user.", principal)
        }
    }
    Ok(())
}
