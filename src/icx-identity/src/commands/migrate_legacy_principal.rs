use anyhow::bail;
use ic_identity_client::{IdentityClient, MigrateLegacyPrincipalResponse};
use slog::{info, warn, Logger};

pub async fn migrate_legacy_principal(
    client: &IdentityClient,
    logger: &Logger,
) -> anyhow::Result<()> {
    match client.migrate_legacy_principal().await? {
        MigrateLegacyPrincipalResponse::Success { new_principal } => {
            info!(logger, "Migrated to {}.", new_principal);
        }
        MigrateLegacyPrincipalResponse::AlreadyMigrated => {
            info!(logger, "The principal was already migrated.");
        }
        MigrateLegacyPrincipalResponse::NotFound => {
            warn!(logger, "The principal is not linked to any user.");
        }
        MigrateLegacyPrincipalResponse::InternalError { error } => {
            bail!("The identity canister failed to migrate the principal: {error}");
        }
    }
    Ok(())
}
