mod commands;
mod support;
use crate::commands::check_auth_principal::check_auth_principal;
use crate::commands::delegation_chain::delegation_chain;
use crate::commands::get_delegation::get_delegation;
use crate::commands::migrate_legacy_principal::migrate_legacy_principal;
use crate::commands::prepare_delegation::prepare_delegation;
use anstyle::{AnsiColor, Style};
use anyhow::Context;
use candid::Principal;
use clap::builder::Styles;
use clap::{crate_authors, crate_version, ArgAction, Parser};
use ic_agent::identity::{AnonymousIdentity, BasicIdentity, Secp256k1Identity};
use ic_agent::Identity;
use ic_identity_client::IdentityClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    version = crate_version!(),
    author = crate_authors!(),
    propagate_version = true,
    styles = style(),
)]
struct Opts {
    /// The replica or boundary node to send calls to.
    #[arg(long, default_value = "http://localhost:4943/")]
    ic_url: String,

    /// An optional PEM file to read the identity from. If none is passed,
    /// the anonymous identity is used.
    #[arg(long)]
    pem: Option<PathBuf>,

    /// Fetch the root key from the replica even if the url looks like mainnet.
    /// The root key is always fetched for other urls.
    #[arg(long)]
    fetch_root_key: bool,

    /// Displays detailed information about operations. -vv will generate a very large number of messages and can affect performance.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppresses informational messages. -qq limits to errors only; -qqqq disables them all.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    subcommand: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    /// Check whether the identity is a current, legacy or unknown auth principal.
    CheckAuthPrincipal(CanisterOpts),

    /// Migrate the identity's legacy principal.
    MigrateLegacyPrincipal(CanisterOpts),

    /// Have the canister sign a delegation to the identity's public key.
    PrepareDelegation(CanisterOpts),

    /// Fetch a delegation prepared earlier.
    GetDelegation(GetDelegationOpts),

    /// Prepare and fetch a delegation, and print the delegation chain as JSON.
    DelegationChain(CanisterOpts),
}

impl SubCommand {
    fn canister_id(&self) -> &str {
        match self {
            SubCommand::CheckAuthPrincipal(o)
            | SubCommand::MigrateLegacyPrincipal(o)
            | SubCommand::PrepareDelegation(o)
            | SubCommand::DelegationChain(o) => &o.canister_id,
            SubCommand::GetDelegation(o) => &o.canister_id,
        }
    }
}

#[derive(Parser)]
struct CanisterOpts {
    /// The identity canister ID.
    canister_id: String,
}

#[derive(Parser)]
struct GetDelegationOpts {
    /// The identity canister ID.
    canister_id: String,

    /// The hex-encoded session key passed to prepare-delegation.
    /// Defaults to the public key of the identity.
    #[arg(long)]
    session_key: Option<String>,

    /// The expiration returned by prepare-delegation, in nanoseconds since the epoch.
    #[arg(long)]
    expiration: u64,
}

fn create_identity(maybe_pem: Option<&Path>) -> anyhow::Result<Arc<dyn Identity>> {
    let Some(pem_path) = maybe_pem else {
        return Ok(Arc::new(AnonymousIdentity));
    };
    if let Ok(secp256k_identity) = Secp256k1Identity::from_pem_file(pem_path) {
        return Ok(Arc::new(secp256k_identity));
    }
    let identity = BasicIdentity::from_pem_file(pem_path)
        .with_context(|| format!("Could not read the key pair from {}.", pem_path.display()))?;
    Ok(Arc::new(identity))
}

fn style() -> Styles {
    let green = Style::new().fg_color(Some(AnsiColor::Green.into()));
    let yellow = Style::new().fg_color(Some(AnsiColor::Yellow.into()));
    let red = Style::new()
        .fg_color(Some(AnsiColor::BrightRed.into()))
        .bold();
    Styles::styled()
        .literal(green)
        .placeholder(green)
        .error(red)
        .header(yellow)
        .invalid(yellow)
        .valid(green)
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    let logger = support::new_logger(support::log_level(opts.verbose, opts.quiet));

    let identity = create_identity(opts.pem.as_deref())?;
    let canister_id = Principal::from_text(opts.subcommand.canister_id())
        .context("Invalid identity canister ID.")?;

    let mut builder =
        IdentityClient::builder(identity, canister_id, &opts.ic_url).with_logger(logger.clone());
    if opts.fetch_root_key {
        builder = builder.with_fetch_root_key(true);
    }
    let client = builder.build().await?;

    match &opts.subcommand {
        SubCommand::CheckAuthPrincipal(_) => check_auth_principal(&client, &logger).await?,
        SubCommand::MigrateLegacyPrincipal(_) => {
            migrate_legacy_principal(&client, &logger).await?
        }
        SubCommand::PrepareDelegation(_) => prepare_delegation(&client, &logger).await?,
        SubCommand::GetDelegation(o) => get_delegation(&client, o, &logger).await?,
        SubCommand::DelegationChain(_) => delegation_chain(&client, &logger).await?,
    }

    Ok(())
}
