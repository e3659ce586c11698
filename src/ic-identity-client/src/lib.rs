//! A typed client for the identity canister.
//!
//! The identity canister signs delegations for session keys and migrates
//! legacy principals. This crate declares its Candid interface and wraps an
//! [`ic_agent::Agent`] with one method per canister method, turning each
//! Candid variant reply into a Rust enum.
//!
//! # Example
//!
//! ```rust,no_run
//! use candid::Principal;
//! use ic_agent::identity::BasicIdentity;
//! use ic_identity_client::{IdentityClient, PrepareDelegationResponse};
//! use std::sync::Arc;
//! # async fn not_main() -> Result<(), Box<dyn std::error::Error>> {
//! # let pemfile = "";
//! let identity = Arc::new(BasicIdentity::from_pem_file(pemfile)?);
//! let canister_id = Principal::from_text("rdmx6-jaaaa-aaaaa-aaadq-cai")?;
//! let client = IdentityClient::create(identity, canister_id, "https://icp0.io").await?;
//! if let PrepareDelegationResponse::Success { user_key, expiration } =
//!     client.prepare_delegation().await?
//! {
//!     println!("{} expires at {expiration}", hex::encode(user_key));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]

pub mod canister_api;
mod client;
mod delegation_chain;
pub mod error;
mod response;
pub mod schema;
mod transport;

pub use client::{IdentityClient, IdentityClientBuilder};
pub use delegation_chain::DelegationChain;
pub use response::{
    CheckAuthPrincipalResponse, GetDelegationResponse, MigrateLegacyPrincipalResponse,
    PrepareDelegationResponse,
};
pub use transport::{AgentTransport, IdentityTransport};

#[cfg(test)]
mod test_support;
