//! Error types

mod call;
mod create_client;

pub use call::IdentityCallError;
pub use create_client::CreateIdentityClientError;
