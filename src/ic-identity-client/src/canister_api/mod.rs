//! Candid types and method names of the identity canister.
pub mod method_names;
pub mod types;
