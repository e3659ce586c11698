pub mod check_auth_principal;
pub mod delegation_chain;
pub mod get_delegation;
pub mod migrate_legacy_principal;
pub mod prepare_delegation;
