//! The shape of the identity canister's service.
//!
//! The argument and reply types live in [`crate::canister_api::types`]; this
//! module records how each method is called.
use crate::canister_api::method_names::{
    CHECK_AUTH_PRINCIPAL, GET_DELEGATION, MIGRATE_LEGACY_PRINCIPAL, PREPARE_DELEGATION,
};

/// The Candid description of the identity canister.
pub const CANDID_INTERFACE: &str = include_str!("../identity.did");

/// How a method is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// A read-only call, answered by a single replica.
    Query,
    /// A call that may change canister state and goes through consensus.
    Update,
}

/// A method of the identity canister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSchema {
    /// The method name.
    pub name: &'static str,
    /// How the method is invoked.
    pub mode: CallMode,
}

/// `check_auth_principal : (record {}) -> (CheckAuthPrincipalResponse) query`
pub const CHECK_AUTH_PRINCIPAL_METHOD: MethodSchema = MethodSchema {
    name: CHECK_AUTH_PRINCIPAL,
    mode: CallMode::Query,
};

/// `get_delegation : (GetDelegationArgs) -> (GetDelegationResponse) query`
pub const GET_DELEGATION_METHOD: MethodSchema = MethodSchema {
    name: GET_DELEGATION,
    mode: CallMode::Query,
};

/// `migrate_legacy_principal : (record {}) -> (MigrateLegacyPrincipalResponse)`
pub const MIGRATE_LEGACY_PRINCIPAL_METHOD: MethodSchema = MethodSchema {
    name: MIGRATE_LEGACY_PRINCIPAL,
    mode: CallMode::Update,
};

/// `prepare_delegation : (PrepareDelegationArgs) -> (PrepareDelegationResponse)`
pub const PREPARE_DELEGATION_METHOD: MethodSchema = MethodSchema {
    name: PREPARE_DELEGATION,
    mode: CallMode::Update,
};

/// Every method of the service.
pub const IDENTITY_SERVICE: [MethodSchema; 4] = [
    CHECK_AUTH_PRINCIPAL_METHOD,
    GET_DELEGATION_METHOD,
    MIGRATE_LEGACY_PRINCIPAL_METHOD,
    PREPARE_DELEGATION_METHOD,
];

#[cfg(test)]
mod tests {
    use super::*;
    use candid::types::FuncMode;
    use candid_parser::utils::CandidSource;

    #[test]
    fn candid_interface_matches_method_schemas() {
        let (env, actor) = CandidSource::Text(CANDID_INTERFACE)
            .load()
            .expect("identity.did does not parse");
        let actor = actor.expect("identity.did has no service");

        let mut declared: Vec<&str> = env
            .as_service(&actor)
            .unwrap()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        declared.sort_unstable();
        let mut expected: Vec<&str> = IDENTITY_SERVICE.iter().map(|m| m.name).collect();
        expected.sort_unstable();
        assert_eq!(declared, expected);

        for method in IDENTITY_SERVICE {
            let func = env.get_method(&actor, method.name).unwrap();
            let is_query = func.modes.contains(&FuncMode::Query);
            assert_eq!(
                is_query,
                method.mode == CallMode::Query,
                "call mode of '{}' disagrees with identity.did",
                method.name
            );
            assert_eq!(func.args.len(), 1, "'{}' takes one argument", method.name);
            assert_eq!(func.rets.len(), 1, "'{}' returns one value", method.name);
        }
    }
}
