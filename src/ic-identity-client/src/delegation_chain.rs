use ic_agent::identity::SignedDelegation;
use serde::{Serialize, Serializer};

/// The delegations that let a session key act for the user.
///
/// Serializes to the JSON delegation chain used by Internet Identity tooling,
/// with keys, signatures and expirations as hex strings.
#[derive(Debug, Clone)]
pub struct DelegationChain {
    /// The DER-encoded public key the chain starts from.
    pub user_key: Vec<u8>,
    /// The delegations, outermost first.
    pub delegations: Vec<SignedDelegation>,
}

impl DelegationChain {
    /// The expiration of the shortest-lived delegation, if any.
    pub fn expiration(&self) -> Option<u64> {
        self.delegations
            .iter()
            .map(|d| d.delegation.expiration)
            .min()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDelegationChain {
    delegations: Vec<JsonSignedDelegation>,
    public_key: String,
}

#[derive(Serialize)]
struct JsonSignedDelegation {
    delegation: JsonDelegation,
    signature: String,
}

#[derive(Serialize)]
struct JsonDelegation {
    expiration: String,
    pubkey: String,
}

impl Serialize for DelegationChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let delegations = self
            .delegations
            .iter()
            .map(|d| JsonSignedDelegation {
                delegation: JsonDelegation {
                    expiration: format!("{:x}", d.delegation.expiration),
                    pubkey: hex::encode(&d.delegation.pubkey),
                },
                signature: hex::encode(&d.signature),
            })
            .collect();
        JsonDelegationChain {
            delegations,
            public_key: hex::encode(&self.user_key),
        }
        .serialize(serializer)
    }
}
