use std::fmt;

/// Lifecycle of a [`KeyExchange`](crate::KeyExchange).
///
/// Construction already derives the public key, so there is no state
/// before [`Phase::PublicDerived`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    PublicDerived,
    PeerKeySet,
    SecretComputed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PublicDerived => write!(f, "public key derived"),
            Self::PeerKeySet => write!(f, "peer key set"),
            Self::SecretComputed => write!(f, "secret computed"),
        }
    }
}
