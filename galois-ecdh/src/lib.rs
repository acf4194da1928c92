#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]
//! Elliptic curve Diffie-Hellman on top of [`galois_curve`].
//!
//! A [`KeyExchange`] holds one party's private scalar and walks through
//! [`Phase::PublicDerived`], [`Phase::PeerKeySet`] and
//! [`Phase::SecretComputed`]. The shared secret is the raw x-coordinate of
//! the shared point; callers apply their own key derivation.

mod exchange;
mod phase;
mod secret;

pub use exchange::KeyExchange;
pub use phase::Phase;
pub use secret::{PrivateScalar, SharedSecret};

use galois_curve::CurveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("invalid private scalar: {0}")]
    InvalidScalar(String),
    #[error("invalid peer public key: {0}")]
    InvalidPeerKey(String),
    #[error("peer public key has not been set")]
    PeerKeyNotSet,
    #[error("curve has no generator")]
    MissingGenerator,
    #[error(transparent)]
    Curve(#[from] CurveError),
}
