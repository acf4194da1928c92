use crate::phase::Phase;
use crate::secret::{PrivateScalar, SharedSecret};
use crate::ExchangeError;

use galois_curve::parse::decode_point;
use galois_curve::{byte_len, CurvePoint, EllipticCurve};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use std::sync::Arc;

/// One party of an ECDH key agreement.
#[derive(Debug)]
pub struct KeyExchange {
    curve: Arc<EllipticCurve>,
    private_scalar: PrivateScalar,
    public_key: CurvePoint,
    peer_public_key: Option<CurvePoint>,
    shared_secret: Option<SharedSecret>,
}

impl KeyExchange {
    /// Derives the public key `d * G`.
    ///
    /// `d` must lie in `[1, n)` when the generator order `n` is known and
    /// must not be zero otherwise.
    pub fn new(curve: Arc<EllipticCurve>, private_scalar: BigUint) -> Result<Self, ExchangeError> {
        let generator = curve.generator().ok_or(ExchangeError::MissingGenerator)?;
        if private_scalar.is_zero() {
            return Err(ExchangeError::InvalidScalar(
                "private scalar must not be zero".to_string(),
            ));
        }
        if let Some(order) = curve.order() {
            if &private_scalar >= order {
                return Err(ExchangeError::InvalidScalar(
                    "private scalar must be less than the generator order".to_string(),
                ));
            }
        }

        let public_key = curve.multiply(generator, &private_scalar)?;
        if public_key.is_identity() {
            // only possible when the order is unknown
            return Err(ExchangeError::InvalidScalar(
                "private scalar is a multiple of the generator order".to_string(),
            ));
        }

        let exchange = Self {
            private_scalar: PrivateScalar::new(&private_scalar),
            curve,
            public_key,
            peer_public_key: None,
            shared_secret: None,
        };
        debug!(
            "key exchange on {}: {}",
            exchange.curve_label(),
            exchange.phase()
        );
        Ok(exchange)
    }

    /// Samples the private scalar uniformly from `[1, n)`, or from `[1, p)`
    /// when the order is unknown.
    pub fn random<R: RngCore + CryptoRng>(
        rng: &mut R,
        curve: Arc<EllipticCurve>,
    ) -> Result<Self, ExchangeError> {
        if curve.generator().is_none() {
            return Err(ExchangeError::MissingGenerator);
        }
        let bound = curve
            .order()
            .cloned()
            .unwrap_or_else(|| curve.modulus().clone());
        let excess_bits = byte_len(&bound) * 8 - bound.bits() as usize;

        let mut bytes = vec![0u8; byte_len(&bound)];
        loop {
            rng.fill_bytes(&mut bytes);
            bytes[0] &= 0xff >> excess_bits;
            let candidate = BigUint::from_bytes_be(&bytes);
            if candidate.is_zero() || candidate >= bound {
                continue;
            }
            match Self::new(Arc::clone(&curve), candidate) {
                Err(ExchangeError::InvalidScalar(_)) => {
                    trace!("rejected sampled scalar, retrying");
                }
                result => {
                    bytes.zeroize();
                    return result;
                }
            }
        }
    }

    /// Accepts the peer's public key, discarding any previously computed
    /// secret.
    pub fn set_peer_public_key(&mut self, peer: CurvePoint) -> Result<(), ExchangeError> {
        if peer.is_identity() {
            trace!("rejected peer key at infinity");
            return Err(ExchangeError::InvalidPeerKey(
                "point at infinity".to_string(),
            ));
        }
        if !self.curve.is_on_curve(&peer) {
            trace!("rejected peer key off the curve");
            return Err(ExchangeError::InvalidPeerKey(
                "point is not on the curve".to_string(),
            ));
        }

        self.shared_secret = None;
        self.peer_public_key = Some(peer);
        debug!("key exchange on {}: {}", self.curve_label(), self.phase());
        Ok(())
    }

    /// Decodes `[0x00]` or `0x04 || x || y` and sets it as the peer key.
    pub fn set_peer_public_key_bytes(&mut self, bytes: &[u8]) -> Result<(), ExchangeError> {
        let peer = decode_point(&self.curve, bytes)
            .map_err(|e| ExchangeError::InvalidPeerKey(e.to_string()))?;
        self.set_peer_public_key(peer)
    }

    /// Computes `d * peer` on first call and returns the stored secret
    /// afterwards.
    pub fn compute_shared_secret(&mut self) -> Result<&SharedSecret, ExchangeError> {
        let secret = match self.shared_secret.take() {
            Some(secret) => secret,
            None => {
                let secret = self.derive_secret()?;
                debug!("key exchange on {}: {}", self.curve_label(), Phase::SecretComputed);
                secret
            }
        };
        Ok(self.shared_secret.insert(secret))
    }

    /// Compares the secret presented by the peer with ours in constant time.
    pub fn validate_communication(&mut self, presented: &[u8]) -> Result<bool, ExchangeError> {
        let secret = self.compute_shared_secret()?;
        Ok(secret.as_bytes().ct_eq(presented).into())
    }

    pub fn curve(&self) -> &Arc<EllipticCurve> {
        &self.curve
    }

    pub fn public_key(&self) -> &CurvePoint {
        &self.public_key
    }

    pub fn encoded_public_key(&self) -> Vec<u8> {
        self.public_key.to_encoded_bytes()
    }

    pub fn peer_public_key(&self) -> Option<&CurvePoint> {
        self.peer_public_key.as_ref()
    }

    pub fn shared_secret(&self) -> Option<&SharedSecret> {
        self.shared_secret.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match (&self.peer_public_key, &self.shared_secret) {
            (_, Some(_)) => Phase::SecretComputed,
            (Some(_), None) => Phase::PeerKeySet,
            (None, None) => Phase::PublicDerived,
        }
    }

    fn derive_secret(&self) -> Result<SharedSecret, ExchangeError> {
        let peer = self
            .peer_public_key
            .as_ref()
            .ok_or(ExchangeError::PeerKeyNotSet)?;
        let mut scalar = self.private_scalar.to_biguint();
        let shared_point = self.curve.multiply(peer, &scalar);
        scalar.set_zero();

        match shared_point? {
            CurvePoint::Affine { x, .. } => Ok(SharedSecret::new(x.to_bytes_be())),
            CurvePoint::Infinity => {
                trace!("peer key has small order");
                Err(ExchangeError::InvalidPeerKey(
                    "shared point is the point at infinity".to_string(),
                ))
            }
        }
    }

    fn curve_label(&self) -> String {
        match self.curve.name() {
            Some(name) => name.to_string(),
            None => format!("{}-bit {} curve", self.curve.modulus().bits(), self.curve.form()),
        }
    }
}
