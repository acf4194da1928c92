use crate::params::{CurveParams, GeneratorParams};
use crate::{CurveError, CurveForm, EllipticCurve};

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

const SECP256K1_P: &str = "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
const SECP256K1_N: &str = "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
const SECP256K1_GX: &str = "0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const SECP256K1_GY: &str = "0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

// base field and group order are those of secp256k1, swapped
const TOM256K1_GX: &str = "0xac81a9587b8da43a9519bd50d96191fd8f2c4f66b8f1550e366e3c7f9ed18897";
const TOM256K1_GY: &str = "0x6ad7d16db13c428e5dce61c8bfe2b3860a306d201f059826120e7ac684ee209f";

const CURVE25519_P: &str = "0x7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";
const CURVE25519_N: &str = "0x1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";
const CURVE25519_GY: &str = "0x20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9";

const M221_P: &str = "0x1ffffffffffffffffffffffffffffffffffffffffffffffffffffffd";

/// Built-in curves, addressable by name from the command line or a config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedCurve {
    Secp256k1,
    Tom256k1,
    Curve25519,
    /// Montgomery curve over `2^221 - 3` without a standard base point.
    M221,
}

impl NamedCurve {
    pub const ALL: [NamedCurve; 4] = [
        Self::Secp256k1,
        Self::Tom256k1,
        Self::Curve25519,
        Self::M221,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Tom256k1 => "tom256k1",
            Self::Curve25519 => "curve25519",
            Self::M221 => "m221",
        }
    }

    pub fn params(self) -> CurveParams {
        let (form, a, b, p, generator) = match self {
            Self::Secp256k1 => (
                CurveForm::ShortWeierstrass,
                "0",
                "7",
                SECP256K1_P,
                Some((SECP256K1_GX, SECP256K1_GY, SECP256K1_N)),
            ),
            Self::Tom256k1 => (
                CurveForm::ShortWeierstrass,
                "0",
                "7",
                SECP256K1_N,
                Some((TOM256K1_GX, TOM256K1_GY, SECP256K1_P)),
            ),
            Self::Curve25519 => (
                CurveForm::Montgomery,
                "486662",
                "1",
                CURVE25519_P,
                Some(("9", CURVE25519_GY, CURVE25519_N)),
            ),
            Self::M221 => (CurveForm::Montgomery, "117050", "1", M221_P, None),
        };

        CurveParams {
            name: Some(self.name().to_string()),
            form,
            a: a.to_string(),
            b: b.to_string(),
            p: p.to_string(),
            generator: generator.map(|(x, y, order)| GeneratorParams {
                x: x.to_string(),
                y: y.to_string(),
                order: Some(order.to_string()),
            }),
        }
    }

    pub fn curve(self) -> Result<EllipticCurve, CurveError> {
        EllipticCurve::from_params(&self.params())
    }
}

impl FromStr for NamedCurve {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|curve| curve.name() == wanted)
            .ok_or_else(|| CurveError::UnknownCurve(s.to_string()))
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
