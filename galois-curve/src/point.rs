use crate::field::{byte_len, FieldElement};

use std::fmt;

/// Tag byte of an encoded point at infinity.
pub const IDENTITY_TAG: u8 = 0x00;
/// Tag byte of an uncompressed `x || y` encoding.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// A point of an elliptic curve group.
///
/// Coordinates carry their field modulus, but not the curve coefficients:
/// whether an `Affine` point satisfies a given curve equation is decided by
/// [`EllipticCurve::is_on_curve`](crate::EllipticCurve::is_on_curve).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurvePoint {
    /// The group identity.
    Infinity,
    Affine { x: FieldElement, y: FieldElement },
}

impl CurvePoint {
    /// Panics when the coordinates live in different fields.
    pub fn affine(x: FieldElement, y: FieldElement) -> Self {
        assert!(
            x.modulus() == y.modulus(),
            "coordinates belong to different moduli"
        );
        Self::Affine { x, y }
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    pub fn x(&self) -> Option<&FieldElement> {
        match self {
            Self::Infinity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&FieldElement> {
        match self {
            Self::Infinity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }

    /// `[0x00]` for the identity, `0x04 || x || y` otherwise with both
    /// coordinates padded to the byte length of the modulus.
    pub fn to_encoded_bytes(&self) -> Vec<u8> {
        match self {
            Self::Infinity => vec![IDENTITY_TAG],
            Self::Affine { x, y } => {
                let width = byte_len(x.modulus());
                let mut bytes = Vec::with_capacity(1 + 2 * width);
                bytes.push(UNCOMPRESSED_TAG);
                bytes.extend_from_slice(&x.to_bytes_be());
                bytes.extend_from_slice(&y.to_bytes_be());
                bytes
            }
        }
    }
}

impl std::ops::Neg for CurvePoint {
    type Output = Self;
    fn neg(self) -> Self::Output {
        match self {
            Self::Infinity => Self::Infinity,
            Self::Affine { x, y } => Self::Affine { x, y: -y },
        }
    }
}

impl std::ops::Neg for &CurvePoint {
    type Output = CurvePoint;
    fn neg(self) -> Self::Output {
        match self {
            CurvePoint::Infinity => CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => CurvePoint::Affine {
                x: x.clone(),
                y: -y,
            },
        }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "Point: infinity"),
            Self::Affine { x, y } => write!(f, "Point: ({}, {})", x, y),
        }
    }
}
