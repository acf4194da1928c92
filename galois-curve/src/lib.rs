#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]
//! Elliptic curve group arithmetic over prime fields.
//!
//! Curves are runtime values: a [`CurveForm`], coefficients, a prime modulus
//! and optionally a generator with its order. Nothing here is constant time,
//! so secret scalars should not be processed on shared hardware.

mod curve;
mod field;
pub mod params;
pub mod parse;
mod point;
pub mod presets;
mod utils;

pub use curve::{CurveForm, EllipticCurve};
pub use field::{byte_len, FieldElement};
pub use num_bigint::{BigInt, BigUint};
pub use params::{CurveParams, GeneratorParams};
pub use point::CurvePoint;
pub use presets::NamedCurve;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("attempted to invert zero")]
    DivisionByZero,
    #[error("point is not on the curve")]
    PointNotOnCurve,
    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(String),
    #[error("generator is not a point of the curve")]
    InvalidGenerator,
    #[error("invalid scalar: {0}")]
    InvalidScalar(String),
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("unknown curve: {0}")]
    UnknownCurve(String),
}
