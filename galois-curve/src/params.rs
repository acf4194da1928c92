//! Serializable curve descriptions.
//!
//! Integers travel as strings so that 256-bit values survive JSON. They may
//! be decimal or `0x`-prefixed hex, and coefficients may be negative.

use crate::curve::{CurveForm, EllipticCurve};
use crate::parse::{parse_integer, parse_unsigned};
use crate::point::CurvePoint;
use crate::CurveError;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub form: CurveForm,
    pub a: String,
    pub b: String,
    pub p: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorParams>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorParams {
    pub x: String,
    pub y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl EllipticCurve {
    pub fn from_params(params: &CurveParams) -> Result<Self, CurveError> {
        let a = parse_integer(&params.a)?;
        let b = parse_integer(&params.b)?;
        let p = parse_integer(&params.p)?;
        let modulus = p.to_biguint().ok_or_else(|| {
            CurveError::InvalidCurveParameters(format!("modulus {} must be positive", p))
        })?;

        let mut curve = Self::new(params.form, &a, &b, modulus)?;
        if let Some(generator) = &params.generator {
            let order = generator
                .order
                .as_deref()
                .map(parse_unsigned)
                .transpose()?;
            curve = curve.with_generator(
                parse_unsigned(&generator.x)?,
                parse_unsigned(&generator.y)?,
                order,
            )?;
        }
        if let Some(name) = &params.name {
            curve = curve.with_name(name.as_str());
        }
        Ok(curve)
    }

    /// Decimal rendering of this curve, accepted back by [`Self::from_params`].
    pub fn to_params(&self) -> CurveParams {
        let generator = match self.generator() {
            Some(CurvePoint::Affine { x, y }) => Some(GeneratorParams {
                x: x.inner().to_string(),
                y: y.inner().to_string(),
                order: self.order().map(ToString::to_string),
            }),
            _ => None,
        };
        CurveParams {
            name: self.name().map(str::to_owned),
            form: self.form(),
            a: self.a().inner().to_string(),
            b: self.b().inner().to_string(),
            p: self.modulus().to_string(),
            generator,
        }
    }
}
