mod group;
mod multiply;

use crate::field::{byte_len, FieldElement};
use crate::point::CurvePoint;
use crate::utils::is_probable_prime;
use crate::CurveError;

use log::debug;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::Arc;

/// Selects the curve equation, and with it the addition formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveForm {
    /// `y^2 = x^3 + A*x + B`
    #[default]
    ShortWeierstrass,
    /// `B*y^2 = x^3 + A*x^2 + x`
    Montgomery,
}

impl fmt::Display for CurveForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ShortWeierstrass => write!(f, "short Weierstrass"),
            Self::Montgomery => write!(f, "Montgomery"),
        }
    }
}

/// Immutable curve configuration together with its group law.
///
/// Cheap to share between sessions behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EllipticCurve {
    name: Option<String>,
    form: CurveForm,
    modulus: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
    generator: Option<CurvePoint>,
    order: Option<BigUint>,
}

impl EllipticCurve {
    /// Validates the modulus and rejects singular curves.
    pub fn new(
        form: CurveForm,
        a: &BigInt,
        b: &BigInt,
        modulus: BigUint,
    ) -> Result<Self, CurveError> {
        if modulus <= BigUint::from(3u8) {
            return Err(CurveError::InvalidCurveParameters(format!(
                "modulus {} must be greater than 3",
                modulus
            )));
        }
        if !is_probable_prime(&modulus) {
            return Err(CurveError::InvalidCurveParameters(format!(
                "modulus {} is not prime",
                modulus
            )));
        }

        let modulus = Arc::new(modulus);
        let curve = Self {
            name: None,
            form,
            a: FieldElement::from_bigint(a, Arc::clone(&modulus)),
            b: FieldElement::from_bigint(b, Arc::clone(&modulus)),
            modulus,
            generator: None,
            order: None,
        };

        if curve.discriminant().is_zero() {
            return Err(CurveError::InvalidCurveParameters(
                "singular curve (zero discriminant)".to_string(),
            ));
        }

        debug!(
            "constructed {} curve over a {}-bit prime field",
            curve.form,
            curve.modulus.bits()
        );
        Ok(curve)
    }

    pub fn short_weierstrass(a: &BigInt, b: &BigInt, modulus: BigUint) -> Result<Self, CurveError> {
        Self::new(CurveForm::ShortWeierstrass, a, b, modulus)
    }

    pub fn montgomery(a: &BigInt, b: &BigInt, modulus: BigUint) -> Result<Self, CurveError> {
        Self::new(CurveForm::Montgomery, a, b, modulus)
    }

    /// Attaches a base point and, optionally, its order.
    ///
    /// Coordinates must be canonical residues and the point must satisfy
    /// the curve equation, otherwise [`CurveError::InvalidGenerator`].
    pub fn with_generator(
        mut self,
        x: BigUint,
        y: BigUint,
        order: Option<BigUint>,
    ) -> Result<Self, CurveError> {
        if let Some(n) = &order {
            if n < &BigUint::from(2u8) {
                return Err(CurveError::InvalidCurveParameters(format!(
                    "generator order {} must be at least 2",
                    n
                )));
            }
        }
        let generator = self
            .point(x, y)
            .map_err(|_| CurveError::InvalidGenerator)?;

        self.generator = Some(generator);
        self.order = order;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn form(&self) -> CurveForm {
        self.form
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn generator(&self) -> Option<&CurvePoint> {
        self.generator.as_ref()
    }

    /// Order of the generator, if known.
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }

    /// Byte length of a single encoded coordinate.
    pub fn byte_len(&self) -> usize {
        byte_len(&self.modulus)
    }

    /// Number of double-and-add rounds run for any scalar that fits.
    ///
    /// Without a known order the Hasse bound `#E <= p + 1 + 2*sqrt(p) < 2p`
    /// caps every point order below `2^(bits(p) + 1)`.
    pub fn scalar_bits(&self) -> u64 {
        match &self.order {
            Some(order) => order.bits(),
            None => self.modulus.bits() + 1,
        }
    }

    /// `4A^3 + 27B^2` for short Weierstrass, `B(A^2 - 4)` for Montgomery
    /// curves. Zero means the curve is singular.
    pub fn discriminant(&self) -> FieldElement {
        match self.form {
            CurveForm::ShortWeierstrass => {
                let a3 = &self.a.square() * &self.a;
                let b2 = self.b.square();
                &(&self.constant(4) * &a3) + &(&self.constant(27) * &b2)
            }
            CurveForm::Montgomery => &self.b * &(&self.a.square() - &self.constant(4)),
        }
    }

    /// Reduces `value` into this curve's field.
    pub fn field_element(&self, value: BigUint) -> FieldElement {
        FieldElement::new(value, Arc::clone(&self.modulus))
    }

    /// Checked point constructor for untrusted coordinates.
    pub fn point(&self, x: BigUint, y: BigUint) -> Result<CurvePoint, CurveError> {
        if x >= *self.modulus || y >= *self.modulus {
            return Err(CurveError::PointNotOnCurve);
        }
        let point = CurvePoint::affine(self.field_element(x), self.field_element(y));
        self.ensure_on_curve(&point)?;
        Ok(point)
    }

    pub fn is_on_curve(&self, point: &CurvePoint) -> bool {
        match point {
            CurvePoint::Infinity => true,
            CurvePoint::Affine { x, y } => {
                if x.modulus() != &self.modulus || y.modulus() != &self.modulus {
                    return false;
                }
                self.equation_lhs(y) == self.equation_rhs(x)
            }
        }
    }

    /// Every affine point of the curve, found by trying all `p^2`
    /// coordinate pairs. Only usable for toy moduli.
    pub fn affine_points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        residues(&self.modulus).flat_map(move |x| {
            let x = self.field_element(x);
            let rhs = self.equation_rhs(&x);
            residues(&self.modulus).filter_map(move |y| {
                let y = self.field_element(y);
                if self.equation_lhs(&y) == rhs {
                    Some(CurvePoint::affine(x.clone(), y))
                } else {
                    None
                }
            })
        })
    }

    pub(crate) fn ensure_on_curve(&self, point: &CurvePoint) -> Result<(), CurveError> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(CurveError::PointNotOnCurve)
        }
    }

    pub(crate) fn constant(&self, value: u64) -> FieldElement {
        FieldElement::from_u64(value, Arc::clone(&self.modulus))
    }

    fn equation_lhs(&self, y: &FieldElement) -> FieldElement {
        match self.form {
            CurveForm::ShortWeierstrass => y.square(),
            CurveForm::Montgomery => &self.b * &y.square(),
        }
    }

    fn equation_rhs(&self, x: &FieldElement) -> FieldElement {
        let x2 = x.square();
        let x3 = &x2 * x;
        match self.form {
            CurveForm::ShortWeierstrass => &(&x3 + &(&self.a * x)) + &self.b,
            CurveForm::Montgomery => &(&x3 + &(&self.a * &x2)) + x,
        }
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }
        match self.form {
            CurveForm::ShortWeierstrass => write!(
                f,
                "y^2 = x^3 + {}x + {} over F_{}",
                self.a, self.b, self.modulus
            ),
            CurveForm::Montgomery => write!(
                f,
                "{}y^2 = x^3 + {}x^2 + x over F_{}",
                self.b, self.a, self.modulus
            ),
        }
    }
}

fn residues(modulus: &BigUint) -> impl Iterator<Item = BigUint> + '_ {
    std::iter::successors(Some(BigUint::zero()), |value| Some(value + 1u8))
        .take_while(move |value| value < modulus)
}
