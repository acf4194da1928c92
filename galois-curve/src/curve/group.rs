use super::{CurveForm, EllipticCurve};
use crate::field::FieldElement;
use crate::point::CurvePoint;
use crate::CurveError;

use log::trace;

impl EllipticCurve {
    pub fn negate(&self, point: &CurvePoint) -> CurvePoint {
        -point
    }

    /// Adds two points after checking that both lie on this curve.
    pub fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> Result<CurvePoint, CurveError> {
        self.ensure_on_curve(lhs)?;
        self.ensure_on_curve(rhs)?;
        self.geometric_add(lhs, rhs)
    }

    pub fn double(&self, point: &CurvePoint) -> Result<CurvePoint, CurveError> {
        self.add(point, point)
    }

    /// Chord-and-tangent addition in affine coordinates.
    ///
    /// Inputs are assumed to be on the curve. A vanishing denominator can
    /// only come from an invalid point and is reported as such.
    pub(crate) fn geometric_add(
        &self,
        lhs: &CurvePoint,
        rhs: &CurvePoint,
    ) -> Result<CurvePoint, CurveError> {
        let (x1, y1, x2, y2) = match (lhs, rhs) {
            (CurvePoint::Infinity, _) => return Ok(rhs.clone()),
            (_, CurvePoint::Infinity) => return Ok(lhs.clone()),
            (CurvePoint::Affine { x: x1, y: y1 }, CurvePoint::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        let slope = if x1 == x2 {
            if (y1 + y2).is_zero() {
                return Ok(CurvePoint::Infinity);
            }
            if y1 != y2 {
                trace!("distinct points share an x-coordinate");
                return Err(CurveError::PointNotOnCurve);
            }
            self.tangent_slope(x1, y1)?
        } else {
            slope(&(y2 - y1), &(x2 - x1))?
        };

        let slope2 = slope.square();
        let x3 = match self.form {
            CurveForm::ShortWeierstrass => &(&slope2 - x1) - x2,
            CurveForm::Montgomery => &(&(&(&self.b * &slope2) - &self.a) - x1) - x2,
        };
        let y3 = &(&slope * &(x1 - &x3)) - y1;

        Ok(CurvePoint::Affine { x: x3, y: y3 })
    }

    fn tangent_slope(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement, CurveError> {
        let three_x2 = &self.constant(3) * &x.square();
        match self.form {
            CurveForm::ShortWeierstrass => slope(&(&three_x2 + &self.a), &y.double()),
            CurveForm::Montgomery => {
                let two_ax = &self.a.double() * x;
                let numerator = &(&three_x2 + &two_ax) + &self.constant(1);
                slope(&numerator, &(&self.b * &y.double()))
            }
        }
    }
}

fn slope(numerator: &FieldElement, denominator: &FieldElement) -> Result<FieldElement, CurveError> {
    let inverse = denominator
        .inverse()
        .map_err(|_| CurveError::PointNotOnCurve)?;
    Ok(numerator * &inverse)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test::{toy_curve, toy_point};
    use num_bigint::{BigInt, BigUint};

    #[test]
    fn identity_law() {
        let curve = toy_curve();
        let p = toy_point(3, 6);
        assert_eq!(curve.add(&p, &CurvePoint::Infinity).unwrap(), p);
        assert_eq!(curve.add(&CurvePoint::Infinity, &p).unwrap(), p);
        assert_eq!(
            curve
                .add(&CurvePoint::Infinity, &CurvePoint::Infinity)
                .unwrap(),
            CurvePoint::Infinity
        );
    }

    #[test]
    fn inverse_law() {
        let curve = toy_curve();
        for p in curve.affine_points() {
            let neg = curve.negate(&p);
            assert!(curve.is_on_curve(&neg));
            assert_eq!(curve.add(&p, &neg).unwrap(), CurvePoint::Infinity);
        }
    }

    #[test]
    fn known_multiples() {
        let curve = toy_curve();
        let g = toy_point(3, 6);
        let g2 = curve.double(&g).unwrap();
        assert_eq!(g2, toy_point(80, 10));
        assert_ne!(g2, g);
        let g3 = curve.add(&g2, &g).unwrap();
        assert_eq!(g3, toy_point(80, 87));
        let g4 = curve.add(&g3, &g).unwrap();
        assert_eq!(g4, toy_point(3, 91));
        assert_eq!(curve.add(&g4, &g).unwrap(), CurvePoint::Infinity);
    }

    #[test]
    fn closure_and_commutativity() {
        let curve = toy_curve();
        let points = curve.affine_points().step_by(7).collect::<Vec<_>>();
        for p in &points {
            for q in &points {
                let sum = curve.add(p, q).unwrap();
                assert!(curve.is_on_curve(&sum));
                assert_eq!(sum, curve.add(q, p).unwrap());
            }
        }
    }

    #[test]
    fn associativity() {
        let curve = toy_curve();
        let p = toy_point(3, 6);
        let q = toy_point(0, 10);
        let r = toy_point(80, 87);
        let left = curve.add(&curve.add(&p, &q).unwrap(), &r).unwrap();
        let right = curve.add(&p, &curve.add(&q, &r).unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn doubling_two_torsion_point() {
        // 30 is a root of x^3 + 2x + 3 mod 97
        let curve = toy_curve();
        let t = toy_point(30, 0);
        assert_eq!(curve.negate(&t), t);
        assert_eq!(curve.double(&t).unwrap(), CurvePoint::Infinity);
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let curve = toy_curve();
        let bogus = CurvePoint::affine(
            curve.field_element(BigUint::from(3u32)),
            curve.field_element(BigUint::from(7u32)),
        );
        let g = toy_point(3, 6);
        assert_eq!(curve.add(&bogus, &g), Err(CurveError::PointNotOnCurve));
        assert_eq!(curve.add(&g, &bogus), Err(CurveError::PointNotOnCurve));
        assert_eq!(curve.double(&bogus), Err(CurveError::PointNotOnCurve));
        // unchecked path: same x, y neither equal nor opposite
        assert_eq!(
            curve.geometric_add(&g, &bogus),
            Err(CurveError::PointNotOnCurve)
        );
    }

    #[test]
    fn montgomery_law_matches_equation() {
        // B*y^2 = x^3 + 6x^2 + x over F_97
        let curve =
            EllipticCurve::montgomery(&BigInt::from(6), &BigInt::from(1), BigUint::from(97u32))
                .unwrap();
        let points = curve.affine_points().collect::<Vec<_>>();
        assert!(!points.is_empty());
        for p in points.iter().take(12) {
            let doubled = curve.double(p).unwrap();
            assert!(curve.is_on_curve(&doubled));
            for q in points.iter().rev().take(12) {
                let sum = curve.add(p, q).unwrap();
                assert!(curve.is_on_curve(&sum));
                assert_eq!(sum, curve.add(q, p).unwrap());
            }
        }
    }
}
