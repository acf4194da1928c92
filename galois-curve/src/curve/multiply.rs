use super::EllipticCurve;
use crate::point::CurvePoint;
use crate::CurveError;

use num_bigint::{BigInt, BigUint, Sign};

impl EllipticCurve {
    /// `k * point` for a non-negative `k`.
    pub fn scalar_multiply(
        &self,
        point: &CurvePoint,
        scalar: &BigInt,
    ) -> Result<CurvePoint, CurveError> {
        if scalar.sign() == Sign::Minus {
            return Err(CurveError::InvalidScalar(
                "scalar must not be negative".to_string(),
            ));
        }
        self.multiply(point, scalar.magnitude())
    }

    /// Like [`Self::scalar_multiply`], but a negative `k` multiplies the
    /// negated point by `|k|`.
    pub fn scalar_multiply_signed(
        &self,
        point: &CurvePoint,
        scalar: &BigInt,
    ) -> Result<CurvePoint, CurveError> {
        match scalar.sign() {
            Sign::Minus => self.multiply(&self.negate(point), scalar.magnitude()),
            _ => self.multiply(point, scalar.magnitude()),
        }
    }

    /// Left-to-right double-and-add.
    ///
    /// Runs `max(bits(k), scalar_bits())` rounds regardless of the leading
    /// zeros of `k`. The conditional addition still leaks the bit pattern, so
    /// this is not a constant-time ladder.
    pub fn multiply(&self, point: &CurvePoint, scalar: &BigUint) -> Result<CurvePoint, CurveError> {
        self.ensure_on_curve(point)?;

        let rounds = scalar.bits().max(self.scalar_bits());
        let mut q = CurvePoint::Infinity;
        for i in (0..rounds).rev() {
            q = self.geometric_add(&q, &q)?;
            if scalar.bit(i) {
                q = self.geometric_add(&q, point)?;
            }
        }
        Ok(q)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test::{toy_curve, toy_point};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn zero_and_one() {
        let curve = toy_curve();
        let g = toy_point(3, 6);
        assert_eq!(
            curve.scalar_multiply(&g, &BigInt::from(0)).unwrap(),
            CurvePoint::Infinity
        );
        assert_eq!(curve.scalar_multiply(&g, &BigInt::from(1)).unwrap(), g);
        assert_eq!(
            curve
                .scalar_multiply(&CurvePoint::Infinity, &BigInt::from(12))
                .unwrap(),
            CurvePoint::Infinity
        );
    }

    #[test]
    fn double_and_add_matches_repeated_addition() {
        let curve = toy_curve();
        let g = toy_point(3, 6);
        let mut repeated = CurvePoint::Infinity;
        for _ in 0..5 {
            repeated = curve.add(&repeated, &g).unwrap();
        }
        let direct = curve.scalar_multiply(&g, &BigInt::from(5)).unwrap();
        assert_eq!(direct, repeated);
        assert_eq!(direct, CurvePoint::Infinity);

        let h = toy_point(0, 10);
        let mut repeated = CurvePoint::Infinity;
        for k in 0..120u32 {
            assert_eq!(
                curve.multiply(&h, &BigUint::from(k)).unwrap(),
                repeated,
                "k = {}",
                k
            );
            repeated = curve.add(&repeated, &h).unwrap();
        }
    }

    #[test]
    fn doubling_consistency() {
        let curve = toy_curve();
        for p in curve.affine_points() {
            assert_eq!(
                curve.add(&p, &p).unwrap(),
                curve.scalar_multiply(&p, &BigInt::from(2)).unwrap()
            );
        }
    }

    #[test]
    fn homomorphism() {
        let curve = toy_curve();
        let h = toy_point(0, 10);
        let mut rng = StdRng::seed_from_u64(97);
        for _ in 0..50 {
            let m = rng.gen_range(0u32..1000);
            let n = rng.gen_range(0u32..1000);
            let lhs = curve.multiply(&h, &BigUint::from(m + n)).unwrap();
            let rhs = curve
                .add(
                    &curve.multiply(&h, &BigUint::from(m)).unwrap(),
                    &curve.multiply(&h, &BigUint::from(n)).unwrap(),
                )
                .unwrap();
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn order_law() {
        let curve = toy_curve()
            .with_generator(
                BigUint::from(3u32),
                BigUint::from(6u32),
                Some(BigUint::from(5u32)),
            )
            .unwrap();
        let g = curve.generator().unwrap();
        let n = curve.order().unwrap();
        assert_eq!(curve.multiply(g, n).unwrap(), CurvePoint::Infinity);
        // scalars wider than the order still get every bit processed
        assert_eq!(
            curve.multiply(g, &BigUint::from(5u32 * 1024 + 2)).unwrap(),
            toy_point(80, 10)
        );
        // (0, 10) generates a subgroup of order 50
        assert_eq!(
            curve.multiply(&toy_point(0, 10), &BigUint::from(50u32)).unwrap(),
            CurvePoint::Infinity
        );
    }

    #[test]
    fn negative_scalars() {
        let curve = toy_curve();
        let g = toy_point(3, 6);
        assert!(matches!(
            curve.scalar_multiply(&g, &BigInt::from(-2)),
            Err(CurveError::InvalidScalar(_))
        ));
        assert_eq!(
            curve.scalar_multiply_signed(&g, &BigInt::from(-2)).unwrap(),
            toy_point(80, 87)
        );
        assert_eq!(
            curve.scalar_multiply_signed(&g, &BigInt::from(2)).unwrap(),
            toy_point(80, 10)
        );
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let curve = toy_curve();
        let bogus = CurvePoint::affine(
            curve.field_element(BigUint::from(3u32)),
            curve.field_element(BigUint::from(7u32)),
        );
        assert_eq!(
            curve.scalar_multiply(&bogus, &BigInt::from(3)),
            Err(CurveError::PointNotOnCurve)
        );
    }
}
