use crate::CurveError;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use std::fmt;
use std::sync::Arc;

/// Element of the prime field `F_p`.
///
/// The modulus travels with every value, so elements of different fields
/// cannot be mixed by accident: arithmetic between them panics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl FieldElement {
    pub fn new(number: BigUint, modulus: Arc<BigUint>) -> Self {
        let value = if number < *modulus {
            number
        } else {
            number % modulus.as_ref()
        };

        Self { value, modulus }
    }

    pub fn from_u64(number: u64, modulus: Arc<BigUint>) -> Self {
        Self::new(BigUint::from(number), modulus)
    }

    /// Reduces a signed integer into `[0, p)`, e.g. `-1` becomes `p - 1`.
    pub fn from_bigint(number: &BigInt, modulus: Arc<BigUint>) -> Self {
        let signed_modulus = BigInt::from(modulus.as_ref().clone());
        // mod_floor with a positive modulus is never negative
        let reduced = number.mod_floor(&signed_modulus).magnitude().clone();
        Self::new(reduced, modulus)
    }

    pub fn zero(modulus: Arc<BigUint>) -> Self {
        Self {
            value: BigUint::zero(),
            modulus,
        }
    }

    pub fn one(modulus: Arc<BigUint>) -> Self {
        Self {
            value: BigUint::one(),
            modulus,
        }
    }

    #[inline(always)]
    pub fn inner(&self) -> &BigUint {
        &self.value
    }

    #[inline(always)]
    pub fn modulus(&self) -> &Arc<BigUint> {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn square(&self) -> Self {
        self.mul_mod(self)
    }

    pub fn double(&self) -> Self {
        self.add_mod(self)
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            value: self.value.modpow(exponent, &self.modulus),
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Multiplicative inverse via Fermat's little theorem: `x^(p - 2)`.
    ///
    /// Not constant time.
    pub fn inverse(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        let exponent = self.modulus.as_ref() - 2u8;
        Ok(self.pow(&exponent))
    }

    /// Big-endian encoding, left padded to the byte length of the modulus.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let width = byte_len(&self.modulus);
        let raw = self.value.to_bytes_be();
        let mut bytes = vec![0u8; width.saturating_sub(raw.len())];
        bytes.extend_from_slice(&raw);
        bytes
    }

    fn assert_same_field(&self, other: &Self) {
        assert!(
            self.modulus == other.modulus,
            "field elements belong to different moduli"
        );
    }

    fn add_mod(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        let mut sum = &self.value + &other.value;
        if sum >= *self.modulus {
            sum -= self.modulus.as_ref();
        }
        Self {
            value: sum,
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn sub_mod(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        let value = if self.value >= other.value {
            &self.value - &other.value
        } else {
            self.modulus.as_ref() - &other.value + &self.value
        };
        Self {
            value,
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn mul_mod(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        Self {
            value: (&self.value * &other.value) % self.modulus.as_ref(),
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn neg_mod(&self) -> Self {
        let value = if self.is_zero() {
            BigUint::zero()
        } else {
            self.modulus.as_ref() - &self.value
        };
        Self {
            value,
            modulus: Arc::clone(&self.modulus),
        }
    }
}

/// Number of bytes needed to hold any residue of `modulus`.
pub fn byte_len(modulus: &BigUint) -> usize {
    ((modulus.bits() + 7) / 8) as usize
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<'a, 'b> std::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        self.add_mod(rhs)
    }
}

impl std::ops::Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.add_mod(&rhs)
    }
}

impl std::ops::AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_mod(&rhs);
    }
}

impl std::ops::AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &Self) {
        *self = self.add_mod(rhs);
    }
}

impl std::ops::Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_mod(&rhs)
    }
}

impl<'a, 'b> std::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        self.sub_mod(rhs)
    }
}

impl std::ops::SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.sub_mod(&rhs);
    }
}

impl std::ops::SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.sub_mod(rhs);
    }
}

impl std::ops::Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.neg_mod()
    }
}

impl std::ops::Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        self.neg_mod()
    }
}

impl std::ops::Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_mod(&rhs)
    }
}

impl<'a, 'b> std::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        self.mul_mod(rhs)
    }
}

impl std::ops::MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_mod(&rhs);
    }
}

impl std::ops::MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.mul_mod(rhs);
    }
}
