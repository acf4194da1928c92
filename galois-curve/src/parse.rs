use crate::point::{CurvePoint, IDENTITY_TAG, UNCOMPRESSED_TAG};
use crate::{CurveError, EllipticCurve};

use num_bigint::{BigInt, BigUint, Sign};

/// Parses a decimal or `0x`-prefixed hexadecimal integer with an optional
/// leading minus sign.
pub fn parse_integer(input: &str) -> Result<BigInt, CurveError> {
    let trimmed = input.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, trimmed),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    // NOTE this check avoids `parse_bytes` accepting a second sign
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return Err(CurveError::InvalidEncoding(format!(
            "invalid integer {:?}",
            input
        )));
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
        CurveError::InvalidEncoding(format!("invalid integer {:?}", input))
    })?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

pub fn parse_unsigned(input: &str) -> Result<BigUint, CurveError> {
    parse_integer(input)?
        .to_biguint()
        .ok_or_else(|| CurveError::InvalidEncoding(format!("negative integer {:?}", input)))
}

/// Decodes `[0x00]` (identity) or `0x04 || x || y` and validates the point.
pub fn decode_point(curve: &EllipticCurve, bytes: &[u8]) -> Result<CurvePoint, CurveError> {
    let width = curve.byte_len();
    match bytes.split_first() {
        Some((&IDENTITY_TAG, [])) => Ok(CurvePoint::Infinity),
        Some((&UNCOMPRESSED_TAG, coordinates)) if coordinates.len() == 2 * width => {
            let (x, y) = coordinates.split_at(width);
            let x = BigUint::from_bytes_be(x);
            let y = BigUint::from_bytes_be(y);
            if &x >= curve.modulus() || &y >= curve.modulus() {
                return Err(CurveError::InvalidEncoding(
                    "coordinate exceeds the field modulus".to_string(),
                ));
            }
            curve.point(x, y)
        }
        Some((&UNCOMPRESSED_TAG, coordinates)) => Err(CurveError::InvalidEncoding(format!(
            "expected {} coordinate bytes, got {}",
            2 * width,
            coordinates.len()
        ))),
        Some((tag, _)) => Err(CurveError::InvalidEncoding(format!(
            "unsupported point tag {:#04x}",
            tag
        ))),
        None => Err(CurveError::InvalidEncoding("empty point encoding".to_string())),
    }
}

/// Hex variant of [`decode_point`], with or without a `0x` prefix.
pub fn parse_point(curve: &EllipticCurve, encoded: &str) -> Result<CurvePoint, CurveError> {
    let stripped = encoded.trim().trim_start_matches("0x");
    let bytes = hex::decode(stripped).map_err(|e| CurveError::InvalidEncoding(e.to_string()))?;
    decode_point(curve, &bytes)
}
