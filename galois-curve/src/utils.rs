use num_bigint::BigUint;
use num_traits::{One, Zero};

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin with the first twelve primes as witnesses.
///
/// Deterministic below 3.3 * 10^24, a probable-prime test above.
pub fn is_probable_prime(candidate: &BigUint) -> bool {
    if candidate < &BigUint::from(2u8) {
        return false;
    }
    for &witness in WITNESSES.iter() {
        let witness = BigUint::from(witness);
        if candidate == &witness {
            return true;
        }
        if (candidate % &witness).is_zero() {
            return false;
        }
    }

    let n_minus_one = candidate - 1u8;
    // candidate is odd here, so n - 1 is even and nonzero
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &witness in WITNESSES.iter() {
        let mut x = BigUint::from(witness).modpow(&d, candidate);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % candidate;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
