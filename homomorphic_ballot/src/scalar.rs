//! Secret scalars: keys, encryption randomness and commitment blinders.

use crate::{curve::Scalar, Result};
use ark_ff::PrimeField;
use ark_std::string::String;
use ballot_crypto_utils::ff::{field_from_decimal, field_to_decimal};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use zeroize::Zeroize;

/// Number of random bytes reduced into a scalar. 512 bits against a 251-bit order leaves a bias
/// of about 2^-261.
pub const RANDOM_SCALAR_BYTES: usize = 64;

/// A scalar uniformly distributed over `[0, SUBORDER)`, drawn from the operating system's CSPRNG
pub fn random_scalar() -> Scalar {
    random_scalar_with(&mut OsRng)
}

/// Same as `random_scalar` with a caller supplied CSPRNG
pub fn random_scalar_with<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; RANDOM_SCALAR_BYTES];
    rng.fill_bytes(&mut bytes);
    let s = Scalar::from_le_bytes_mod_order(&bytes);
    bytes.zeroize();
    s
}

/// `n` independent random scalars
pub fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| random_scalar_with(rng)).collect()
}

pub fn scalar_to_decimal(s: &Scalar) -> String {
    field_to_decimal(s)
}

/// Parse a decimal scalar, rejecting values not smaller than `SUBORDER`
pub fn scalar_from_decimal(s: &str) -> Result<Scalar> {
    Ok(field_from_decimal(s)?)
}

/// Sum of blinders (or randomness) modulo `SUBORDER`
pub fn sum_scalars(scalars: &[Scalar]) -> Scalar {
    scalars.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{curve::SUBORDER, error::Error};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use ballot_crypto_utils::ff::{field_to_biguint, modulus_as_biguint};

    #[test]
    fn random_scalars_are_reduced_and_distinct() {
        let order = modulus_as_biguint::<Scalar>();
        assert_eq!(order.to_string(), SUBORDER);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let s = random_scalar();
            assert!(field_to_biguint(&s) < order);
            assert!(seen.insert(s));
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let a = random_scalars(&mut StdRng::seed_from_u64(7u64), 5);
        let b = random_scalars(&mut StdRng::seed_from_u64(7u64), 5);
        let c = random_scalars(&mut StdRng::seed_from_u64(8u64), 5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn decimal_scalars() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let s = random_scalar_with(&mut rng);
        assert_eq!(scalar_from_decimal(&scalar_to_decimal(&s)).unwrap(), s);
        assert!(matches!(
            scalar_from_decimal(SUBORDER),
            Err(Error::MalformedDecimal(_))
        ));
        assert_eq!(
            sum_scalars(&[Scalar::from(2u64), Scalar::from(3u64)]),
            Scalar::from(5u64)
        );
    }
}
