//! Conversion between prime field elements and the decimal strings used by Circom tooling and
//! Solidity calldata.

use ark_ff::{BigInteger, PrimeField};
use ark_std::{
    fmt,
    string::{String, ToString},
};
use num_bigint::BigUint;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecimalParseError {
    /// The string was empty or contained something other than ASCII digits
    NotDecimal(String),
    /// The value is not smaller than the field modulus
    OutOfRange(String),
}

impl fmt::Display for DecimalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDecimal(s) => write!(f, "not a decimal integer: {:?}", s),
            Self::OutOfRange(s) => write!(f, "value {} is not smaller than the field modulus", s),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecimalParseError {}

pub fn field_to_biguint<F: PrimeField>(f: &F) -> BigUint {
    BigUint::from_bytes_le(&f.into_bigint().to_bytes_le())
}

pub fn modulus_as_biguint<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
}

/// Canonical decimal representation of `f`, i.e. of its integer representative in `[0, p)`.
pub fn field_to_decimal<F: PrimeField>(f: &F) -> String {
    field_to_biguint(f).to_string()
}

fn parse_decimal(s: &str) -> Result<BigUint, DecimalParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalParseError::NotDecimal(s.to_string()));
    }
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| DecimalParseError::NotDecimal(s.to_string()))
}

/// Parse a decimal string into a field element. Values not smaller than the modulus are rejected
/// rather than silently reduced.
pub fn field_from_decimal<F: PrimeField>(s: &str) -> Result<F, DecimalParseError> {
    let n = parse_decimal(s)?;
    if n >= modulus_as_biguint::<F>() {
        return Err(DecimalParseError::OutOfRange(s.to_string()));
    }
    Ok(F::from_le_bytes_mod_order(&n.to_bytes_le()))
}
