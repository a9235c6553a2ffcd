//! ElGamal key pairs. The public key is `sk * G` with `G` the `Base8` generator.

use crate::{
    curve::{point_from_decimal, point_to_decimal, GroupContext, Point, Scalar},
    error::Error,
    scalar::{random_scalar_with, scalar_to_decimal},
    Result,
};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{fmt, string::String};
use ballot_crypto_utils::{impl_deref, serde_utils::ArkObjectBytes};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Decryption key. Zeroized on drop, redacted in `Debug` and deliberately not serializable.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Scalar);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl SecretKey {
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(random_scalar_with(rng))
    }

    /// Fails for zero as its public key is the identity
    pub fn from_scalar(s: Scalar) -> Result<Self> {
        if s.is_zero() {
            return Err(Error::InvalidSecretKey);
        }
        Ok(Self(s))
    }

    /// Interpret little-endian bytes as an integer reduced modulo `SUBORDER`
    pub fn from_bytes_mod_order(bytes: &[u8]) -> Result<Self> {
        Self::from_scalar(Scalar::from_le_bytes_mod_order(bytes))
    }

    pub fn scalar(&self) -> &Scalar {
        &self.0
    }

    /// Decimal form for circuit witnesses. The caller owns keeping the string private.
    pub fn to_decimal(&self) -> String {
        scalar_to_decimal(&self.0)
    }
}

#[serde_as]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct PublicKey(#[serde_as(as = "ArkObjectBytes")] pub Point);

impl_deref!(PublicKey(Point));

impl PublicKey {
    pub fn new(ctx: &GroupContext, secret_key: &SecretKey) -> Self {
        Self(ctx.mul_generator(&secret_key.0))
    }

    pub fn to_decimal(&self) -> [String; 2] {
        point_to_decimal(&self.0)
    }

    /// Parse decimal coordinates from an untrusted source, rejecting invalid and identity points
    pub fn from_decimal(coords: &[String; 2]) -> Result<Self> {
        let p = point_from_decimal(coords)?;
        if p.is_zero() {
            return Err(Error::InvalidPoint);
        }
        Ok(Self(p))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a key pair from the operating system's CSPRNG
    pub fn generate(ctx: &GroupContext) -> Self {
        Self::generate_using_rng(&mut OsRng, ctx)
    }

    pub fn generate_using_rng<R: RngCore + CryptoRng>(rng: &mut R, ctx: &GroupContext) -> Self {
        loop {
            let secret_key = SecretKey::new(rng);
            // Only hit with probability 2^-251
            if secret_key.0.is_zero() {
                continue;
            }
            return Self::from_secret_key(ctx, secret_key);
        }
    }

    pub fn from_secret_key(ctx: &GroupContext, secret_key: SecretKey) -> Self {
        let public_key = PublicKey::new(ctx, &secret_key);
        Self {
            secret_key,
            public_key,
        }
    }
}

/// Generate a key pair with the global context
pub fn generate_key_pair() -> Result<KeyPair> {
    let ctx = GroupContext::get()?;
    Ok(KeyPair::generate(ctx))
}

/// Deterministically re-derive the public key of `secret_key` with the global context
pub fn get_public_key(secret_key: &SecretKey) -> Result<PublicKey> {
    let ctx = GroupContext::get()?;
    Ok(PublicKey::new(ctx, secret_key))
}
