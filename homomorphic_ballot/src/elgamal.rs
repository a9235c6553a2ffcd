//! Exponential ElGamal: a message `m` is encrypted as the point `m * G`, which makes ciphertexts
//! additively homomorphic. Decryption yields `m * G` and recovering `m` needs a discrete log search,
//! so messages must stay within a bound known at decryption time.

use crate::{
    curve::{point_to_decimal, GroupContext, Point, PointProjective, Scalar},
    error::Error,
    keygen::{PublicKey, SecretKey},
    scalar::random_scalar_with,
    Result,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_iter, ops::Add, string::String};
use ballot_crypto_utils::{
    serde_utils::ArkObjectBytes,
    solve_discrete_log::{solve_discrete_log_bsgs, BabyStepTable},
};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

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
pub struct Ciphertext {
    /// Ephemeral public key `r * G`
    #[serde_as(as = "ArkObjectBytes")]
    pub c1: Point,
    /// `r * pk + m * G`
    #[serde_as(as = "ArkObjectBytes")]
    pub c2: Point,
}

impl Ciphertext {
    /// Encrypt `m` with randomness `r`. Reusing `r` for two messages under the same key leaks
    /// their difference.
    pub fn new(ctx: &GroupContext, public_key: &PublicKey, m: &Scalar, r: &Scalar) -> Self {
        let c1 = ctx.mul_generator(r);
        let c2 = (public_key.0 * r + ctx.generator() * m).into_affine();
        Self { c1, c2 }
    }

    /// Returns the ciphertext and randomness created for encryption
    pub fn new_using_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        ctx: &GroupContext,
        public_key: &PublicKey,
        m: u64,
    ) -> (Self, Scalar) {
        let r = random_scalar_with(rng);
        (Self::new(ctx, public_key, &Scalar::from(m), &r), r)
    }

    /// Encryption of 0 with zero randomness, the neutral element of ciphertext addition
    pub fn zero() -> Self {
        Self {
            c1: Point::zero(),
            c2: Point::zero(),
        }
    }

    /// `c2 - sk * c1`, i.e. `m * G`
    pub fn decrypt_point(&self, ctx: &GroupContext, secret_key: &SecretKey) -> Point {
        ctx.sub(&self.c2, &ctx.scalar_mul(&self.c1, secret_key.scalar()))
    }

    /// Recover `m` assuming it lies in `[0, max_msg]`
    pub fn decrypt(&self, ctx: &GroupContext, secret_key: &SecretKey, max_msg: u64) -> Result<u64> {
        let m = self.decrypt_point(ctx, secret_key);
        match solve_discrete_log_bsgs(max_msg, ctx.generator().into_group(), m.into_group()) {
            Some(m) => Ok(m),
            None => {
                log::warn!("Discrete log search up to {} exhausted", max_msg);
                Err(Error::NotFound { max_msg })
            }
        }
    }

    /// Same as `decrypt` with a precomputed baby step table over `G`, for decrypting many
    /// ciphertexts under one bound
    pub fn decrypt_using_table(
        &self,
        ctx: &GroupContext,
        secret_key: &SecretKey,
        table: &BabyStepTable<PointProjective>,
        max_msg: u64,
    ) -> Result<u64> {
        let m = self.decrypt_point(ctx, secret_key);
        table
            .search(max_msg, m.into_group())
            .ok_or(Error::NotFound { max_msg })
    }

    /// Sum of all ciphertexts, the encryption of the sum of their messages
    pub fn sum(ciphertexts: &[Self]) -> Self {
        let zero = || (PointProjective::default(), PointProjective::default());

        #[cfg(feature = "parallel")]
        let (c1, c2) = cfg_iter!(ciphertexts)
            .map(|c| (c.c1.into_group(), c.c2.into_group()))
            .reduce(zero, |(a1, a2), (b1, b2)| (a1 + b1, a2 + b2));

        #[cfg(not(feature = "parallel"))]
        let (c1, c2) = cfg_iter!(ciphertexts)
            .map(|c| (c.c1.into_group(), c.c2.into_group()))
            .fold(zero(), |(a1, a2), (b1, b2)| (a1 + b1, a2 + b2));

        let affine = PointProjective::normalize_batch(&[c1, c2]);
        Self {
            c1: affine[0],
            c2: affine[1],
        }
    }

    /// Both components on the curve and in the prime order subgroup. Run this on ciphertexts built
    /// from untrusted coordinates; canonical deserialization already checks it.
    pub fn validate(&self, ctx: &GroupContext) -> Result<()> {
        if ctx.is_valid(&self.c1) && ctx.is_valid(&self.c2) {
            Ok(())
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// `(c1, c2)` as decimal coordinates
    pub fn to_decimal(&self) -> ([String; 2], [String; 2]) {
        (point_to_decimal(&self.c1), point_to_decimal(&self.c2))
    }
}

impl Add for Ciphertext {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let sum = PointProjective::normalize_batch(&[
            self.c1.into_group() + other.c1.into_group(),
            self.c2.into_group() + other.c2.into_group(),
        ]);
        Self {
            c1: sum[0],
            c2: sum[1],
        }
    }
}

impl<'a> Add<&'a Ciphertext> for &'a Ciphertext {
    type Output = Ciphertext;

    fn add(self, other: &'a Ciphertext) -> Ciphertext {
        *self + *other
    }
}

/// `c1 = r * G`, `c2 = r * pk + m * G`
pub fn encrypt(ctx: &GroupContext, public_key: &PublicKey, m: &Scalar, r: &Scalar) -> Ciphertext {
    Ciphertext::new(ctx, public_key, m, r)
}

pub fn decrypt_point(ctx: &GroupContext, secret_key: &SecretKey, ciphertext: &Ciphertext) -> Point {
    ciphertext.decrypt_point(ctx, secret_key)
}

/// Full decryption, `Err(NotFound)` if the message isn't in `[0, max_msg]`
pub fn decrypt_scalar(
    ctx: &GroupContext,
    secret_key: &SecretKey,
    ciphertext: &Ciphertext,
    max_msg: u64,
) -> Result<u64> {
    ciphertext.decrypt(ctx, secret_key, max_msg)
}

/// Componentwise addition, decrypting to the sum of the messages
pub fn add_ciphertexts(a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
    a + b
}
