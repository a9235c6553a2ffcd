//! BabyJubJub in the coordinates used by circomlib, i.e. the twisted Edwards curve
//! `168700 * x^2 + y^2 = 1 + 168696 * x^2 * y^2` over the BN254 scalar field, and the group
//! context every other module works with.
//!
//! `ark-ed-on-bn254` describes the same group through an isomorphic curve with `a = 1`, so its
//! coordinates differ from the ones Circom circuits expect. The curve is redefined here with
//! circomlib's coefficients and generator (`Base8`) while reusing its fields.

use crate::{error::Error, Result};
use ark_ec::{
    twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig},
    AffineRepr, CurveConfig, CurveGroup,
};
use ark_ff::MontFp;
use ark_std::string::String;
use ballot_crypto_utils::{
    ff::{field_from_decimal, field_to_decimal},
    hashing_utils::te_affine_from_try_and_incr,
};
use sha2::Sha256;
use std::sync::OnceLock;

pub use ark_ed_on_bn254::{Fq, Fr};

/// Element of the prime order subgroup of BabyJubJub. Immutable, all operations return new points.
pub type Point = Affine<BabyJubJubConfig>;
pub type PointProjective = Projective<BabyJubJubConfig>;
/// Integer modulo the subgroup order `SUBORDER`. Keys, randomness and blinders are scalars.
pub type Scalar = Fr;

/// Order of the prime subgroup generated by `Base8`
pub const SUBORDER: &str =
    "2736030358979909402780800718157159386076813972158567259200215660948447373041";

/// Label hashed to the second Pedersen generator `H`
pub const PEDERSEN_H_LABEL: &[u8] = b"homomorphic-ballot/pedersen/H";

const BASE8_X: Fq =
    MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553");
const BASE8_Y: Fq =
    MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203");

// `te_affine_from_try_and_incr::<BabyJubJubConfig, Sha256>(PEDERSEN_H_LABEL)`
const PEDERSEN_H_X: Fq =
    MontFp!("5749393285762571820744923493117338069394319355910553555185411577577658233496");
const PEDERSEN_H_Y: Fq =
    MontFp!("15434503849961879882418443431619739769492033052588404354321790735583116574039");

#[derive(Clone, Default, PartialEq, Eq)]
pub struct BabyJubJubConfig;

impl CurveConfig for BabyJubJubConfig {
    type BaseField = Fq;
    type ScalarField = Fr;

    /// COFACTOR = 8
    const COFACTOR: &'static [u64] = &[8];

    /// COFACTOR^(-1) mod SUBORDER
    const COFACTOR_INV: Fr =
        MontFp!("2394026564107420727433200628387514462817212225638746351800188703329891451411");
}

impl TECurveConfig for BabyJubJubConfig {
    const COEFF_A: Fq = MontFp!("168700");
    const COEFF_D: Fq = MontFp!("168696");
    const GENERATOR: Point = Point::new_unchecked(BASE8_X, BASE8_Y);

    type MontCurveConfig = BabyJubJubConfig;
}

/// Montgomery form `y^2 = x^3 + 168698 * x^2 + x`
impl MontCurveConfig for BabyJubJubConfig {
    const COEFF_A: Fq = MontFp!("168698");
    const COEFF_B: Fq = MontFp!("1");

    type TECurveConfig = BabyJubJubConfig;
}

/// Curve generators shared by every operation: the ElGamal/commitment base `G` (`Base8`) and
/// the Pedersen blinding base `H`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupContext {
    g: Point,
    h: Point,
}

static CONTEXT: OnceLock<GroupContext> = OnceLock::new();

impl GroupContext {
    /// Build a context with the protocol generators, checking both of them.
    pub fn new() -> Result<Self> {
        Self::with_blinding_generator(Point::new_unchecked(PEDERSEN_H_X, PEDERSEN_H_Y))
    }

    /// Build a context with a custom Pedersen generator `h`. Fails with `InvalidGenerator` if `h`
    /// is not a non-identity subgroup element distinct from `G`.
    pub fn with_blinding_generator(h: Point) -> Result<Self> {
        let g = BabyJubJubConfig::GENERATOR;
        for p in [&g, &h] {
            if !is_valid_point(p) || p.is_zero() {
                return Err(Error::InvalidGenerator);
            }
        }
        if g == h {
            return Err(Error::InvalidGenerator);
        }
        Ok(Self { g, h })
    }

    /// Initialize the process wide context. Safe to call any number of times from any number of
    /// threads, every call returns the same context.
    pub fn init() -> Result<&'static Self> {
        if let Some(ctx) = CONTEXT.get() {
            return Ok(ctx);
        }
        let ctx = Self::new()?;
        let ctx = CONTEXT.get_or_init(|| ctx);
        log::debug!("Initialized BabyJubJub group context");
        Ok(ctx)
    }

    /// The process wide context, or `NotInitialized` if `init` hasn't been called yet.
    pub fn get() -> Result<&'static Self> {
        CONTEXT.get().ok_or(Error::NotInitialized)
    }

    pub fn generator(&self) -> Point {
        self.g
    }

    pub fn blinding_generator(&self) -> Point {
        self.h
    }

    pub fn identity(&self) -> Point {
        Point::zero()
    }

    pub fn add(&self, p: &Point, q: &Point) -> Point {
        (p.into_group() + q.into_group()).into_affine()
    }

    pub fn sub(&self, p: &Point, q: &Point) -> Point {
        self.add(p, &self.neg(q))
    }

    /// Negation only flips `x`. This holds for twisted Edwards curves in particular, not for
    /// elliptic curves in general.
    pub fn neg(&self, p: &Point) -> Point {
        Point::new_unchecked(-p.x, p.y)
    }

    pub fn scalar_mul(&self, p: &Point, k: &Scalar) -> Point {
        (*p * k).into_affine()
    }

    /// `k * G`
    pub fn mul_generator(&self, k: &Scalar) -> Point {
        self.scalar_mul(&self.g, k)
    }

    /// `m * G` for a plaintext integer
    pub fn encode_message(&self, m: u64) -> Point {
        self.mul_generator(&Scalar::from(m))
    }

    pub fn on_curve(&self, p: &Point) -> bool {
        p.is_on_curve()
    }

    /// On the curve and in the prime order subgroup
    pub fn is_valid(&self, p: &Point) -> bool {
        is_valid_point(p)
    }
}

fn is_valid_point(p: &Point) -> bool {
    p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()
}

/// Recompute the Pedersen generator from its label. Its result is pinned in `GroupContext::new`.
pub fn derive_blinding_generator() -> Point {
    te_affine_from_try_and_incr::<BabyJubJubConfig, Sha256>(PEDERSEN_H_LABEL)
}

/// Affine coordinates as decimal strings, the form Circom inputs and calldata use
pub fn point_to_decimal(p: &Point) -> [String; 2] {
    [field_to_decimal(&p.x), field_to_decimal(&p.y)]
}

/// Parse decimal coordinates, rejecting points outside the prime order subgroup
pub fn point_from_decimal(coords: &[String; 2]) -> Result<Point> {
    let x = field_from_decimal::<Fq>(&coords[0])?;
    let y = field_from_decimal::<Fq>(&coords[1])?;
    let p = Point::new_unchecked(x, y);
    if !is_valid_point(&p) {
        return Err(Error::InvalidPoint);
    }
    Ok(p)
}
