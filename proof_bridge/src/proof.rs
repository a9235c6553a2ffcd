//! Groth16 proofs over BN254 in the layouts used by snarkjs and by Solidity verifiers.
//!
//! snarkjs writes points in projective form with decimal coordinates: a G1 point is `[x, y, z]`
//! and a G2 point is `[[x.c0, x.c1], [y.c0, y.c1], [z.c0, z.c1]]`, with `z = 1` for affine points.
//! Verifier contracts take affine points and G2 coordinates ordered `[c1, c0]`.

use crate::{error::Error, Result};
use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{One, Zero};
use ark_groth16::Proof;
use ballot_crypto_utils::ff::{field_from_decimal, field_to_biguint, field_to_decimal};
use serde::{Deserialize, Serialize};

pub type G1Json = [String; 3];
pub type G2Json = [[String; 2]; 3];

fn fq(s: &str) -> core::result::Result<Fq, String> {
    field_from_decimal::<Fq>(s).map_err(|e| e.to_string())
}

fn fq2(c: &[String; 2]) -> core::result::Result<Fq2, String> {
    Ok(Fq2::new(fq(&c[0])?, fq(&c[1])?))
}

fn fq2_to_json(f: &Fq2) -> [String; 2] {
    [field_to_decimal(&f.c0), field_to_decimal(&f.c1)]
}

/// Parse a G1 point, checking it's on the curve. Malformed input is described by the error string.
pub fn g1_from_json(p: &G1Json) -> core::result::Result<G1Affine, String> {
    let (x, y, z) = (fq(&p[0])?, fq(&p[1])?, fq(&p[2])?);
    if z.is_zero() {
        return Ok(G1Affine::zero());
    }
    if !z.is_one() {
        return Err("G1 point is not normalized".to_string());
    }
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("G1 point is not on the curve".to_string());
    }
    Ok(point)
}

pub fn g1_to_json(p: &G1Affine) -> G1Json {
    match p.xy() {
        Some((x, y)) => [field_to_decimal(x), field_to_decimal(y), "1".to_string()],
        None => ["0".to_string(), "1".to_string(), "0".to_string()],
    }
}

/// Parse a G2 point, checking it's on the curve and in the prime order subgroup
pub fn g2_from_json(p: &G2Json) -> core::result::Result<G2Affine, String> {
    let (x, y, z) = (fq2(&p[0])?, fq2(&p[1])?, fq2(&p[2])?);
    if z.is_zero() {
        return Ok(G2Affine::zero());
    }
    if !z.is_one() {
        return Err("G2 point is not normalized".to_string());
    }
    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("G2 point is not on the curve".to_string());
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("G2 point is not in the prime order subgroup".to_string());
    }
    Ok(point)
}

pub fn g2_to_json(p: &G2Affine) -> G2Json {
    match p.xy() {
        Some((x, y)) => [fq2_to_json(x), fq2_to_json(y), fq2_to_json(&Fq2::one())],
        None => [
            fq2_to_json(&Fq2::zero()),
            fq2_to_json(&Fq2::one()),
            fq2_to_json(&Fq2::zero()),
        ],
    }
}

fn groth16() -> String {
    "groth16".to_string()
}

fn bn128() -> String {
    "bn128".to_string()
}

/// `proof.json` as written by `snarkjs groth16 prove`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: G1Json,
    pub pi_b: G2Json,
    pub pi_c: G1Json,
    #[serde(default = "groth16")]
    pub protocol: String,
    #[serde(default = "bn128")]
    pub curve: String,
}

impl SnarkjsProof {
    pub fn from_ark(proof: &Proof<Bn254>) -> Self {
        Self {
            pi_a: g1_to_json(&proof.a),
            pi_b: g2_to_json(&proof.b),
            pi_c: g1_to_json(&proof.c),
            protocol: groth16(),
            curve: bn128(),
        }
    }

    /// Fails with `MalformedProof` on another protocol or curve, on malformed coordinates and on
    /// points not in the right group
    pub fn to_ark(&self) -> Result<Proof<Bn254>> {
        if self.protocol != "groth16" {
            return Err(Error::MalformedProof(format!(
                "unsupported protocol {}",
                self.protocol
            )));
        }
        if self.curve != "bn128" {
            return Err(Error::MalformedProof(format!(
                "unsupported curve {}",
                self.curve
            )));
        }
        Ok(Proof {
            a: g1_from_json(&self.pi_a).map_err(Error::MalformedProof)?,
            b: g2_from_json(&self.pi_b).map_err(Error::MalformedProof)?,
            c: g1_from_json(&self.pi_c).map_err(Error::MalformedProof)?,
        })
    }
}

/// Proof arguments of a snarkjs generated Solidity verifier's `verifyProof`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidityProof {
    pub a: [String; 2],
    pub b: [[String; 2]; 2],
    pub c: [String; 2],
}

impl SolidityProof {
    /// `a`, `b` and `c` flattened into the eight `uint256` words, as decimal strings
    pub fn to_calldata(&self) -> [String; 8] {
        [
            self.a[0].clone(),
            self.a[1].clone(),
            self.b[0][0].clone(),
            self.b[0][1].clone(),
            self.b[1][0].clone(),
            self.b[1][1].clone(),
            self.c[0].clone(),
            self.c[1].clone(),
        ]
    }

    /// Same as `to_calldata` but as `0x` prefixed 32 byte hex words. Fails if a word is not a
    /// base field element.
    pub fn to_calldata_hex(&self) -> Result<[String; 8]> {
        let mut words = self.to_calldata();
        for w in words.iter_mut() {
            let f = field_from_decimal::<Fq>(w).map_err(|e| Error::MalformedProof(e.to_string()))?;
            *w = format!("0x{:064x}", field_to_biguint(&f));
        }
        Ok(words)
    }
}

/// Drop the projective coordinate of every point and swap the coordinates of each `Fq2` element
/// of `b` into the order the pairing precompile expects.
pub fn format_proof_for_solidity(proof: &SnarkjsProof) -> SolidityProof {
    let [a0, a1, _] = &proof.pi_a;
    let [b0, b1, _] = &proof.pi_b;
    let [c0, c1, _] = &proof.pi_c;
    SolidityProof {
        a: [a0.clone(), a1.clone()],
        b: [
            [b0[1].clone(), b0[0].clone()],
            [b1[1].clone(), b1[0].clone()],
        ],
        c: [c0.clone(), c1.clone()],
    }
}
