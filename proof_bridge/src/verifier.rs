//! Native Groth16 verification of snarkjs proofs against snarkjs verification keys.

use crate::{
    error::Error,
    proof::{g1_from_json, g1_to_json, g2_from_json, g2_to_json, G1Json, G2Json, SnarkjsProof},
    Result,
};
use ark_bn254::{Bn254, Fq2, Fr};
use ark_ec::pairing::Pairing;
use ark_groth16::{prepare_verifying_key, Groth16, VerifyingKey};
use ark_snark::SNARK;
use ballot_crypto_utils::ff::{field_from_decimal, field_to_decimal};
use serde::{Deserialize, Serialize};

pub type Fq12Json = [[[String; 2]; 3]; 2];

/// `verification_key.json` as exported by `snarkjs zkey export verificationkey`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    pub protocol: String,
    pub curve: String,
    #[serde(rename = "nPublic")]
    pub n_public: usize,
    pub vk_alpha_1: G1Json,
    pub vk_beta_2: G2Json,
    pub vk_gamma_2: G2Json,
    pub vk_delta_2: G2Json,
    /// `e(alpha, beta)`, only used by the JavaScript verifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vk_alphabeta_12: Option<Fq12Json>,
    #[serde(rename = "IC")]
    pub ic: Vec<G1Json>,
}

fn fq2_to_json(f: &Fq2) -> [String; 2] {
    [field_to_decimal(&f.c0), field_to_decimal(&f.c1)]
}

impl VerificationKey {
    pub fn from_ark(vk: &VerifyingKey<Bn254>) -> Self {
        let alphabeta = Bn254::pairing(vk.alpha_g1, vk.beta_g2).0;
        let vk_alphabeta_12 = [
            [
                fq2_to_json(&alphabeta.c0.c0),
                fq2_to_json(&alphabeta.c0.c1),
                fq2_to_json(&alphabeta.c0.c2),
            ],
            [
                fq2_to_json(&alphabeta.c1.c0),
                fq2_to_json(&alphabeta.c1.c1),
                fq2_to_json(&alphabeta.c1.c2),
            ],
        ];
        Self {
            protocol: "groth16".to_string(),
            curve: "bn128".to_string(),
            n_public: vk.gamma_abc_g1.len().saturating_sub(1),
            vk_alpha_1: g1_to_json(&vk.alpha_g1),
            vk_beta_2: g2_to_json(&vk.beta_g2),
            vk_gamma_2: g2_to_json(&vk.gamma_g2),
            vk_delta_2: g2_to_json(&vk.delta_g2),
            vk_alphabeta_12: Some(vk_alphabeta_12),
            ic: vk.gamma_abc_g1.iter().map(g1_to_json).collect(),
        }
    }

    pub fn to_ark(&self) -> Result<VerifyingKey<Bn254>> {
        if self.protocol != "groth16" || self.curve != "bn128" {
            return Err(Error::MalformedVerificationKey(format!(
                "unsupported protocol {} over {}",
                self.protocol, self.curve
            )));
        }
        if self.ic.len() != self.n_public + 1 {
            return Err(Error::MalformedVerificationKey(format!(
                "{} IC points for {} public signals",
                self.ic.len(),
                self.n_public
            )));
        }
        Ok(VerifyingKey {
            alpha_g1: g1_from_json(&self.vk_alpha_1).map_err(Error::MalformedVerificationKey)?,
            beta_g2: g2_from_json(&self.vk_beta_2).map_err(Error::MalformedVerificationKey)?,
            gamma_g2: g2_from_json(&self.vk_gamma_2).map_err(Error::MalformedVerificationKey)?,
            delta_g2: g2_from_json(&self.vk_delta_2).map_err(Error::MalformedVerificationKey)?,
            gamma_abc_g1: self
                .ic
                .iter()
                .map(g1_from_json)
                .collect::<core::result::Result<Vec<_>, _>>()
                .map_err(Error::MalformedVerificationKey)?,
        })
    }
}

/// Public signals are decimal elements of the BN254 scalar field, circuit outputs first
pub fn parse_public_signals(signals: &[String]) -> Result<Vec<Fr>> {
    signals
        .iter()
        .map(|s| Ok(field_from_decimal::<Fr>(s)?))
        .collect()
}

/// Verification backend. `Ok(false)` means the proof is well-formed but invalid, errors mean the
/// inputs couldn't be interpreted or the backend failed.
pub trait ProofVerifier {
    fn verify(
        &self,
        vk: &VerificationKey,
        public_signals: &[String],
        proof: &SnarkjsProof,
    ) -> Result<bool>;
}

/// Verifies with `ark-groth16`, agreeing with `snarkjs groth16 verify`
#[derive(Clone, Copy, Debug, Default)]
pub struct Groth16Verifier;

impl ProofVerifier for Groth16Verifier {
    fn verify(
        &self,
        vk: &VerificationKey,
        public_signals: &[String],
        proof: &SnarkjsProof,
    ) -> Result<bool> {
        let vk = vk.to_ark()?;
        let proof = proof.to_ark()?;
        let inputs = parse_public_signals(public_signals)?;
        if inputs.len() + 1 != vk.gamma_abc_g1.len() {
            return Err(Error::PublicSignalCountMismatch(
                vk.gamma_abc_g1.len() - 1,
                inputs.len(),
            ));
        }
        let pvk = prepare_verifying_key(&vk);
        let valid =
            <Groth16<Bn254> as SNARK<Fr>>::verify_with_processed_vk(&pvk, &inputs, &proof)
                .map_err(|e| Error::VerifierFailure(e.to_string()))?;
        if !valid {
            log::debug!("Groth16 proof rejected");
        }
        Ok(valid)
    }
}

/// Verify with the native Groth16 verifier
pub fn verify_proof(
    vk: &VerificationKey,
    public_signals: &[String],
    proof: &SnarkjsProof,
) -> Result<bool> {
    Groth16Verifier.verify(vk, public_signals, proof)
}
