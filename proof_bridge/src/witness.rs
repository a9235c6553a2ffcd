//! Witness inputs in the exact JSON shape each circuit's witness calculator expects. Every number
//! is a decimal string and points are `[x, y]` pairs.

use crate::{circuit::Scheme, error::Error, Result};
use homomorphic_ballot::{
    commitment::Commitment,
    curve::Scalar,
    elgamal::Ciphertext,
    keygen::{PublicKey, SecretKey},
    scalar::scalar_to_decimal,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

fn decimals(values: &[u64]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn scalar_decimals(values: &[Scalar]) -> Vec<String> {
    values.iter().map(scalar_to_decimal).collect()
}

fn check_len(expected: usize, given: usize) -> Result<()> {
    if expected != given {
        return Err(Error::VectorLengthMismatch(expected, given));
    }
    Ok(())
}

/// Input of `elGamalVoteScalar_N{k}`: the option index was encrypted under `pk` with randomness `r`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarVoteInput {
    pub pk: [String; 2],
    pub r: String,
    pub selected_option: String,
}

impl ScalarVoteInput {
    pub fn new(public_key: &PublicKey, r: &Scalar, selected_option: usize) -> Self {
        Self {
            pk: public_key.to_decimal(),
            r: scalar_to_decimal(r),
            selected_option: selected_option.to_string(),
        }
    }
}

/// Input of `elGamalVoteVector_N{k}`: each entry of the one-hot `vote` was encrypted under `pk` with
/// the corresponding entry of `r`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorVoteInput {
    pub pk: [String; 2],
    pub vote: Vec<String>,
    pub r: Vec<String>,
}

impl VectorVoteInput {
    pub fn new(public_key: &PublicKey, vote: &[u64], r: &[Scalar]) -> Result<Self> {
        check_len(vote.len(), r.len())?;
        Ok(Self {
            pk: public_key.to_decimal(),
            vote: decimals(vote),
            r: scalar_decimals(r),
        })
    }
}

/// Input of `elGamalTallyDecrypt_N{k}`, proving that the per-option aggregates decrypt to `tally`
/// under the secret key of `pk`. Holds the secret key, so it's zeroized on drop and redacted in
/// `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct TallyDecryptInput {
    pub pk: [String; 2],
    pub agg_c1: Vec<[String; 2]>,
    pub agg_c2: Vec<[String; 2]>,
    pub tally: Vec<String>,
    pub sk: String,
}

impl fmt::Debug for TallyDecryptInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TallyDecryptInput")
            .field("pk", &self.pk)
            .field("agg_c1", &self.agg_c1)
            .field("agg_c2", &self.agg_c2)
            .field("tally", &self.tally)
            .field("sk", &"<redacted>")
            .finish()
    }
}

impl TallyDecryptInput {
    /// `aggregates` are the per-option sums of vector ballots, e.g. `VectorTally::aggregates`
    pub fn new(
        public_key: &PublicKey,
        aggregates: &[Ciphertext],
        tally: &[u64],
        secret_key: &SecretKey,
    ) -> Result<Self> {
        check_len(aggregates.len(), tally.len())?;
        let (agg_c1, agg_c2) = aggregates.iter().map(|c| c.to_decimal()).unzip();
        Ok(Self {
            pk: public_key.to_decimal(),
            agg_c1,
            agg_c2,
            tally: decimals(tally),
            sk: secret_key.to_decimal(),
        })
    }
}

/// Input of `pedersenVoteVector_N{k}`: each entry of `commitments` commits to the entries of the
/// one-hot `vote` and `blinder` at the same index
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedersenVoteInput {
    pub vote: Vec<String>,
    pub blinder: Vec<String>,
    pub commitments: Vec<[String; 2]>,
}

impl PedersenVoteInput {
    pub fn new(vote: &[u64], blinders: &[Scalar], commitments: &[Commitment]) -> Result<Self> {
        check_len(vote.len(), blinders.len())?;
        check_len(vote.len(), commitments.len())?;
        Ok(Self {
            vote: decimals(vote),
            blinder: scalar_decimals(blinders),
            commitments: commitments.iter().map(|c| c.to_decimal()).collect(),
        })
    }
}

/// Input of any of the supported circuits
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WitnessInput {
    ScalarVote(ScalarVoteInput),
    VectorVote(VectorVoteInput),
    TallyDecrypt(TallyDecryptInput),
    PedersenVote(PedersenVoteInput),
}

impl WitnessInput {
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::ScalarVote(_) => Scheme::ElGamalVoteScalar,
            Self::VectorVote(_) => Scheme::ElGamalVoteVector,
            Self::TallyDecrypt(_) => Scheme::ElGamalTallyDecrypt,
            Self::PedersenVote(_) => Scheme::PedersenVoteVector,
        }
    }

    /// Number of options implied by the input. The scalar scheme's input doesn't carry it.
    pub fn num_choices(&self) -> Option<usize> {
        match self {
            Self::ScalarVote(_) => None,
            Self::VectorVote(i) => Some(i.vote.len()),
            Self::TallyDecrypt(i) => Some(i.tally.len()),
            Self::PedersenVote(i) => Some(i.vote.len()),
        }
    }

    /// The JSON object handed to the witness calculator
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Self::ScalarVote(i) => serde_json::to_value(i)?,
            Self::VectorVote(i) => serde_json::to_value(i)?,
            Self::TallyDecrypt(i) => serde_json::to_value(i)?,
            Self::PedersenVote(i) => serde_json::to_value(i)?,
        })
    }
}

impl From<ScalarVoteInput> for WitnessInput {
    fn from(i: ScalarVoteInput) -> Self {
        Self::ScalarVote(i)
    }
}

impl From<VectorVoteInput> for WitnessInput {
    fn from(i: VectorVoteInput) -> Self {
        Self::VectorVote(i)
    }
}

impl From<TallyDecryptInput> for WitnessInput {
    fn from(i: TallyDecryptInput) -> Self {
        Self::TallyDecrypt(i)
    }
}

impl From<PedersenVoteInput> for WitnessInput {
    fn from(i: PedersenVoteInput) -> Self {
        Self::PedersenVote(i)
    }
}
