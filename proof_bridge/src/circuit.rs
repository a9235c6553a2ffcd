//! Circuit identities. Artifacts are named after the scheme and the number of options the circuit
//! was compiled for, e.g. `elGamalVoteVector_N4`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    /// Ballot is one ElGamal encryption of the option index
    ElGamalVoteScalar,
    /// Ballot is ElGamal encryptions of a one-hot vector
    ElGamalVoteVector,
    /// Correct decryption of per-option aggregates
    ElGamalTallyDecrypt,
    /// Ballot is Pedersen commitments to a one-hot vector
    PedersenVoteVector,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::ElGamalVoteScalar,
        Scheme::ElGamalVoteVector,
        Scheme::ElGamalTallyDecrypt,
        Scheme::PedersenVoteVector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElGamalVoteScalar => "elGamalVoteScalar",
            Self::ElGamalVoteVector => "elGamalVoteVector",
            Self::ElGamalTallyDecrypt => "elGamalTallyDecrypt",
            Self::PedersenVoteVector => "pedersenVoteVector",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A circuit compiled for a scheme and a fixed number of options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitId {
    pub scheme: Scheme,
    pub num_choices: usize,
}

impl CircuitId {
    pub fn new(scheme: Scheme, num_choices: usize) -> Self {
        Self {
            scheme,
            num_choices,
        }
    }

    /// File stem of the circuit's artifacts
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_N{}", self.scheme, self.num_choices)
    }
}
