use ballot_crypto_utils::ff::DecimalParseError;
use homomorphic_ballot::error::Error as BallotError;
use std::{fmt, path::PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// No file at the given artifact path
    ArtifactNotFound(PathBuf),
    /// The artifact exists but can't be read or isn't a file of the expected kind
    ArtifactCorrupt(PathBuf, String),
    /// The prover rejected the witness or failed, with the prover's own message
    ProverFailure(String),
    /// The prover backend could not be started, like a missing `snarkjs` executable
    ProverUnavailable(String),
    /// The verifier couldn't run, as opposed to the proof being invalid
    VerifierFailure(String),
    MalformedProof(String),
    MalformedVerificationKey(String),
    /// A public signal is not a field element
    MalformedSignal(String),
    /// Expected number of public signals, given number
    PublicSignalCountMismatch(usize, usize),
    /// Expected length, given length
    VectorLengthMismatch(usize, usize),
    Io(String),
    Json(String),
    Ballot(BallotError),
    /// The blocking proving task was cancelled before finishing
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArtifactNotFound(p) => write!(f, "circuit artifact not found: {}", p.display()),
            Self::ArtifactCorrupt(p, reason) => {
                write!(f, "circuit artifact {} is unusable: {}", p.display(), reason)
            }
            Self::ProverFailure(msg) => write!(f, "prover failed: {}", msg),
            Self::ProverUnavailable(msg) => write!(f, "prover unavailable: {}", msg),
            Self::VerifierFailure(msg) => write!(f, "verifier failed: {}", msg),
            Self::MalformedProof(msg) => write!(f, "malformed proof: {}", msg),
            Self::MalformedVerificationKey(msg) => {
                write!(f, "malformed verification key: {}", msg)
            }
            Self::MalformedSignal(msg) => write!(f, "malformed public signal: {}", msg),
            Self::PublicSignalCountMismatch(expected, given) => write!(
                f,
                "verification key expects {} public signals but got {}",
                expected, given
            ),
            Self::VectorLengthMismatch(expected, given) => {
                write!(f, "expected {} elements but got {}", expected, given)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Ballot(e) => write!(f, "{}", e),
            Self::Cancelled => write!(f, "proving task was cancelled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<BallotError> for Error {
    fn from(e: BallotError) -> Self {
        Self::Ballot(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<DecimalParseError> for Error {
    fn from(e: DecimalParseError) -> Self {
        Self::MalformedSignal(e.to_string())
    }
}
