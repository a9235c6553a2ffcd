use ark_serialize::SerializationError;
use ark_std::{
    fmt,
    string::{String, ToString},
};
use ballot_crypto_utils::ff::DecimalParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The global group context was used before `GroupContext::init`
    NotInitialized,
    /// A protocol generator is off the curve, outside the prime order subgroup or degenerate
    InvalidGenerator,
    /// Aggregation over zero elements
    EmptyInput,
    /// No value in `[0, max_msg]` decrypts to the given point. This is recoverable, it means the
    /// plaintext is out of the expected range or the ciphertext was not validly constructed.
    NotFound { max_msg: u64 },
    /// A point is not on the curve or not in the prime order subgroup
    InvalidPoint,
    /// A secret key scalar is zero, so its public key would be the identity
    InvalidSecretKey,
    /// The chosen option is not smaller than the number of options
    InvalidVote { choice: usize, num_choices: usize },
    /// A ballot must offer at least one option
    NoChoices,
    /// Expected length, given length
    VectorLengthMismatch(usize, usize),
    /// A vote count overflowed `u64`
    TallyOverflow,
    MalformedDecimal(DecimalParseError),
    Serialization(String),
}

impl Error {
    /// Only an exhausted discrete log search is an expected outcome callers should branch on.
    /// Everything else indicates misconfiguration or misuse.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "group context is not initialized"),
            Self::InvalidGenerator => write!(f, "generator is not a valid subgroup element"),
            Self::EmptyInput => write!(f, "cannot aggregate an empty list"),
            Self::NotFound { max_msg } => {
                write!(f, "no message in [0, {}] matches the decrypted point", max_msg)
            }
            Self::InvalidPoint => write!(f, "point is not a valid subgroup element"),
            Self::InvalidSecretKey => write!(f, "secret key must be a non-zero scalar"),
            Self::InvalidVote {
                choice,
                num_choices,
            } => write!(f, "option {} is invalid for {} options", choice, num_choices),
            Self::NoChoices => write!(f, "a ballot needs at least one option"),
            Self::VectorLengthMismatch(expected, given) => {
                write!(f, "expected {} elements but got {}", expected, given)
            }
            Self::TallyOverflow => write!(f, "vote count overflowed"),
            Self::MalformedDecimal(e) => write!(f, "{}", e),
            Self::Serialization(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<DecimalParseError> for Error {
    fn from(e: DecimalParseError) -> Self {
        Self::MalformedDecimal(e)
    }
}

impl From<SerializationError> for Error {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e.to_string())
    }
}
