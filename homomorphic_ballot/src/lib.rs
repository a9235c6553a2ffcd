//! Cryptographic core of a homomorphic voting scheme over BabyJubJub in circomlib's coordinates.
//!
//! - Exponential ElGamal, where ciphertexts add up to the encryption of the sum of their votes
//! - Bounded decryption through a baby-step giant-step discrete log search
//! - Pedersen commitments to votes, verifiable in aggregate once blinders are disclosed
//! - Vector (one-hot) and scalar (option index) vote encodings with their tally accumulators
//!
//! Every operation takes a [`curve::GroupContext`] explicitly. A process wide context is available
//! through [`curve::GroupContext::init`] and [`curve::GroupContext::get`], which the free functions
//! of [`keygen`] use.

pub mod commitment;
pub mod curve;
pub mod elgamal;
pub mod error;
pub mod keygen;
pub mod scalar;
pub mod tally;

pub type Result<T, E = error::Error> = core::result::Result<T, E>;

pub use commitment::{aggregate_commitments, commit, verify_tally, Commitment};
pub use curve::{GroupContext, Point, Scalar};
pub use elgamal::{add_ciphertexts, decrypt_point, decrypt_scalar, encrypt, Ciphertext};
pub use keygen::{generate_key_pair, get_public_key, KeyPair, PublicKey, SecretKey};
pub use scalar::random_scalar;
