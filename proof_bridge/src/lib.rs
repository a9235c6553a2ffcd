//! Bridge between ballot cryptography and Groth16 circuits compiled with Circom.
//!
//! - Witness inputs for each circuit built from ballot objects, serialized to the JSON the
//!   circuit's witness calculator reads
//! - Proving through an opaque [`prover::CircuitProver`], by default `snarkjs`, optionally on
//!   tokio's blocking pool
//! - Native verification of snarkjs proofs with `ark-groth16`
//! - Conversion of proofs to the argument layout of Solidity verifiers

pub mod artifacts;
pub mod circuit;
pub mod error;
pub mod proof;
pub mod prover;
pub mod verifier;
pub mod witness;

pub type Result<T, E = error::Error> = core::result::Result<T, E>;

pub use artifacts::{ArtifactStore, CircuitArtifacts};
pub use circuit::{CircuitId, Scheme};
pub use proof::{format_proof_for_solidity, SnarkjsProof, SolidityProof};
pub use prover::{generate_proof, prove_async, CircuitProver, ProverOutput, SnarkjsProver};
pub use verifier::{verify_proof, Groth16Verifier, ProofVerifier, VerificationKey};
pub use witness::WitnessInput;
