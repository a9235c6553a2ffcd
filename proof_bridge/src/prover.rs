//! Proof generation. The prover is a black box taking a witness input and the circuit's artifacts
//! and returning a proof with its public signals. `SnarkjsProver` runs `snarkjs groth16 fullprove`.

use crate::{
    artifacts::CircuitArtifacts, error::Error, proof::SnarkjsProof, witness::WitnessInput, Result,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
    sync::Arc,
    time::Instant,
};
use tokio::task;

/// A proof and its public signals, circuit outputs first and then public inputs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverOutput {
    pub proof: SnarkjsProof,
    pub public_signals: Vec<String>,
}

pub trait CircuitProver {
    /// Compute the witness for `input` and prove it. Blocking and CPU bound. The artifacts have
    /// already been validated by [`generate_proof`].
    fn prove(
        &self,
        input: &serde_json::Value,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput>;
}

/// Proves with the `snarkjs` command line tool, exchanging files through a scratch directory that
/// is removed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnarkjsProver {
    executable: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl Default for SnarkjsProver {
    fn default() -> Self {
        Self::new()
    }
}

impl SnarkjsProver {
    /// Uses `snarkjs` from `PATH` and the system's temp directory
    pub fn new() -> Self {
        Self {
            executable: PathBuf::from("snarkjs"),
            scratch_dir: None,
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Parent of the per-proof scratch directories
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

/// Directory removed on drop
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(parent: &Path) -> Result<Self> {
        let dir = parent.join(format!("snarkjs_{:016x}", rand::thread_rng().gen::<u64>()));
        fs::create_dir_all(&dir)?;
        Ok(Self(dir))
    }

    fn path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.0) {
            log::warn!("Failed to remove {}: {}", self.0.display(), e);
        }
    }
}

impl CircuitProver for SnarkjsProver {
    fn prove(
        &self,
        input: &serde_json::Value,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput> {
        let parent = self.scratch_dir.clone().unwrap_or_else(env::temp_dir);
        let scratch = ScratchDir::new(&parent)?;
        let input_path = scratch.path("input.json");
        let proof_path = scratch.path("proof.json");
        let public_path = scratch.path("public.json");
        fs::write(&input_path, serde_json::to_vec(input)?)?;

        log::debug!(
            "Running {} groth16 fullprove with {}",
            self.executable.display(),
            artifacts.zkey.display()
        );
        let start = Instant::now();
        let output = Command::new(&self.executable)
            .arg("groth16")
            .arg("fullprove")
            .arg(&input_path)
            .arg(&artifacts.wasm)
            .arg(&artifacts.zkey)
            .arg(&proof_path)
            .arg(&public_path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::ProverUnavailable(format!(
                    "{} not found",
                    self.executable.display()
                )),
                _ => Error::ProverUnavailable(format!(
                    "cannot run {}: {}",
                    self.executable.display(),
                    e
                )),
            })?;
        log::debug!("snarkjs finished in {:?}", start.elapsed());

        // snarkjs reports some failures on stdout and doesn't always set the exit code
        if !output.status.success() || !proof_path.exists() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            log::error!("snarkjs failed with {}: {}", output.status, message);
            return Err(Error::ProverFailure(message));
        }

        let proof = serde_json::from_slice(&fs::read(&proof_path)?)
            .map_err(|e| Error::ProverFailure(format!("unreadable proof.json: {}", e)))?;
        let public_signals = serde_json::from_slice(&fs::read(&public_path)?)
            .map_err(|e| Error::ProverFailure(format!("unreadable public.json: {}", e)))?;
        Ok(ProverOutput {
            proof,
            public_signals,
        })
    }
}

/// Prove `input` with `prover` after checking the artifacts
pub fn generate_proof<P: CircuitProver + ?Sized>(
    prover: &P,
    input: &WitnessInput,
    artifacts: &CircuitArtifacts,
) -> Result<ProverOutput> {
    artifacts.validate()?;
    let json = input.to_json()?;
    let start = Instant::now();
    let output = prover.prove(&json, artifacts)?;
    log::debug!(
        "Proved {} input with {} public signals in {:?}",
        input.scheme(),
        output.public_signals.len(),
        start.elapsed()
    );
    Ok(output)
}

/// `generate_proof` on tokio's blocking thread pool. Dropping the returned future abandons the
/// proof: the blocking task runs to completion but its result is discarded.
pub async fn prove_async<P>(
    prover: Arc<P>,
    input: WitnessInput,
    artifacts: CircuitArtifacts,
) -> Result<ProverOutput>
where
    P: CircuitProver + Send + Sync + ?Sized + 'static,
{
    task::spawn_blocking(move || generate_proof(prover.as_ref(), &input, &artifacts))
        .await
        .map_err(|e| {
            if e.is_cancelled() {
                Error::Cancelled
            } else {
                Error::ProverFailure(format!("proving task panicked: {}", e))
            }
        })?
}
