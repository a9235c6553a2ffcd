//! Circuit artifacts: the witness calculator compiled to WASM and the Groth16 proving key in
//! snarkjs' `.zkey` format. Both are opaque to this crate, only their headers are checked.

use crate::{circuit::CircuitId, error::Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

pub const WASM_MAGIC: [u8; 4] = *b"\0asm";
pub const ZKEY_MAGIC: [u8; 4] = *b"zkey";

/// Paths to the artifacts of one circuit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitArtifacts {
    pub wasm: PathBuf,
    pub zkey: PathBuf,
}

impl CircuitArtifacts {
    pub fn new(wasm: impl Into<PathBuf>, zkey: impl Into<PathBuf>) -> Self {
        Self {
            wasm: wasm.into(),
            zkey: zkey.into(),
        }
    }

    /// Check that both files exist and start with the expected magic bytes
    pub fn validate(&self) -> Result<()> {
        check_magic(&self.wasm, &WASM_MAGIC, "WASM module")?;
        check_magic(&self.zkey, &ZKEY_MAGIC, "zkey")
    }
}

fn check_magic(path: &Path, magic: &[u8; 4], kind: &str) -> Result<()> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::ArtifactNotFound(path.to_path_buf()),
        _ => Error::ArtifactCorrupt(path.to_path_buf(), e.to_string()),
    })?;
    let mut header = [0u8; 4];
    file.read_exact(&mut header).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            Error::ArtifactCorrupt(path.to_path_buf(), "file is truncated".to_string())
        }
        _ => Error::ArtifactCorrupt(path.to_path_buf(), e.to_string()),
    })?;
    if &header != magic {
        return Err(Error::ArtifactCorrupt(
            path.to_path_buf(),
            format!("not a {}", kind),
        ));
    }
    Ok(())
}

/// Directory holding `<name>.wasm` and `<name>.zkey` for every circuit, `name` as given by
/// `CircuitId::name`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStore {
    pub dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Artifact paths of `circuit`, without checking them
    pub fn paths(&self, circuit: &CircuitId) -> CircuitArtifacts {
        let name = circuit.name();
        CircuitArtifacts::new(
            self.dir.join(format!("{}.wasm", name)),
            self.dir.join(format!("{}.zkey", name)),
        )
    }

    /// Validated artifact paths of `circuit`
    pub fn artifacts(&self, circuit: &CircuitId) -> Result<CircuitArtifacts> {
        let artifacts = self.paths(circuit);
        artifacts.validate()?;
        Ok(artifacts)
    }
}
