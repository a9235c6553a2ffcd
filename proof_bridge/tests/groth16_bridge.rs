use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, ProvingKey};
use ark_relations::{
    lc,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError},
};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ballot_crypto_utils::ff::{field_from_decimal, field_to_decimal};
use ballot_proof_bridge::{
    error::Error,
    format_proof_for_solidity, generate_proof, prove_async, verify_proof,
    witness::{ScalarVoteInput, WitnessInput},
    ArtifactStore, CircuitArtifacts, CircuitId, CircuitProver, ProverOutput, Scheme,
    SnarkjsProof, VerificationKey,
};
use homomorphic_ballot::{curve::GroupContext, keygen::KeyPair, tally::encrypt_scalar_vote};
use rand::Rng;
use std::{
    env, fs,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

/// Knowledge of `x` and `y` with `x * y` public
#[derive(Clone)]
struct MulCircuit {
    x: Option<Fr>,
    y: Option<Fr>,
}

impl ConstraintSynthesizer<Fr> for MulCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let out = cs.new_input_variable(|| {
            let x = self.x.ok_or(SynthesisError::AssignmentMissing)?;
            let y = self.y.ok_or(SynthesisError::AssignmentMissing)?;
            Ok(x * y)
        })?;
        let x = cs.new_witness_variable(|| self.x.ok_or(SynthesisError::AssignmentMissing))?;
        let y = cs.new_witness_variable(|| self.y.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(lc!() + x, lc!() + y, lc!() + out)?;
        Ok(())
    }
}

/// Proves `selectedOption * r` with `ark-groth16` and answers in snarkjs' format, standing in for
/// a compiled ballot circuit
struct NativeProver {
    pk: ProvingKey<Bn254>,
    delay: Duration,
}

impl NativeProver {
    fn setup() -> (Self, VerificationKey) {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (pk, vk) =
            Groth16::<Bn254>::circuit_specific_setup(MulCircuit { x: None, y: None }, &mut rng)
                .unwrap();
        (
            Self {
                pk,
                delay: Duration::ZERO,
            },
            VerificationKey::from_ark(&vk),
        )
    }
}

impl CircuitProver for NativeProver {
    fn prove(
        &self,
        input: &serde_json::Value,
        _artifacts: &CircuitArtifacts,
    ) -> ballot_proof_bridge::Result<ProverOutput> {
        std::thread::sleep(self.delay);
        let signal = |name: &str| -> ballot_proof_bridge::Result<Fr> {
            let s = input[name]
                .as_str()
                .ok_or_else(|| Error::ProverFailure(format!("missing input signal {}", name)))?;
            Ok(field_from_decimal::<Fr>(s)?)
        };
        let (x, y) = (signal("selectedOption")?, signal("r")?);
        let mut rng = StdRng::seed_from_u64(1u64);
        let proof = Groth16::<Bn254>::prove(
            &self.pk,
            MulCircuit {
                x: Some(x),
                y: Some(y),
            },
            &mut rng,
        )
        .map_err(|e| Error::ProverFailure(e.to_string()))?;
        Ok(ProverOutput {
            proof: SnarkjsProof::from_ark(&proof),
            public_signals: vec![field_to_decimal(&(x * y))],
        })
    }
}

fn fake_artifacts(circuit: &CircuitId) -> (PathBuf, CircuitArtifacts) {
    let dir = env::temp_dir().join(format!("groth16_bridge_{}", rand::thread_rng().gen::<u64>()));
    fs::create_dir_all(&dir).unwrap();
    let store = ArtifactStore::new(&dir);
    let paths = store.paths(circuit);
    fs::write(&paths.wasm, b"\0asm\x01\0\0\0").unwrap();
    fs::write(&paths.zkey, b"zkey\x01\0\0\0").unwrap();
    let artifacts = store.artifacts(circuit).unwrap();
    (dir, artifacts)
}

fn ballot_input(option: usize) -> WitnessInput {
    let mut rng = StdRng::seed_from_u64(2u64);
    let ctx = GroupContext::new().unwrap();
    let kp = KeyPair::generate_using_rng(&mut rng, &ctx);
    let (_, r) = encrypt_scalar_vote(&mut rng, &ctx, &kp.public_key, option, 8).unwrap();
    ScalarVoteInput::new(&kp.public_key, &r, option).into()
}

#[test]
fn prove_and_verify() {
    let (prover, vk) = NativeProver::setup();
    let circuit = CircuitId::new(Scheme::ElGamalVoteScalar, 8);
    let (dir, artifacts) = fake_artifacts(&circuit);

    let start = Instant::now();
    let output = generate_proof(&prover, &ballot_input(3), &artifacts).unwrap();
    println!("Proved in {:?}", start.elapsed());
    assert_eq!(output.public_signals.len(), 1);

    // Everything goes through snarkjs' JSON text, as it would when coming from another process
    let vk: VerificationKey =
        serde_json::from_str(&serde_json::to_string_pretty(&vk).unwrap()).unwrap();
    let proof: SnarkjsProof =
        serde_json::from_str(&serde_json::to_string(&output.proof).unwrap()).unwrap();

    let start = Instant::now();
    assert!(verify_proof(&vk, &output.public_signals, &proof).unwrap());
    println!("Verified in {:?}", start.elapsed());

    // Wrong public signal
    let wrong = vec![field_to_decimal(&Fr::from(7u64))];
    assert!(!verify_proof(&vk, &wrong, &proof).unwrap());

    // Wrong number of public signals
    let mut extra = output.public_signals.clone();
    extra.push("1".to_string());
    assert_eq!(
        verify_proof(&vk, &extra, &proof),
        Err(Error::PublicSignalCountMismatch(1, 2))
    );

    // Tampered proof
    let mut swapped = proof.clone();
    swapped.pi_a = proof.pi_c.clone();
    swapped.pi_c = proof.pi_a.clone();
    assert!(!verify_proof(&vk, &output.public_signals, &swapped).unwrap());

    // A proof for another ballot doesn't verify this one's signals
    let other = generate_proof(&prover, &ballot_input(5), &artifacts).unwrap();
    assert!(verify_proof(&vk, &other.public_signals, &other.proof).unwrap());
    assert!(!verify_proof(&vk, &output.public_signals, &other.proof).unwrap());

    let solidity = format_proof_for_solidity(&proof);
    assert_eq!(solidity.a, [proof.pi_a[0].clone(), proof.pi_a[1].clone()]);
    assert_eq!(
        solidity.b[1],
        [proof.pi_b[1][1].clone(), proof.pi_b[1][0].clone()]
    );
    assert_eq!(solidity.to_calldata().len(), 8);
    assert!(solidity
        .to_calldata_hex()
        .unwrap()
        .iter()
        .all(|w| w.len() == 66 && w.starts_with("0x")));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn prover_rejects_incomplete_witness() {
    let (prover, _) = NativeProver::setup();
    let circuit = CircuitId::new(Scheme::ElGamalVoteScalar, 8);
    let (dir, artifacts) = fake_artifacts(&circuit);
    let err = prover
        .prove(&serde_json::json!({ "r": "5" }), &artifacts)
        .unwrap_err();
    assert_eq!(
        err,
        Error::ProverFailure("missing input signal selectedOption".to_string())
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn async_proving() {
    let (prover, vk) = NativeProver::setup();
    let circuit = CircuitId::new(Scheme::ElGamalVoteScalar, 8);
    let (dir, artifacts) = fake_artifacts(&circuit);

    let output = prove_async(Arc::new(prover), ballot_input(1), artifacts.clone())
        .await
        .unwrap();
    assert!(verify_proof(&vk, &output.public_signals, &output.proof).unwrap());

    // Dropping the future abandons a slow proof without waiting for it
    let (mut slow, _) = NativeProver::setup();
    slow.delay = Duration::from_secs(2);
    let start = Instant::now();
    let res = tokio::time::timeout(
        Duration::from_millis(50),
        prove_async(Arc::new(slow), ballot_input(1), artifacts),
    )
    .await;
    assert!(res.is_err());
    assert!(start.elapsed() < Duration::from_secs(2));

    fs::remove_dir_all(&dir).unwrap();
}
