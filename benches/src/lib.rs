use ark_std::rand::{rngs::StdRng, SeedableRng};
use homomorphic_ballot::{
    curve::GroupContext, elgamal::Ciphertext, keygen::KeyPair, tally::encrypt_vector_vote,
};

// Hardcoding ballot counts. This should ideally be taken/updated from command line input
pub const BALLOT_COUNTS: [usize; 5] = [100, 1_000, 10_000, 50_000, 100_000];

pub fn setup() -> (StdRng, GroupContext, KeyPair) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let ctx = GroupContext::new().expect("protocol generators are valid");
    let kp = KeyPair::generate_using_rng(&mut rng, &ctx);
    (rng, ctx, kp)
}

/// `count` vector ballots over `num_choices` options with choices cycling through the options
pub fn vector_ballots(
    rng: &mut StdRng,
    ctx: &GroupContext,
    kp: &KeyPair,
    num_choices: usize,
    count: usize,
) -> Vec<Vec<Ciphertext>> {
    (0..count)
        .map(|i| {
            encrypt_vector_vote(rng, ctx, &kp.public_key, i % num_choices, num_choices)
                .expect("choice is in range")
                .0
        })
        .collect()
}

/// Encryptions of 1, as contributed by a single option of vector ballots
pub fn unit_ciphertexts(
    rng: &mut StdRng,
    ctx: &GroupContext,
    kp: &KeyPair,
    count: usize,
) -> Vec<Ciphertext> {
    (0..count)
        .map(|_| Ciphertext::new_using_rng(rng, ctx, &kp.public_key, 1).0)
        .collect()
}
