//! The two vote encodings and their tally accumulators.
//!
//! In the vector encoding a ballot is `N` ciphertexts of a one-hot vector. Ballots are summed
//! option-wise and only the `N` aggregates are ever decrypted, each with the number of ballots as
//! bound. In the scalar encoding a ballot is a single encryption of the option index, which can't
//! be summed into per-option counts, so every ballot is decrypted with bound `N - 1`.

use crate::{
    commitment::{commit_to_a_batch, verify_tally, Commitment},
    curve::{GroupContext, PointProjective, Scalar},
    elgamal::Ciphertext,
    error::Error,
    keygen::{PublicKey, SecretKey},
    scalar::{random_scalar_with, random_scalars},
    Result,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{cfg_iter, vec, vec::Vec};
use ballot_crypto_utils::solve_discrete_log::BabyStepTable;
use rand::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Vote vector with a 1 at `choice` and 0 elsewhere
pub fn one_hot(choice: usize, num_choices: usize) -> Result<Vec<u64>> {
    check_choice(choice, num_choices)?;
    let mut v = vec![0; num_choices];
    v[choice] = 1;
    Ok(v)
}

fn check_choice(choice: usize, num_choices: usize) -> Result<()> {
    if num_choices == 0 {
        return Err(Error::NoChoices);
    }
    if choice >= num_choices {
        return Err(Error::InvalidVote {
            choice,
            num_choices,
        });
    }
    Ok(())
}

/// Encrypt the one-hot vector of `choice`. Returns the ciphertexts and the randomness of each, the
/// latter being needed by the ballot proof.
pub fn encrypt_vector_vote<R: RngCore + CryptoRng>(
    rng: &mut R,
    ctx: &GroupContext,
    public_key: &PublicKey,
    choice: usize,
    num_choices: usize,
) -> Result<(Vec<Ciphertext>, Vec<Scalar>)> {
    let vote = one_hot(choice, num_choices)?;
    let randomness = random_scalars(rng, num_choices);
    let ciphertexts = cfg_iter!(vote)
        .zip(cfg_iter!(randomness))
        .map(|(v, r)| Ciphertext::new(ctx, public_key, &Scalar::from(*v), r))
        .collect::<Vec<_>>();
    Ok((ciphertexts, randomness))
}

/// Encrypt `choice` itself. Returns the ciphertext and its randomness.
pub fn encrypt_scalar_vote<R: RngCore + CryptoRng>(
    rng: &mut R,
    ctx: &GroupContext,
    public_key: &PublicKey,
    choice: usize,
    num_choices: usize,
) -> Result<(Ciphertext, Scalar)> {
    check_choice(choice, num_choices)?;
    let r = random_scalar_with(rng);
    Ok((
        Ciphertext::new(ctx, public_key, &Scalar::from(choice as u64), &r),
        r,
    ))
}

/// Commit to the one-hot vector of `choice` with fresh blinders. Returns the commitments and the
/// blinders.
pub fn commit_vector_vote<R: RngCore + CryptoRng>(
    rng: &mut R,
    ctx: &GroupContext,
    choice: usize,
    num_choices: usize,
) -> Result<(Vec<Commitment>, Vec<Scalar>)> {
    let vote = one_hot(choice, num_choices)?;
    let blinders = random_scalars(rng, num_choices);
    let commitments = commit_to_a_batch(ctx, &vote, &blinders)?;
    Ok((commitments, blinders))
}

/// Running option-wise sums of vector encoded ballots. Memory is `O(N)` regardless of the number
/// of ballots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorTally {
    aggregates: Vec<Ciphertext>,
    ballots: u64,
}

impl VectorTally {
    pub fn new(num_choices: usize) -> Result<Self> {
        if num_choices == 0 {
            return Err(Error::NoChoices);
        }
        Ok(Self {
            aggregates: vec![Ciphertext::zero(); num_choices],
            ballots: 0,
        })
    }

    pub fn num_choices(&self) -> usize {
        self.aggregates.len()
    }

    pub fn num_ballots(&self) -> u64 {
        self.ballots
    }

    /// Encrypted per-option counts, as expected by the tally decryption circuit
    pub fn aggregates(&self) -> &[Ciphertext] {
        &self.aggregates
    }

    pub fn add_ballot(&mut self, ballot: &[Ciphertext]) -> Result<()> {
        if ballot.len() != self.aggregates.len() {
            return Err(Error::VectorLengthMismatch(
                self.aggregates.len(),
                ballot.len(),
            ));
        }
        self.ballots = self.ballots.checked_add(1).ok_or(Error::TallyOverflow)?;
        for (agg, c) in self.aggregates.iter_mut().zip(ballot) {
            *agg = *agg + *c;
        }
        Ok(())
    }

    /// Decrypt every option's count. Since each ballot contributes at most 1 to an option, the
    /// number of ballots bounds each count, and one baby step table serves all options.
    pub fn decrypt(&self, ctx: &GroupContext, secret_key: &SecretKey) -> Result<Vec<u64>> {
        let table = BabyStepTable::for_max(self.ballots, ctx.generator().into_group());
        cfg_iter!(self.aggregates)
            .map(|agg| agg.decrypt_using_table(ctx, secret_key, &table, self.ballots))
            .collect()
    }
}

/// Per-option counts of scalar encoded ballots. Every ballot is decrypted when added, so this is
/// the coordinator's side only.
pub struct ScalarTally {
    counts: Vec<u64>,
    table: BabyStepTable<PointProjective>,
}

impl ScalarTally {
    pub fn new(ctx: &GroupContext, num_choices: usize) -> Result<Self> {
        if num_choices == 0 {
            return Err(Error::NoChoices);
        }
        Ok(Self {
            counts: vec![0; num_choices],
            table: BabyStepTable::for_max(
                (num_choices - 1) as u64,
                ctx.generator().into_group(),
            ),
        })
    }

    fn max_choice(&self) -> u64 {
        (self.counts.len() - 1) as u64
    }

    /// Decrypt `ballot` and count it. Returns the chosen option. A ballot not decrypting to a
    /// valid option is `NotFound` and isn't counted.
    pub fn add_ballot(
        &mut self,
        ctx: &GroupContext,
        secret_key: &SecretKey,
        ballot: &Ciphertext,
    ) -> Result<usize> {
        let choice =
            ballot.decrypt_using_table(ctx, secret_key, &self.table, self.max_choice())? as usize;
        self.counts[choice] = self.counts[choice]
            .checked_add(1)
            .ok_or(Error::TallyOverflow)?;
        Ok(choice)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn num_ballots(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Option-wise sums of vector vote commitments and of their blinders, once voters disclose them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentTally {
    aggregates: Vec<PointProjective>,
    blinder_sums: Vec<Scalar>,
}

impl CommitmentTally {
    pub fn new(num_choices: usize) -> Result<Self> {
        if num_choices == 0 {
            return Err(Error::NoChoices);
        }
        Ok(Self {
            aggregates: vec![PointProjective::default(); num_choices],
            blinder_sums: vec![Scalar::from(0u64); num_choices],
        })
    }

    pub fn add_ballot(&mut self, commitments: &[Commitment], blinders: &[Scalar]) -> Result<()> {
        let n = self.aggregates.len();
        if commitments.len() != n {
            return Err(Error::VectorLengthMismatch(n, commitments.len()));
        }
        if blinders.len() != n {
            return Err(Error::VectorLengthMismatch(n, blinders.len()));
        }
        for i in 0..n {
            self.aggregates[i] += commitments[i].0.into_group();
            self.blinder_sums[i] += blinders[i];
        }
        Ok(())
    }

    pub fn aggregates(&self) -> Vec<Commitment> {
        PointProjective::normalize_batch(&self.aggregates)
            .into_iter()
            .map(Commitment)
            .collect()
    }

    pub fn blinder_sums(&self) -> &[Scalar] {
        &self.blinder_sums
    }

    /// Check claimed per-option counts against the aggregated commitments
    pub fn verify(&self, ctx: &GroupContext, claimed: &[u64]) -> bool {
        if claimed.len() != self.aggregates.len() {
            return false;
        }
        self.aggregates()
            .iter()
            .zip(claimed)
            .zip(&self.blinder_sums)
            .all(|((agg, count), b)| verify_tally(ctx, agg, *count, b))
    }
}
