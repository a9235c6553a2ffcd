//! Pedersen commitments `v * G + b * H` to votes, aggregated homomorphically and opened in
//! aggregate once the blinders are disclosed.

use crate::{
    curve::{point_to_decimal, GroupContext, Point, PointProjective, Scalar},
    error::Error,
    Result,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::string::String;
use ballot_crypto_utils::{
    commitment::PedersenCommitmentKey, impl_deref, serde_utils::ArkObjectBytes,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[serde_as]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Commitment(#[serde_as(as = "ArkObjectBytes")] pub Point);

impl_deref!(Commitment(Point));

impl Commitment {
    pub fn to_decimal(&self) -> [String; 2] {
        point_to_decimal(&self.0)
    }
}

impl GroupContext {
    /// Commitment key `(G, H)`
    pub fn commitment_key(&self) -> PedersenCommitmentKey<Point> {
        PedersenCommitmentKey::new(self.generator(), self.blinding_generator())
    }
}

/// `v * G + b * H`
pub fn commit(ctx: &GroupContext, v: u64, blinder: &Scalar) -> Commitment {
    Commitment(ctx.commitment_key().commit(&Scalar::from(v), blinder))
}

/// Commit to each vote with its own blinder
pub fn commit_to_a_batch(
    ctx: &GroupContext,
    votes: &[u64],
    blinders: &[Scalar],
) -> Result<Vec<Commitment>> {
    if votes.len() != blinders.len() {
        return Err(Error::VectorLengthMismatch(votes.len(), blinders.len()));
    }
    let votes = votes.iter().map(|v| Scalar::from(*v)).collect::<Vec<_>>();
    Ok(ctx
        .commitment_key()
        .commit_to_a_batch(&votes, blinders)
        .into_iter()
        .map(Commitment)
        .collect())
}

/// Sum of commitments, committing to the sum of votes under the sum of blinders
pub fn aggregate_commitments(commitments: &[Commitment]) -> Result<Commitment> {
    if commitments.is_empty() {
        return Err(Error::EmptyInput);
    }
    let sum = commitments
        .iter()
        .fold(PointProjective::default(), |acc, c| acc + c.0.into_group());
    Ok(Commitment(sum.into_affine()))
}

/// Check that `aggregate` commits to `claimed_tally` under `sum_of_blinders`. Needs no secret key.
pub fn verify_tally(
    ctx: &GroupContext,
    aggregate: &Commitment,
    claimed_tally: u64,
    sum_of_blinders: &Scalar,
) -> bool {
    ctx.commitment_key()
        .open(&aggregate.0, &Scalar::from(claimed_tally), sum_of_blinders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{random_scalar_with, random_scalars, sum_scalars};
    use ark_ff::One;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn tally_verification() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let ctx = GroupContext::new().unwrap();
        let b1 = random_scalar_with(&mut rng);
        let b2 = random_scalar_with(&mut rng);
        let b3 = random_scalar_with(&mut rng);

        let c1 = commit(&ctx, 1, &b1);
        let c2 = commit(&ctx, 0, &b2);
        let c3 = commit(&ctx, 1, &b3);
        let agg = aggregate_commitments(&[c1, c2, c3]).unwrap();

        assert!(verify_tally(&ctx, &agg, 2, &(b1 + b2 + b3)));
        assert!(!verify_tally(&ctx, &agg, 0, &b1));
        assert!(!verify_tally(&ctx, &agg, 2, &(b1 + Scalar::one())));
        assert!(!verify_tally(&ctx, &agg, 1, &(b1 + b2 + b3)));
        assert!(!verify_tally(&ctx, &agg, 3, &(b1 + b2 + b3)));
        assert!(!verify_tally(&ctx, &agg, 2, &(b1 + b2 + b3 + Scalar::one())));
    }

    #[test]
    fn hiding_and_binding_shape() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let ctx = GroupContext::new().unwrap();
        let b = random_scalar_with(&mut rng);
        // Same vote under different blinders gives different commitments
        assert_ne!(
            commit(&ctx, 1, &b),
            commit(&ctx, 1, &random_scalar_with(&mut rng))
        );
        // A zero blinder exposes `v * G`
        assert_eq!(*commit(&ctx, 5, &Scalar::from(0u64)), ctx.encode_message(5));
        assert!(ctx.is_valid(&commit(&ctx, 1, &b)));
    }

    #[test]
    fn batch_and_aggregate() {
        let mut rng = StdRng::seed_from_u64(2u64);
        let ctx = GroupContext::new().unwrap();
        let votes = [1u64, 0, 0, 1, 1, 0, 1];
        let blinders = random_scalars(&mut rng, votes.len());
        let batch = commit_to_a_batch(&ctx, &votes, &blinders).unwrap();
        for i in 0..votes.len() {
            assert_eq!(batch[i], commit(&ctx, votes[i], &blinders[i]));
        }
        let agg = aggregate_commitments(&batch).unwrap();
        assert!(verify_tally(&ctx, &agg, 4, &sum_scalars(&blinders)));

        assert_eq!(aggregate_commitments(&[]), Err(Error::EmptyInput));
        assert_eq!(aggregate_commitments(&batch[..1]).unwrap(), batch[0]);
        assert_eq!(
            commit_to_a_batch(&ctx, &votes, &blinders[1..]),
            Err(Error::VectorLengthMismatch(7, 6))
        );
    }
}
