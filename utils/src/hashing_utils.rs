use ark_ec::{
    twisted_edwards::{Affine, TECurveConfig},
    AffineRepr, CurveConfig, CurveGroup,
};
use ark_ff::{Field, PrimeField};
use digest::Digest;

/// Hash a label to a point in the prime order subgroup of a twisted Edwards curve. For
/// `ctr = 0, 1, ..`, `y` is `D(label || ctr)` (`ctr` as 8 little-endian bytes) reduced modulo the
/// base field, `x` is the smaller of the two square roots of `(1 - y^2) / (a - d*y^2)` and the
/// result is the cofactor multiple of `(x, y)`. The first `ctr` giving a non-identity point wins.
///
/// The discrete log of the output relative to any other generator is unknown, which makes it
/// suitable as the second Pedersen generator. This is variable time and is only meant for public
/// inputs like protocol labels.
pub fn te_affine_from_try_and_incr<P, D>(label: &[u8]) -> Affine<P>
where
    P: TECurveConfig,
    P::BaseField: PrimeField,
    D: Digest,
{
    let one = P::BaseField::ONE;
    let mut ctr = 0u64;
    loop {
        let hash = D::new()
            .chain_update(label)
            .chain_update(ctr.to_le_bytes())
            .finalize();
        ctr += 1;

        let y = P::BaseField::from_le_bytes_mod_order(&hash);
        let y2 = y.square();
        let den = match (P::COEFF_A - P::COEFF_D * y2).inverse() {
            Some(d) => d,
            None => continue,
        };
        let x = match ((one - y2) * den).sqrt() {
            Some(x) => x,
            None => continue,
        };
        let neg_x = -x;
        let x = if x.into_bigint() <= neg_x.into_bigint() {
            x
        } else {
            neg_x
        };

        let p = Affine::<P>::new_unchecked(x, y);
        debug_assert!(p.is_on_curve());
        let p = p.mul_bigint(<P as CurveConfig>::COFACTOR).into_affine();
        if !p.is_zero() {
            log::debug!("Derived point from label after {} attempts", ctr);
            return p;
        }
    }
}
