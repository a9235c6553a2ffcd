use ark_ec::CurveGroup;
use ark_std::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

/// Smallest `s` such that `s * s >= n`
pub fn ceil_sqrt(n: u64) -> u64 {
    // Float estimate corrected in both directions as `f64` loses precision above 2^52
    let mut s = (n as f64).sqrt() as u64;
    while (s as u128) * (s as u128) < n as u128 {
        s += 1;
    }
    while s > 0 && ((s - 1) as u128) * ((s - 1) as u128) >= n as u128 {
        s -= 1;
    }
    s
}

/// Solve discrete log using brute force.
/// `max` is the maximum value of the discrete log and this returns `x` such that `0 <= x <= max` and `base * x = target`
/// if such `x` exists, else return None.
pub fn solve_discrete_log_brute_force<G: CurveGroup>(max: u64, base: G, target: G) -> Option<u64> {
    let mut cur = G::zero();
    for j in 0..=max {
        if cur == target {
            return Some(j);
        }
        cur += base;
    }
    None
}

/// Solve discrete log using Baby Step Giant Step as described in section 2 of <https://eprint.iacr.org/2015/605>
/// `max` is the maximum value of the discrete log and this returns `x` such that `0 <= x <= max` and `base * x = target`
/// if such `x` exists, else return None. Values of `x` larger than `max` are not searched for.
///
/// Time and memory are both `O(sqrt(max))`.
pub fn solve_discrete_log_bsgs<G: CurveGroup>(max: u64, base: G, target: G) -> Option<u64> {
    if max == 0 {
        return target.is_zero().then_some(0);
    }
    let step = ceil_sqrt(max.saturating_add(1));
    let table = BabyStepTable::new(step, base);
    table.search(max, target)
}

/// The `base * j -> j` map for `j` in `[0, step)` along with the giant stride `-step * base`.
/// Can be reused to solve several discrete logs under the same bound, like one per option of a
/// tally. Points are keyed by the string form of their affine coordinates.
pub struct BabyStepTable<G: CurveGroup> {
    step: u64,
    table: BTreeMap<String, u64>,
    neg_stride: G,
}

impl<G: CurveGroup> BabyStepTable<G> {
    pub fn new(step: u64, base: G) -> Self {
        let mut baby_steps = Vec::with_capacity(step as usize);
        let mut cur = G::zero();
        for _ in 0..step {
            baby_steps.push(cur);
            cur += base;
        }
        // `cur` is now `base * step`
        let table = G::normalize_batch(&baby_steps)
            .into_iter()
            .map(|p| p.to_string())
            .zip(0..step)
            .collect::<BTreeMap<_, _>>();
        log::debug!("Created baby step table with {} entries", table.len());
        Self {
            step,
            table,
            neg_stride: -cur,
        }
    }

    /// Create a table sized for solving discrete logs in `[0, max]`
    pub fn for_max(max: u64, base: G) -> Self {
        Self::new(ceil_sqrt(max.saturating_add(1)), base)
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Find `x` in `[0, max]` with `base * x = target`. `max` may exceed the bound the table was
    /// sized for, at the cost of more giant steps.
    pub fn search(&self, max: u64, target: G) -> Option<u64> {
        if max == 0 || self.step == 0 {
            return target.is_zero().then_some(0);
        }
        let mut cur = target;
        for i in 0..=max / self.step {
            if let Some(j) = self.table.get(&cur.into_affine().to_string()) {
                let candidate = (i * self.step).saturating_add(*j);
                return (candidate <= max).then_some(candidate);
            }
            cur += self.neg_stride;
        }
        None
    }
}
