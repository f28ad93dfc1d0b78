//! Binomial counting and lexicographic combination unranking.

use smallvec::SmallVec;

/// `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    result as u64
}

/// Writes the `rank`-th `k`-subset of `0..n`, in lexicographic order, into `out`.
///
/// `rank` must be below `binomial(n, k)`.
pub fn unrank_combination(n: usize, k: usize, mut rank: u64, out: &mut SmallVec<[usize; 16]>) {
    out.clear();
    let mut next = 0;
    for remaining in (1..=k).rev() {
        loop {
            let with_next = binomial(n - next - 1, remaining - 1);
            if rank < with_next {
                out.push(next);
                next += 1;
                break;
            }
            rank -= with_next;
            next += 1;
        }
    }
}
