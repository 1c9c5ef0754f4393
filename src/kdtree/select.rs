//! Partial selection of the k nearest candidates.

use std::cmp::Ordering;

/// A dataset position together with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) id: usize,
    pub(crate) dist: f64,
}

impl Candidate {
    /// Nearer first; equal distances by ascending dataset position.
    #[inline]
    fn cmp_nearest(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then(self.id.cmp(&other.id))
    }
}

/// Move the `k` nearest candidates to the front of the slice, in ascending order.
///
/// Each of the `k` rounds extracts the minimum of the not yet selected candidates, so the cost is
/// `O(k * m)` rather than a full sort of all `m` candidates. Returns the selected prefix, which is
/// shorter than `k` only when there are fewer than `k` candidates.
pub(crate) fn select_k_nearest(candidates: &mut [Candidate], k: usize) -> &[Candidate] {
    let k = k.min(candidates.len());
    for i in 0..k {
        let mut best = i;
        for j in i + 1..candidates.len() {
            if candidates[j].cmp_nearest(&candidates[best]) == Ordering::Less {
                best = j;
            }
        }
        candidates.swap(i, best);
    }
    &candidates[..k]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(dists: &[f64]) -> Vec<Candidate> {
        dists
            .iter()
            .enumerate()
            .map(|(id, &dist)| Candidate { id, dist })
            .collect()
    }

    fn ids(selected: &[Candidate]) -> Vec<usize> {
        selected.iter().map(|c| c.id).collect()
    }

    #[test]
    fn selects_smallest_in_order() {
        let mut cands = candidates(&[0.9, 0.1, 0.5, 0.3, 0.7]);
        assert_eq!(ids(select_k_nearest(&mut cands, 3)), vec![1, 3, 2]);
    }

    #[test]
    fn ties_resolve_by_position() {
        let mut cands = candidates(&[0.2, 0.0, 0.2, 0.0, 0.2]);
        // shuffle so that slice order differs from position order
        cands.reverse();
        assert_eq!(ids(select_k_nearest(&mut cands, 4)), vec![1, 3, 0, 2]);
    }

    #[test]
    fn k_larger_than_candidates_selects_all() {
        let mut cands = candidates(&[3.0, 1.0]);
        assert_eq!(ids(select_k_nearest(&mut cands, 5)), vec![1, 0]);
    }

    #[test]
    fn reselecting_after_extending_is_stable() {
        let mut cands = candidates(&[0.4, 0.8, 0.6]);
        select_k_nearest(&mut cands, 2);
        cands.push(Candidate { id: 3, dist: 0.5 });
        cands.push(Candidate { id: 4, dist: 0.1 });
        assert_eq!(ids(select_k_nearest(&mut cands, 2)), vec![4, 0]);
    }
}
