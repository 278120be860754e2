use fastrand::Rng;

/// Drops the leading `skip` elements of the server sequence.
pub fn candidate_swaps(raw: &[i64], skip: usize) -> &[i64] {
    raw.get(skip..).unwrap_or(&[])
}

/// Consumes a flat sequence two at a time; a trailing odd element is ignored.
pub fn pairs(candidates: &[i64]) -> impl Iterator<Item = (i64, i64)> + '_ {
    candidates.chunks_exact(2).map(|p| (p[0], p[1]))
}

/// Random distinct-slot swaps over `cell_count` tiles.
pub fn random_swaps(rng: &mut Rng, cell_count: usize, count: usize) -> Vec<(usize, usize)> {
    if cell_count < 2 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let a = rng.usize(0..cell_count);
            let mut b = rng.usize(0..cell_count - 1);
            if b >= a {
                b += 1;
            }
            (a, b)
        })
        .collect()
}

/// Flat sequence that undoes `scramble` when replayed from the identity.
///
/// Replaying swaps t1..tk builds the composition t1∘…∘tk; its inverse is
/// the same swaps in reverse order.
pub fn undo_sequence(scramble: &[(usize, usize)]) -> Vec<i64> {
    scramble
        .iter()
        .rev()
        .flat_map(|&(a, b)| [a as i64, b as i64])
        .collect()
}
