pub mod mutation;
pub mod runner;

pub use self::runner::{
    NoopObserver, SearchOptions, SearchOutcome, StepObserver, StepReport, StepSearch,
};

/// Destination-to-source tile mapping: `perm[d]` is the source tile shown in slot `d`.
///
/// Mutated in place as the swap sequence is replayed; stays a bijection over
/// `0..len` because the only mutation is a swap of two valid slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// Swaps two slots if both indices are in range. Returns whether anything
    /// was applied; out-of-range pairs leave the permutation untouched.
    pub fn try_swap(&mut self, a: i64, b: i64) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(a), Some(b)) => {
                self.0.swap(a, b);
                true
            }
            _ => false,
        }
    }

    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        for &v in &self.0 {
            if v >= seen.len() || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    fn index(&self, raw: i64) -> Option<usize> {
        usize::try_from(raw).ok().filter(|&i| i < self.0.len())
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}
