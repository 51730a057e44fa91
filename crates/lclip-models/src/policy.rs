//! Take filtering policy.
//!
//! Which segmented takes survive is decided by filename position, not by
//! audio content. Two rules apply, in order:
//!
//! 1. A fixed set of leading indices holds the recording-session prompt
//!    tones and is always discarded.
//! 2. Takes are assumed to alternate between a good recording and a
//!    discardable alternate, so within each prefix group the sorted
//!    remainder is kept at even 0-based ranks and discarded at odd ranks.
//!
//! Both rules live here as a named policy value so the scan/sort logic in
//! the filter stage stays untouched if the studio workflow changes.

use serde::{Deserialize, Serialize};

/// Positional keep/discard rules applied to segmented takes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeFilterPolicy {
    /// Segment indices reserved for prompt tones, deleted for every prefix.
    pub prompt_tone_indices: Vec<u32>,
}

impl Default for TakeFilterPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl TakeFilterPolicy {
    /// The studio's standard session layout: indices 0, 1 and 2 are
    /// prompt-tone slots.
    pub fn standard() -> Self {
        Self {
            prompt_tone_indices: vec![0, 1, 2],
        }
    }

    /// Whether a take index is a prompt-tone slot.
    pub fn is_prompt_tone(&self, index: u32) -> bool {
        self.prompt_tone_indices.contains(&index)
    }

    /// Whether the take at `rank` (0-based position within the sorted
    /// remainder of a prefix group) is kept.
    ///
    /// Takes alternate good/alternate, so even ranks survive. An odd-sized
    /// group keeps one more take than it discards.
    pub fn keeps_rank(&self, rank: usize) -> bool {
        rank % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_prompt_tones() {
        let policy = TakeFilterPolicy::standard();
        assert!(policy.is_prompt_tone(0));
        assert!(policy.is_prompt_tone(1));
        assert!(policy.is_prompt_tone(2));
        assert!(!policy.is_prompt_tone(3));
    }

    #[test]
    fn even_ranks_survive() {
        let policy = TakeFilterPolicy::standard();
        let kept: Vec<usize> = (0..5).filter(|&r| policy.keeps_rank(r)).collect();
        assert_eq!(kept, vec![0, 2, 4]);
    }

    #[test]
    fn odd_sized_group_keeps_one_extra() {
        let policy = TakeFilterPolicy::standard();
        for len in [1usize, 3, 5, 7] {
            let kept = (0..len).filter(|&r| policy.keeps_rank(r)).count();
            assert_eq!(kept, len / 2 + 1);
            assert_eq!(len - kept, len / 2);
        }
    }
}
