//! Word-level bit plumbing shared by the set and the builder.

/// Width of one storage word, and therefore the inline capacity in bits.
pub(crate) const WORD_BITS: u32 = u64::BITS;

pub(crate) fn word_and_offset(bit: u32) -> (usize, u32) {
    ((bit / WORD_BITS) as usize, bit % WORD_BITS)
}

/// Copies `words` into a sequence long enough to hold `bit` and sets it.
///
/// This is the single growth path: promoting an inline word (pass it as a
/// one-element slice), inserting into a heap sequence, and growing a heap
/// builder all go through here. The result never shrinks below `words.len()`.
pub(crate) fn grow_and_set(words: &[u64], bit: u32) -> Vec<u64> {
    let (word, offset) = word_and_offset(bit);

    let mut grown = vec![0u64; words.len().max(word + 1)];
    grown[..words.len()].copy_from_slice(words);
    grown[word] |= 1 << offset;
    grown
}

/// Length of `words` once trailing words that would be zero after clearing
/// `mask` in `words[word]` are dropped.
///
/// Runs the scan before anything is cleared: a trailing word counts as gone
/// if it is already zero, or if it is the target word and `mask` is its sole
/// set bit. Clearing first would lose the second case.
pub(crate) fn trimmed_len(words: &[u64], word: usize, mask: u64) -> usize {
    let mut len = words.len();
    while len > 0 {
        let last = words[len - 1];
        if last != 0 && !(len - 1 == word && last == mask) {
            break;
        }
        len -= 1;
    }
    len
}
