use crate::word::{WORD_BITS, grow_and_set, trimmed_len, word_and_offset};

pub use builder::BitSetBuilder;

mod builder;
mod word;

/// ## An immutable set of small integers.
///
/// Membership is keyed by bit index (`u32`). Every operation that would
/// change membership returns a brand-new value and leaves the original
/// untouched, so `BitSet` behaves like a plain value: it can be stored,
/// cloned, compared, and shared across threads without synchronization.
///
/// ### Representation
/// Sets whose highest member is below 64 live in a single inline `u64`;
/// larger sets spill into a heap-allocated word sequence. The transition is
/// automatic in both directions: inserting an index ≥ 64 promotes to the
/// heap form, and a removal whose surviving content fits one word demotes
/// back to the inline form. On heap removals the word sequence is also
/// trimmed so it never ends in an all-zero word, which keeps values produced
/// by set operations canonical — equal membership means equal representation,
/// and the derived `PartialEq`/`Hash` are membership equality.
///
/// ### Cost model
/// `contains` is O(1) in both forms. Inline `insert`/`remove` are O(1);
/// heap `insert`/`remove` copy the word sequence, O(words). For building a
/// set out of many insertions use [`BitSetBuilder`], which mutates one
/// private buffer in place and freezes it at the end instead of copying per
/// bit.
///
/// ```
/// use ibitset::BitSet;
///
/// let a = BitSet::new().insert(3).insert(100);
/// let b = a.remove(100);
///
/// assert!(a.contains(100)); // `a` is unaffected by the removal
/// assert!(b.contains(3) && !b.contains(100));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSet(Repr);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Inline(u64),
    Heap(Box<[u64]>),
}

impl Default for Repr {
    fn default() -> Self {
        Repr::Inline(0)
    }
}

impl BitSet {
    /// Creates an empty set in the inline representation.
    pub const fn new() -> Self {
        BitSet(Repr::Inline(0))
    }

    pub(crate) const fn from_inline(bits: u64) -> Self {
        BitSet(Repr::Inline(bits))
    }

    pub(crate) fn from_words(words: Vec<u64>) -> Self {
        BitSet(Repr::Heap(words.into_boxed_slice()))
    }

    /// Reports whether `bit` is a member of the set.
    ///
    /// Any index is a valid argument; indices beyond the current
    /// representation are simply absent.
    pub fn contains(&self, bit: u32) -> bool {
        match &self.0 {
            Repr::Inline(bits) => bit < WORD_BITS && bits & (1 << bit) != 0,
            Repr::Heap(words) => {
                let (word, offset) = word_and_offset(bit);
                word < words.len() && words[word] & (1 << offset) != 0
            }
        }
    }

    /// Returns a new set that additionally contains `bit`.
    ///
    /// Inserting an index ≥ 64 into an inline set promotes the result to the
    /// heap representation, sized to reach the new bit's word. Inserting into
    /// a heap set always yields a heap set.
    pub fn insert(&self, bit: u32) -> BitSet {
        match &self.0 {
            Repr::Inline(bits) => {
                if bit < WORD_BITS {
                    BitSet(Repr::Inline(bits | (1 << bit)))
                } else {
                    BitSet::from_words(grow_and_set(&[*bits], bit))
                }
            }
            Repr::Heap(words) => BitSet::from_words(grow_and_set(words, bit)),
        }
    }

    /// Returns a new set with `bit` absent.
    ///
    /// Removing an index the representation cannot hold is a no-op. Removing
    /// from a heap set trims trailing words that end up all-zero, and demotes
    /// to the inline representation when the surviving content fits one word.
    pub fn remove(&self, bit: u32) -> BitSet {
        match &self.0 {
            Repr::Inline(bits) => {
                if bit >= WORD_BITS {
                    self.clone()
                } else {
                    BitSet(Repr::Inline(bits & !(1 << bit)))
                }
            }
            Repr::Heap(words) => {
                let (word, offset) = word_and_offset(bit);
                if word >= words.len() {
                    return self.clone();
                }
                let mask = 1 << offset;

                // Find the surviving length with the target bit treated as
                // already cleared, then materialize the trimmed copy.
                let len = trimmed_len(words, word, mask);
                if len <= 1 {
                    let mut bits = words[0];
                    if word == 0 {
                        bits &= !mask;
                    }
                    return BitSet(Repr::Inline(bits));
                }

                let mut kept = words[..len].to_vec();
                if word < kept.len() {
                    kept[word] &= !mask;
                }
                BitSet::from_words(kept)
            }
        }
    }

    #[cfg(test)]
    fn is_inline(&self) -> bool {
        matches!(self.0, Repr::Inline(_))
    }

    #[cfg(test)]
    fn heap_len(&self) -> Option<usize> {
        match &self.0 {
            Repr::Inline(_) => None,
            Repr::Heap(words) => Some(words.len()),
        }
    }
}
