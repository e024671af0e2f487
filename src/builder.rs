use crate::BitSet;
use crate::word::{WORD_BITS, grow_and_set, word_and_offset};

/// ## Mutable staging buffer for bulk [`BitSet`] construction.
///
/// Building a large set by chained [`BitSet::insert`] calls copies the word
/// sequence once per insertion. The builder instead sets bits in place on a
/// single privately owned buffer and freezes it into an immutable set with
/// [`build`](BitSetBuilder::build), which hands the buffer over without a
/// copy. `build` consumes the builder, so a frozen buffer can never be
/// touched again.
///
/// Like the set itself, the builder starts inline for capacities up to 64
/// bits and switches to a heap buffer beyond that. Setting a bit past the
/// current capacity grows the buffer; previously set bits are kept.
///
/// A builder is exclusively owned and mutates in place; it is not meant to
/// be shared. There is no removal operation, construction is additive only.
///
/// ```
/// use ibitset::BitSetBuilder;
///
/// let bs = BitSetBuilder::with_capacity(128)
///     .with(3)
///     .with_many([70, 100])
///     .build();
///
/// assert!(bs.contains(3) && bs.contains(70) && bs.contains(100));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BitSetBuilder(BuilderRepr);

#[derive(Clone, Debug)]
enum BuilderRepr {
    Inline(u64),
    Heap(Vec<u64>),
}

impl Default for BuilderRepr {
    fn default() -> Self {
        BuilderRepr::Inline(0)
    }
}

impl BitSetBuilder {
    /// Creates an empty builder with no particular capacity.
    pub const fn new() -> Self {
        BitSetBuilder(BuilderRepr::Inline(0))
    }

    /// Creates an empty builder that can hold bit indices below `min_bits`
    /// without growing.
    ///
    /// Hints of 64 bits or less start the builder inline; anything larger
    /// preallocates a zeroed heap buffer of `⌈min_bits / 64⌉` words. Bits
    /// beyond the hint can still be set, the buffer grows on demand.
    pub fn with_capacity(min_bits: u32) -> Self {
        if min_bits <= WORD_BITS {
            return BitSetBuilder::new();
        }

        let words = min_bits.div_ceil(WORD_BITS) as usize;
        BitSetBuilder(BuilderRepr::Heap(vec![0; words]))
    }

    /// Sets `bit` and returns the builder for chaining.
    pub fn with(self, bit: u32) -> Self {
        match self.0 {
            BuilderRepr::Inline(bits) => {
                if bit < WORD_BITS {
                    BitSetBuilder(BuilderRepr::Inline(bits | (1 << bit)))
                } else {
                    BitSetBuilder(BuilderRepr::Heap(grow_and_set(&[bits], bit)))
                }
            }
            BuilderRepr::Heap(mut words) => {
                let (word, offset) = word_and_offset(bit);
                if word < words.len() {
                    words[word] |= 1 << offset;
                } else {
                    words = grow_and_set(&words, bit);
                }
                BitSetBuilder(BuilderRepr::Heap(words))
            }
        }
    }

    /// Sets every bit in `bits`, in order. The order never matters for the
    /// result.
    pub fn with_many<I>(self, bits: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        bits.into_iter().fold(self, Self::with)
    }

    /// Freezes the builder into an immutable [`BitSet`].
    ///
    /// The backing buffer is handed over as-is: an inline builder becomes an
    /// inline set, a heap builder becomes a heap set without copying or
    /// trimming. Consuming `self` makes reuse after freezing impossible.
    pub fn build(self) -> BitSet {
        match self.0 {
            BuilderRepr::Inline(bits) => BitSet::from_inline(bits),
            BuilderRepr::Heap(words) => BitSet::from_words(words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_builder_stays_inline() {
        let bs = BitSetBuilder::with_capacity(10).with(5).with(10).build();

        assert!(bs.contains(5));
        assert!(bs.contains(10));
        assert!(!bs.contains(11));
    }

    #[test]
    fn test_inline_builder_promotes() {
        let bs = BitSetBuilder::new().with(10).with(100).build();

        assert!(bs.contains(10));
        assert!(bs.contains(100));
    }

    #[test]
    fn test_large_builder_from_start() {
        let bs = BitSetBuilder::with_capacity(2048)
            .with(2047)
            .with(0)
            .build();

        assert!(bs.contains(2047));
        assert!(bs.contains(0));
        assert!(!bs.contains(100));
    }

    #[test]
    fn test_heap_builder_grows_past_capacity() {
        let bs = BitSetBuilder::with_capacity(128).with(50).with(200).build();

        assert!(bs.contains(50));
        assert!(bs.contains(200));
    }

    #[test]
    fn test_with_many_matches_repeated_insert() {
        let bits = [3u32, 64, 3, 700, 0, 63, 128, 700];

        let built = BitSetBuilder::new().with_many(bits).build();
        let inserted = bits
            .iter()
            .fold(BitSet::new(), |bs, &bit| bs.insert(bit));

        for bit in 0..1024 {
            assert_eq!(built.contains(bit), inserted.contains(bit), "bit {bit}");
        }
    }

    #[test]
    fn test_built_set_is_detached_from_later_inserts() {
        let bs = BitSetBuilder::new().with_many([1, 70]).build();
        let bs2 = bs.insert(5);

        assert!(!bs.contains(5));
        assert!(bs2.contains(1) && bs2.contains(70) && bs2.contains(5));
    }

    #[test]
    fn test_builder_matches_hash_set_model() {
        use rand::prelude::*;
        use std::collections::HashSet;

        let mut rng = rand::rng();
        let bits: Vec<u32> = (0..1_000).map(|_| rng.random_range(0..4096)).collect();

        let bs = BitSetBuilder::with_capacity(rng.random_range(0..256))
            .with_many(bits.iter().copied())
            .build();
        let model: HashSet<u32> = bits.into_iter().collect();

        for bit in 0..4096 {
            assert_eq!(bs.contains(bit), model.contains(&bit), "bit {bit}");
        }
    }
}
