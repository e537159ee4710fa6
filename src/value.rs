//! Tagged value representation.
//!
//! Every value that crosses the runtime boundary is a single 32-bit word.
//! The low bits select the variant:
//!
//! ```text
//! 31                                                    3  2  1  0
//! +-----------------------------------------------------+--+--+--+
//! |                    Payload                          |  Tag   |
//! +-----------------------------------------------------+--+--+--+
//! ```
//!
//! - `xx0`: Integer, signed 31-bit value in bits 31..1
//! - `001`: Tuple reference, `word & !1` is the arena byte offset of the record
//! - `0xFFFF_FFFF`: true
//! - `0x7FFF_FFFF`: false
//! - anything else: unrecognized
//!
//! Both boolean sentinels end in `0b111`, so no integer or tuple encoding can
//! ever produce one of them.

use crate::fault::Fault;

/// A raw machine word as produced by generated code.
pub type Word = u32;

/// The true sentinel: every bit set.
pub const TRUE: Word = 0xFFFF_FFFF;

/// The false sentinel: every bit set except the sign bit.
pub const FALSE: Word = 0x7FFF_FFFF;

/// Mask to extract the tuple tag from a word.
pub const TAG_MASK: Word = 0b111;

/// Tag carried by tuple references.
pub const TAG_TUPLE: Word = 0b001;

/// Largest integer that fits in the 31-bit payload.
pub const INT_MAX: i64 = (1 << 30) - 1;

/// Smallest integer that fits in the 31-bit payload.
pub const INT_MIN: i64 = -(1 << 30);

/// Reference to a tuple record, stored as a byte offset into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TupleRef(u32);

impl TupleRef {
    /// Records start on 8-byte boundaries so the tag bits stay free.
    pub const ALIGN: u32 = 8;

    /// Build a reference from an arena byte offset. Returns `None` when the
    /// offset is not aligned.
    pub const fn from_offset(offset: u32) -> Option<Self> {
        if offset % Self::ALIGN == 0 {
            Some(TupleRef(offset))
        } else {
            None
        }
    }

    /// Byte offset of the record inside the arena.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }

    /// Index of the record's count word inside the arena.
    #[inline]
    pub const fn word_index(self) -> usize {
        (self.0 / 4) as usize
    }

    /// The tagged word pointing at this record.
    #[inline]
    pub const fn to_word(self) -> Word {
        self.0 | TAG_TUPLE
    }
}

/// A decoded tagged word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Tuple(TupleRef),
    /// A word matching no known tag. Kept for diagnostics.
    Unknown(Word),
}

impl Value {
    /// Classify a raw word. Total over every 32-bit pattern.
    ///
    /// The sentinels are matched before the general tag bits.
    pub const fn decode(word: Word) -> Self {
        match word {
            TRUE => Value::Bool(true),
            FALSE => Value::Bool(false),
            w if w & 1 == 0 => Value::Int((w as i32) >> 1),
            w if w & TAG_MASK == TAG_TUPLE => Value::Tuple(TupleRef(w & !1)),
            w => Value::Unknown(w),
        }
    }

    /// Re-encode a decoded value. `decode(v.encode()) == v` for every value
    /// obtained from `decode`.
    pub const fn encode(self) -> Word {
        match self {
            Value::Int(n) => (n as u32) << 1,
            Value::Bool(b) => encode_bool(b),
            Value::Tuple(r) => r.to_word(),
            Value::Unknown(w) => w,
        }
    }
}

/// Encode an integer, failing with the overflow fault when it does not fit in
/// 31 bits.
pub fn encode_int(n: i64) -> Result<Word, Fault> {
    if !(INT_MIN..=INT_MAX).contains(&n) {
        return Err(Fault::Overflow);
    }
    Ok((n as i32 as u32) << 1)
}

#[inline]
pub const fn encode_bool(b: bool) -> Word {
    if b { TRUE } else { FALSE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_roundtrip() {
        for n in [INT_MIN, -1_000_000, -42, -1, 0, 1, 5, 42, 1_000_000, INT_MAX] {
            let word = encode_int(n).unwrap();
            assert_eq!(Value::decode(word), Value::Int(n as i32));
        }
    }

    #[test]
    fn test_int_overflow() {
        assert_eq!(encode_int(INT_MAX + 1), Err(Fault::Overflow));
        assert_eq!(encode_int(INT_MIN - 1), Err(Fault::Overflow));
        assert_eq!(encode_int(i64::MAX), Err(Fault::Overflow));
    }

    #[test]
    fn test_sentinels_decode_as_bool_only() {
        assert_eq!(Value::decode(TRUE), Value::Bool(true));
        assert_eq!(Value::decode(FALSE), Value::Bool(false));
        assert_eq!(TRUE & TAG_MASK, 0b111);
        assert_eq!(FALSE & TAG_MASK, 0b111);
        assert!(!matches!(Value::decode(TRUE), Value::Tuple(_)));
        assert!(!matches!(Value::decode(FALSE), Value::Tuple(_)));
    }

    #[test]
    fn test_tuple_words() {
        let r = TupleRef::from_offset(16).unwrap();
        assert_eq!(r.to_word(), 17);
        assert_eq!(r.word_index(), 4);
        assert_eq!(Value::decode(17), Value::Tuple(r));
        assert_eq!(Value::decode(1), Value::Tuple(TupleRef::from_offset(0).unwrap()));
        assert!(TupleRef::from_offset(12).is_none());
    }

    #[test]
    fn test_unknown_words() {
        for w in [0b011, 0b101, 0b111, 0xFFFF_FFFD, 0x8000_0007] {
            assert_eq!(Value::decode(w), Value::Unknown(w));
        }
    }

    #[test]
    fn test_encode_inverts_decode() {
        for w in [0, 2, 0xFFFF_FFFE, 1, 9, TRUE, FALSE, 3, 0x1234_5677] {
            assert_eq!(Value::decode(w).encode(), w);
        }
    }
}
