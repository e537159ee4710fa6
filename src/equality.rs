//! Structural equality over tagged words.

use tracing::trace;

use crate::error::RuntimeError;
use crate::heap::HeapView;
use crate::value::{encode_bool, Value, Word, FALSE, TRUE};

/// Compare two tagged words, returning the `TRUE` or `FALSE` sentinel.
///
/// Bit-identical words are equal without touching the heap. Two tuple
/// references are equal when their counts match and every element pair is
/// equal, checked in index order and stopping at the first mismatch. Any
/// other combination is unequal, including unrecognized words.
///
/// Recurses once per level of tuple nesting, so deeply nested input can
/// exhaust the native stack; cyclic tuples never terminate. Use
/// [`equal_iterative`] when nesting depth is not trusted.
pub fn equal(heap: &HeapView<'_>, a: Word, b: Word) -> Result<Word, RuntimeError> {
    structurally_equal(heap, a, b).map(encode_bool)
}

/// [`equal`] as a plain `bool`, for callers that branch on the result
/// instead of handing a sentinel back to generated code.
pub fn structurally_equal(heap: &HeapView<'_>, a: Word, b: Word) -> Result<bool, RuntimeError> {
    if a == b {
        return Ok(true);
    }

    match (Value::decode(a), Value::decode(b)) {
        (Value::Tuple(left), Value::Tuple(right)) => {
            let left = heap.tuple(left)?;
            let right = heap.tuple(right)?;
            if left.len() != right.len() {
                return Ok(false);
            }
            for (x, y) in left.iter().zip(right.iter()) {
                if !structurally_equal(heap, x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Same result as [`equal`], driven by an explicit work stack instead of
/// native recursion.
///
/// Pairs are visited in the same order as the recursive version, so the two
/// agree on both the answer and on which dangling record, if any, is
/// reported.
pub fn equal_iterative(heap: &HeapView<'_>, a: Word, b: Word) -> Result<Word, RuntimeError> {
    let mut pending = vec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        if a == b {
            continue;
        }
        let (Value::Tuple(left), Value::Tuple(right)) = (Value::decode(a), Value::decode(b)) else {
            return Ok(FALSE);
        };

        let left = heap.tuple(left)?;
        let right = heap.tuple(right)?;
        if left.len() != right.len() {
            return Ok(FALSE);
        }
        trace!(len = left.len(), depth = pending.len(), "comparing tuples");
        pending.extend(left.iter().zip(right.iter()).rev());
    }

    Ok(TRUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Heap;
    use crate::value::encode_int;

    fn int(n: i64) -> Word {
        encode_int(n).unwrap()
    }

    fn both(heap: &Heap, a: Word, b: Word) -> Word {
        let view = heap.view();
        let recursive = equal(&view, a, b).unwrap();
        assert_eq!(recursive, equal_iterative(&view, a, b).unwrap());
        assert_eq!(recursive, equal(&view, b, a).unwrap(), "equality must be commutative");
        recursive
    }

    #[test]
    fn test_identical_words() {
        let heap = Heap::new(16).unwrap();
        for w in [int(0), int(-7), TRUE, FALSE, 0b011] {
            assert_eq!(both(&heap, w, w), TRUE);
        }
    }

    #[test]
    fn test_scalars_unequal() {
        let heap = Heap::new(16).unwrap();
        assert_eq!(both(&heap, int(1), int(2)), FALSE);
        assert_eq!(both(&heap, TRUE, FALSE), FALSE);
        assert_eq!(both(&heap, int(0), FALSE), FALSE);
        assert_eq!(both(&heap, 0b011, 0b101), FALSE);
    }

    #[test]
    fn test_tuple_reflexive_by_identity() {
        let mut heap = Heap::new(16).unwrap();
        let t = heap.alloc_tuple(&[int(1), TRUE]).unwrap();
        assert_eq!(both(&heap, t, t), TRUE);
    }

    #[test]
    fn test_distinct_tuples_compare_structurally() {
        let mut heap = Heap::new(64).unwrap();
        let a = heap.alloc_tuple(&[int(1), int(2), int(3)]).unwrap();
        let b = heap.alloc_tuple(&[int(1), int(2), int(3)]).unwrap();
        assert_ne!(a, b);
        assert_eq!(both(&heap, a, b), TRUE);

        let c = heap.alloc_tuple(&[int(1), int(2), int(4)]).unwrap();
        assert_eq!(both(&heap, a, c), FALSE);
    }

    #[test]
    fn test_length_mismatch() {
        let mut heap = Heap::new(64).unwrap();
        let short = heap.alloc_tuple(&[int(1), int(2)]).unwrap();
        let long = heap.alloc_tuple(&[int(1), int(2), int(3)]).unwrap();
        let empty = heap.alloc_tuple(&[]).unwrap();
        assert_eq!(both(&heap, short, long), FALSE);
        assert_eq!(both(&heap, empty, short), FALSE);
    }

    #[test]
    fn test_nested_tuples() {
        let mut heap = Heap::new(128).unwrap();
        let inner_a = heap.alloc_tuple(&[int(4), FALSE]).unwrap();
        let inner_b = heap.alloc_tuple(&[int(4), FALSE]).unwrap();
        let empty_a = heap.alloc_tuple(&[]).unwrap();
        let empty_b = heap.alloc_tuple(&[]).unwrap();
        let a = heap.alloc_tuple(&[inner_a, empty_a, int(9)]).unwrap();
        let b = heap.alloc_tuple(&[inner_b, empty_b, int(9)]).unwrap();
        assert_eq!(both(&heap, a, b), TRUE);

        let inner_c = heap.alloc_tuple(&[int(4), TRUE]).unwrap();
        let c = heap.alloc_tuple(&[inner_c, empty_a, int(9)]).unwrap();
        assert_eq!(both(&heap, a, c), FALSE);
    }

    #[test]
    fn test_structurally_equal_matches_sentinel_form() {
        let mut heap = Heap::new(64).unwrap();
        let a = heap.alloc_tuple(&[int(1), TRUE]).unwrap();
        let b = heap.alloc_tuple(&[int(1), TRUE]).unwrap();
        let c = heap.alloc_tuple(&[int(1), FALSE]).unwrap();
        let view = heap.view();
        assert!(structurally_equal(&view, a, b).unwrap());
        assert!(!structurally_equal(&view, a, c).unwrap());
        assert!(structurally_equal(&view, 0x0010_0001, 0x0010_0001).unwrap());
        assert!(matches!(structurally_equal(&view, a, 0x0010_0001), Err(RuntimeError::Heap(_))));
    }

    #[test]
    fn test_tuple_never_equals_scalar() {
        let mut heap = Heap::new(16).unwrap();
        let t = heap.alloc_tuple(&[]).unwrap();
        // The raw word of a tuple at offset 0 is 1; no scalar shares it.
        assert_eq!(both(&heap, t, int(0)), FALSE);
        assert_eq!(both(&heap, t, TRUE), FALSE);
    }

    #[test]
    fn test_short_circuit_before_dangling_element() {
        let mut heap = Heap::new(64).unwrap();
        let dangling = 0x0010_0001;
        let a = heap.alloc_tuple(&[int(1), dangling]).unwrap();
        let b = heap.alloc_tuple(&[int(2), 0x0020_0001]).unwrap();
        assert_eq!(both(&heap, a, b), FALSE);
    }

    #[test]
    fn test_dangling_reference_is_an_error() {
        let mut heap = Heap::new(16).unwrap();
        let t = heap.alloc_tuple(&[int(1)]).unwrap();
        let dangling = 0x0010_0001;
        let view = heap.view();
        assert!(matches!(equal(&view, t, dangling), Err(RuntimeError::Heap(_))));
        assert!(matches!(equal_iterative(&view, t, dangling), Err(RuntimeError::Heap(_))));
    }

    #[test]
    fn test_deep_nesting_iterative() {
        let mut heap = Heap::new(200_000).unwrap();
        let mut a = heap.alloc_tuple(&[]).unwrap();
        let mut b = heap.alloc_tuple(&[]).unwrap();
        for _ in 0..40_000 {
            a = heap.alloc_tuple(&[a]).unwrap();
            b = heap.alloc_tuple(&[b]).unwrap();
        }
        assert_eq!(equal_iterative(&heap.view(), a, b).unwrap(), TRUE);
    }
}
