//! The arena and the layout of tuple records inside it.
//!
//! Layout of a tuple record starting at word index `i`:
//! ```text
//! +---------+----------+----------+-----+----------+
//! | count n | elem 0   | elem 1   | ... | elem n-1 |
//! | (raw)   | (tagged) | (tagged) |     | (tagged) |
//! +---------+----------+----------+-----+----------+
//! ```
//!
//! The arena is allocated once, zeroed, and never resized or compacted.
//! Records are written by the producer and are never freed or moved.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

use thiserror::Error;

use crate::value::{TupleRef, Word};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("arena of {words} words is too small")]
    TooSmall { words: usize },

    #[error("arena of {words} words exceeds the limit of {max} words")]
    TooLarge { words: usize, max: usize },

    #[error("allocation of an arena of {words} words failed")]
    AllocationFailed { words: usize },

    #[error("tuple at offset {offset:#x} lies outside the arena ({arena_words} words)")]
    OutOfBounds { offset: u32, arena_words: usize },

    #[error("arena exhausted: record needs {requested} words, {available} left")]
    Exhausted { requested: usize, available: usize },
}

/// The flat, zero-initialized block of words handed to generated code.
///
/// Storage is held through a raw pointer because generated code writes into
/// it directly while the runtime only ever reads.
pub struct Heap {
    base: NonNull<Word>,
    len: usize,
    next: usize,
}

impl Heap {
    pub const DEFAULT_WORDS: usize = 100_000;

    /// Largest arena whose byte offsets still fit in a tuple reference.
    pub const MAX_WORDS: usize = 1 << 30;

    /// Allocate a zeroed arena of `words` words.
    pub fn new(words: usize) -> Result<Self, HeapError> {
        if words < 2 {
            return Err(HeapError::TooSmall { words });
        }
        if words > Self::MAX_WORDS {
            return Err(HeapError::TooLarge { words, max: Self::MAX_WORDS });
        }
        let layout = Self::layout(words)?;
        let ptr = unsafe { alloc_zeroed(layout) } as *mut Word;
        let base = NonNull::new(ptr).ok_or(HeapError::AllocationFailed { words })?;
        Ok(Heap { base, len: words, next: 0 })
    }

    fn layout(words: usize) -> Result<Layout, HeapError> {
        Layout::array::<Word>(words)
            .and_then(|layout| layout.align_to(TupleRef::ALIGN as usize))
            .map_err(|_| HeapError::AllocationFailed { words })
    }

    /// Number of words in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Base address passed to the generated entry point.
    pub fn as_mut_ptr(&self) -> *mut Word {
        self.base.as_ptr()
    }

    /// Read-only view used by equality and printing.
    pub fn view(&self) -> HeapView<'_> {
        unsafe { HeapView::from_raw_parts(self.base.as_ptr(), self.len) }
    }

    /// Bump-allocate a tuple record holding `elements` and return its tagged
    /// reference.
    ///
    /// This serves producers written in Rust. Generated code manages its own
    /// allocation pointer and never calls this.
    pub fn alloc_tuple(&mut self, elements: &[Word]) -> Result<Word, HeapError> {
        let start = self.next.next_multiple_of(2);
        let requested = elements.len() + 1;
        let available = self.len.saturating_sub(start);
        if requested > available {
            return Err(HeapError::Exhausted { requested, available });
        }

        let words = unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr(), self.len) };
        words[start] = elements.len() as Word;
        words[start + 1..start + requested].copy_from_slice(elements);
        self.next = start + requested;

        // start < MAX_WORDS, so the byte offset fits in 32 bits.
        let offset = (start * 4) as u32;
        let reference = TupleRef::from_offset(offset)
            .ok_or(HeapError::OutOfBounds { offset, arena_words: self.len })?;
        Ok(reference.to_word())
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.len) {
            unsafe { dealloc(self.base.as_ptr() as *mut u8, layout) };
        }
    }
}

/// Borrowed, bounds-checked window over arena words.
#[derive(Debug, Clone, Copy)]
pub struct HeapView<'a> {
    words: &'a [Word],
}

impl<'a> HeapView<'a> {
    /// View over words owned elsewhere, such as a copy of an arena taken
    /// after the producer returned.
    pub fn new(words: &'a [Word]) -> Self {
        HeapView { words }
    }

    /// Build a view over raw arena storage.
    ///
    /// # Safety
    /// `base` must point to `len` initialized words that stay valid, and are
    /// not written, for the lifetime `'a`.
    pub unsafe fn from_raw_parts(base: *const Word, len: usize) -> Self {
        HeapView { words: unsafe { std::slice::from_raw_parts(base, len) } }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Resolve a tuple reference into its record.
    ///
    /// The caller has already checked the tag. A record whose count or
    /// elements fall outside the arena is reported, never read.
    pub fn tuple(&self, reference: TupleRef) -> Result<Tuple<'a>, HeapError> {
        let out_of_bounds = || HeapError::OutOfBounds {
            offset: reference.offset(),
            arena_words: self.words.len(),
        };

        let start = reference.word_index();
        let count = *self.words.get(start).ok_or_else(out_of_bounds)? as usize;
        let end = start
            .checked_add(1)
            .and_then(|first| first.checked_add(count))
            .ok_or_else(out_of_bounds)?;
        let elements = self.words.get(start + 1..end).ok_or_else(out_of_bounds)?;

        Ok(Tuple { elements })
    }
}

/// A tuple record resolved inside the arena.
#[derive(Debug, Clone, Copy)]
pub struct Tuple<'a> {
    elements: &'a [Word],
}

impl<'a> Tuple<'a> {

    /// Element count, as stored in the record's first word.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Word> {
        self.elements.get(index).copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Word> + ExactSizeIterator + 'a {
        self.elements.iter().copied()
    }
}
