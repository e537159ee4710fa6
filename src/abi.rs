//! C-compatible entry points called by generated code.
//!
//! Generated code links against three symbols: `equal`, `print` and
//! `error`. The first two read the arena installed by the host; `error`
//! never returns.
//!
//! An arena is installed per thread for as long as its [`InstalledArena`]
//! guard lives. Generated code is suspended inside these calls, so nothing
//! writes the arena while the runtime reads it.

use std::cell::Cell;
use std::io;
use std::marker::PhantomData;

use crate::equality;
use crate::error::RuntimeError;
use crate::fault::{self, Fault};
use crate::heap::{Heap, HeapView};
use crate::printer;
use crate::value::Word;

#[derive(Clone, Copy)]
struct ArenaSlot {
    base: *const Word,
    len: usize,
}

thread_local! {
    static ARENA: Cell<Option<ArenaSlot>> = const { Cell::new(None) };
}

/// Keeps an arena registered for the ABI surface. Dropping it uninstalls
/// the arena.
pub struct InstalledArena<'a> {
    _heap: PhantomData<&'a Heap>,
}

impl Drop for InstalledArena<'_> {
    fn drop(&mut self) {
        ARENA.with(|slot| slot.set(None));
    }
}

/// Register `heap` as the arena read by `equal` and `print` on this thread.
pub fn install(heap: &Heap) -> Result<InstalledArena<'_>, RuntimeError> {
    ARENA.with(|slot| {
        if slot.get().is_some() {
            return Err(RuntimeError::ArenaAlreadyInstalled);
        }
        slot.set(Some(ArenaSlot { base: heap.as_mut_ptr(), len: heap.len() }));
        Ok(InstalledArena { _heap: PhantomData })
    })
}

/// Whether an arena is installed on this thread.
pub fn is_installed() -> bool {
    ARENA.with(|slot| slot.get().is_some())
}

fn with_arena<T>(f: impl FnOnce(&HeapView<'_>) -> Result<T, RuntimeError>) -> Result<T, RuntimeError> {
    let slot = ARENA.with(Cell::get).ok_or(RuntimeError::ArenaNotInstalled)?;
    // The guard keeps the heap alive while the slot is set.
    let view = unsafe { HeapView::from_raw_parts(slot.base, slot.len) };
    f(&view)
}

#[unsafe(no_mangle)]
pub extern "C" fn equal(a: Word, b: Word) -> Word {
    match with_arena(|heap| equality::equal(heap, a, b)) {
        Ok(result) => result,
        Err(e) => fault::terminate(&e),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn print(value: Word) -> Word {
    match with_arena(|heap| printer::print(heap, &mut io::stdout().lock(), value)) {
        Ok(value) => value,
        Err(e) => fault::terminate(&e),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn error(code: i32) -> ! {
    fault::terminate(&RuntimeError::Fault(Fault::from_code(code)))
}
