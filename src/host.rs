//! Process setup around the generated entry point.

use std::io::Write;

use tracing::debug;

use crate::abi;
use crate::config::Config;
use crate::error::RuntimeError;
use crate::heap::Heap;
use crate::printer;
use crate::value::Word;

/// Signature of the generated entry point: takes the arena base, returns the
/// program's result.
pub type EntryFn = unsafe extern "C" fn(*mut Word) -> Word;

/// Allocate the arena, run `entry` with it, and print the result to `out`.
///
/// Returns the result word. Any error is fatal and meant for
/// [`crate::fault::terminate`].
pub fn run<W: Write>(entry: EntryFn, config: &Config, out: &mut W) -> Result<Word, RuntimeError> {
    let heap = Heap::new(config.heap_words)?;
    debug!(words = heap.len(), "allocated arena");

    let _installed = abi::install(&heap)?;
    let result = unsafe { entry(heap.as_mut_ptr()) };
    debug!("entry point returned {:#010x}", result);

    printer::print(&heap.view(), out, result)?;
    out.flush()?;
    Ok(result)
}
