//! Rendering tagged words as text.
//!
//! Integers print in signed decimal, booleans as `true`/`false`, tuples as
//! `(a,b,c)` with no spaces, and unrecognized words as a hex diagnostic.
//! Rendering never fails on a bad tag; the only errors are dangling tuple
//! references and failed writes.

use std::io::Write;

use tracing::trace;

use crate::error::RuntimeError;
use crate::heap::HeapView;
use crate::value::{Value, Word};

/// Render `word` to a string.
///
/// Recurses once per level of tuple nesting; see [`render_iterative`] for
/// untrusted depths.
pub fn render(heap: &HeapView<'_>, word: Word) -> Result<String, RuntimeError> {
    let mut out = String::new();
    render_into(heap, word, &mut out)?;
    Ok(out)
}

fn render_into(heap: &HeapView<'_>, word: Word, out: &mut String) -> Result<(), RuntimeError> {
    match Value::decode(word) {
        Value::Tuple(reference) => {
            let tuple = heap.tuple(reference)?;
            out.push('(');
            for (i, element) in tuple.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render_into(heap, element, out)?;
            }
            out.push(')');
        }
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(bool_text(b)),
        Value::Unknown(word) => out.push_str(&unknown_text(word)),
    }
    Ok(())
}

enum Step {
    Word(Word),
    Text(&'static str),
}

/// Same output as [`render`], driven by an explicit work stack.
pub fn render_iterative(heap: &HeapView<'_>, word: Word) -> Result<String, RuntimeError> {
    let mut out = String::new();
    let mut pending = vec![Step::Word(word)];

    while let Some(step) = pending.pop() {
        let word = match step {
            Step::Text(text) => {
                out.push_str(text);
                continue;
            }
            Step::Word(word) => word,
        };

        let reference = match Value::decode(word) {
            Value::Tuple(reference) => reference,
            Value::Int(n) => {
                out.push_str(&n.to_string());
                continue;
            }
            Value::Bool(b) => {
                out.push_str(bool_text(b));
                continue;
            }
            Value::Unknown(word) => {
                out.push_str(&unknown_text(word));
                continue;
            }
        };

        let tuple = heap.tuple(reference)?;
        trace!(len = tuple.len(), depth = pending.len(), "rendering tuple");
        out.push('(');
        pending.push(Step::Text(")"));
        for (i, element) in tuple.iter().enumerate().rev() {
            pending.push(Step::Word(element));
            if i > 0 {
                pending.push(Step::Text(","));
            }
        }
    }

    Ok(out)
}

fn bool_text(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

fn unknown_text(word: Word) -> String {
    format!("Unknown value: {:#010x}", word)
}

/// Print `word` followed by a newline and hand it back unchanged.
pub fn print<W: Write>(heap: &HeapView<'_>, out: &mut W, word: Word) -> Result<Word, RuntimeError> {
    let text = render(heap, word)?;
    writeln!(out, "{}", text)?;
    Ok(word)
}
