//! Runtime support for compiled programs whose values are tagged 32-bit
//! words.
//!
//! Generated code builds integers, booleans and tuples in a flat arena and
//! calls back into this crate for the operations it cannot inline:
//! structural equality, printing, and fatal fault reporting. The host side
//! allocates the arena, runs the entry point and prints its result.

pub mod abi;
pub mod config;
pub mod equality;
pub mod error;
pub mod fault;
pub mod heap;
pub mod host;
pub mod logging;
pub mod printer;
pub mod value;

pub use error::RuntimeError;
pub use fault::Fault;
pub use heap::{Heap, HeapView};
pub use value::{Value, Word, FALSE, TRUE};
