//! Error kinds surfaced by the allocator's internal, fallible paths.
//!
//! The public entry points (`alloc`, `free`, `calloc`, `realloc`) never
//! propagate these directly: per the allocator's failure semantics, any
//! internal error collapses into a null return, exactly like the C standard's
//! `malloc` family. `ChallocError` exists for the layer that sits underneath
//! that boundary (the page source) and for diagnostics above it.

use std::fmt;

/// Something that stopped an internal operation from completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallocError {
  /// The OS refused to map more pages.
  OutOfMemory,
  /// `count * size` overflowed while sizing a `calloc` request.
  Overflow,
  /// The underlying `mmap`/`munmap` syscall failed.
  MapFailed,
}

impl fmt::Display for ChallocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChallocError::OutOfMemory => write!(f, "out of memory"),
      ChallocError::Overflow => write!(f, "size overflow"),
      ChallocError::MapFailed => write!(f, "mmap/munmap failed"),
    }
  }
}

impl std::error::Error for ChallocError {}
