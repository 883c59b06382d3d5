//! A three-tier dynamic memory allocator: a fixed-size slab for small
//! requests, a first-fit block allocator backed by `mmap` for everything
//! else, and a deferred-unmap cache that keeps recently freed regions
//! around for a little while before actually releasing them back to the
//! OS.
//!
//! Install it as the process-wide allocator with:
//!
//! ```no_run
//! use challoc::Challoc;
//!
//! #[global_allocator]
//! static GLOBAL: Challoc = Challoc::new();
//! ```
//!
//! or use it directly through [`Challoc::alloc`]/[`Challoc::free`] and
//! friends without taking over `#[global_allocator]` at all.

mod allocator;
mod block;
mod error;
#[cfg(feature = "leak-check")]
mod leak;
mod minislab;
mod page;

pub use allocator::Challoc;
pub use error::ChallocError;

#[cfg(feature = "interpose")]
mod interpose {
  //! C ABI entry points, exported under their libc names so this crate
  //! can be `LD_PRELOAD`ed ahead of the system allocator.

  use super::Challoc;

  static ALLOCATOR: Challoc = Challoc::new();

  /// # Safety
  /// Same contract as the C standard library's `malloc`.
  #[no_mangle]
  pub unsafe extern "C" fn malloc(size: usize) -> *mut core::ffi::c_void {
    ALLOCATOR.alloc(size) as *mut core::ffi::c_void
  }

  /// # Safety
  /// Same contract as the C standard library's `free`.
  #[no_mangle]
  pub unsafe extern "C" fn free(ptr: *mut core::ffi::c_void) {
    ALLOCATOR.free(ptr as *mut u8)
  }

  /// # Safety
  /// Same contract as the C standard library's `calloc`.
  #[no_mangle]
  pub unsafe extern "C" fn calloc(count: usize, size: usize) -> *mut core::ffi::c_void {
    ALLOCATOR.calloc(count, size) as *mut core::ffi::c_void
  }

  /// # Safety
  /// Same contract as the C standard library's `realloc`.
  #[no_mangle]
  pub unsafe extern "C" fn realloc(ptr: *mut core::ffi::c_void, size: usize) -> *mut core::ffi::c_void {
    ALLOCATOR.realloc(ptr as *mut u8, size) as *mut core::ffi::c_void
  }
}
