//! Page source: obtains and releases page-aligned, zero-filled memory
//! directly from the OS via `mmap`/`munmap`.
//!
//! Everything else in this crate that needs to grow (the block lists, the
//! leak tracker) must come through here rather than through the public
//! allocator entry points, so that the allocator's own bookkeeping never
//! recurses into itself.

use core::ptr::NonNull;

use crate::error::ChallocError;

/// Size of one page on the platforms this crate targets.
pub(crate) const PAGE_SIZE: usize = 4096;

/// Round `size` up to the next multiple of the page size.
pub(crate) const fn ceil_to_page(size: usize) -> usize {
  let rem = size % PAGE_SIZE;
  if rem == 0 { size } else { size + PAGE_SIZE - rem }
}

/// Map a fresh, zero-filled, page-aligned region of exactly `size` bytes.
///
/// `size` must already be a multiple of the page size; callers round with
/// [`ceil_to_page`] first.
pub(crate) fn map(size: usize) -> Result<NonNull<u8>, ChallocError> {
  debug_assert_eq!(size % PAGE_SIZE, 0, "challoc: page source requires page-multiple sizes");

  let ptr = unsafe {
    libc::mmap(
      core::ptr::null_mut(),
      size,
      libc::PROT_READ | libc::PROT_WRITE,
      libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
      -1,
      0,
    )
  };

  if ptr == libc::MAP_FAILED {
    log::warn!("challoc: mmap failed requesting {size} bytes");
    return Err(ChallocError::MapFailed);
  }

  // SAFETY: mmap succeeded, so ptr is non-null and valid for `size` bytes.
  Ok(unsafe { NonNull::new_unchecked(ptr as *mut u8) })
}

/// Release a region previously obtained from [`map`].
///
/// # Safety
/// `ptr` must have come from [`map`] with this same `size`, and neither may
/// be used again afterwards.
pub(crate) unsafe fn unmap(ptr: NonNull<u8>, size: usize) {
  let rc = unsafe { libc::munmap(ptr.as_ptr() as *mut libc::c_void, size) };
  if rc != 0 {
    log::warn!("challoc: munmap failed for {size} bytes at {:p}", ptr.as_ptr());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ceil_to_page_rounds_up() {
    assert_eq!(ceil_to_page(0), 0);
    assert_eq!(ceil_to_page(1), PAGE_SIZE);
    assert_eq!(ceil_to_page(PAGE_SIZE), PAGE_SIZE);
    assert_eq!(ceil_to_page(PAGE_SIZE + 1), 2 * PAGE_SIZE);
  }

  #[test]
  fn map_and_unmap_round_trip() {
    let region = map(PAGE_SIZE).expect("mmap should succeed for one page");
    unsafe {
      region.as_ptr().write(0xAB);
      assert_eq!(region.as_ptr().read(), 0xAB);
      unmap(region, PAGE_SIZE);
    }
  }
}
