use std::io::Read;

use challoc::Challoc;

/// Waits until the user presses ENTER.
/// Useful when you want to inspect memory state with tools like `pmap`,
/// `htop`, `gdb`, or just visually track how allocations move between tiers.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn describe(allocator: &Challoc, ptr: *mut u8, size: usize) {
  let tier = if ptr.is_null() {
    "null"
  } else if allocator.in_minislab(ptr) {
    "minislab"
  } else {
    "block allocator"
  };
  println!(
    "     ptr = {:?}, requested = {} bytes, tier = {}, owned = {}",
    ptr,
    size,
    tier,
    allocator.contains(ptr)
  );
}

fn main() {
  env_logger::init();

  // `Challoc` is used directly here rather than installed as the process
  // allocator, so the demo can narrate each call without every background
  // `std` allocation (println's formatting buffers, etc.) routing through it.
  let allocator = Challoc::new();

  println!("[start] walking through the three tiers by hand");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) A 4-byte request lands in the smallest minislab class.
  // --------------------------------------------------------------------
  let tiny = allocator.alloc(4);
  println!("\n[1] alloc(4) -> minislab, smallest class");
  describe(&allocator, tiny, 4);
  unsafe {
    (tiny as *mut u32).write(0xDEADBEEF);
    println!("[1] value written = 0x{:X}", (tiny as *mut u32).read());
  }
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) A 12-byte request rounds up to the 16-byte class.
  // --------------------------------------------------------------------
  let odd = allocator.alloc(12);
  println!("\n[2] alloc(12) -> rounds up to the 16-byte class");
  describe(&allocator, odd, 12);
  unsafe { std::ptr::write_bytes(odd, 0xAB, 12) };
  println!("[2] filled with 0xAB");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) A request over 512 bytes skips the minislab and goes to the block
  //    allocator, which maps a fresh page-aligned region.
  // --------------------------------------------------------------------
  let big = allocator.alloc(64 * 1024);
  println!("\n[3] alloc(64 KiB) -> block allocator, fresh mmap");
  describe(&allocator, big, 64 * 1024);
  unsafe {
    (big as *mut u64).write(0x1122334455667788);
    println!("[3] value written = 0x{:X}", (big as *mut u64).read());
  }
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) zero-initialized memory via calloc.
  // --------------------------------------------------------------------
  let zeroed = allocator.calloc(16, 8);
  println!("\n[4] calloc(16, 8) -> zero-filled 128 bytes");
  describe(&allocator, zeroed, 128);
  let all_zero = unsafe { std::slice::from_raw_parts(zeroed, 128) }.iter().all(|&b| b == 0);
  println!("[4] all bytes zero? {all_zero}");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Free the big block. It doesn't vanish immediately: it sits in the
  //    deferred-unmap cache with a time-to-live measured in further
  //    allocator calls, available for reuse before it's actually unmapped.
  // --------------------------------------------------------------------
  allocator.free(big);
  println!("\n[5] freed the 64 KiB block; it is now cached, not yet unmapped");
  println!("     still owned (still mapped)? {}", allocator.contains(big));
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 6) Asking for a similarly sized block again revives the cached one
  //    instead of calling into the OS.
  // --------------------------------------------------------------------
  let revived = allocator.alloc(64 * 1024);
  println!("\n[6] alloc(64 KiB) again -> revived from cache? {}", revived == big);
  allocator.free(revived);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 7) Exhaust the cached block's time-to-live with unrelated traffic so
  //    it actually gets unmapped.
  // --------------------------------------------------------------------
  println!("\n[7] issuing unrelated small allocations to let the cache entry expire");
  for _ in 0..32 {
    let throwaway = allocator.alloc(4);
    allocator.free(throwaway);
  }
  println!("     still owned after the cache should have expired? {}", allocator.contains(big));

  allocator.free(tiny);
  allocator.free(odd);
  allocator.free(zeroed);

  println!("\n[8] end of walkthrough");
}
