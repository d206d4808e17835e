use fitalloc::{FitAllocator, FreeStatus, Policy, print_ledger};

fn main() {
  // A small arena makes every ledger transition easy to follow.
  let mut allocator = FitAllocator::new(256, Policy::FirstFit).unwrap();

  // --------------------------------------------------------------------
  // 1) Fresh arena: one free block spanning the whole capacity.
  // --------------------------------------------------------------------
  println!("\n[1] Fresh 256 byte arena");
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 2) Allocate three blocks. Each request rounds up to a 4-byte
  //    multiple and splits the free tail.
  // --------------------------------------------------------------------
  let first = allocator.alloc(30).unwrap();
  let second = allocator.alloc(50).unwrap();
  let third = allocator.alloc(20).unwrap();
  println!("\n[2] After alloc(30), alloc(50), alloc(20)");
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 3) Free the middle block. The hole stays separate because its
  //    neighbors are still used.
  // --------------------------------------------------------------------
  allocator.free(second);
  println!("\n[3] After freeing the middle block");
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 4) Free the first block too. The two holes are adjacent now, so
  //    they coalesce into one.
  // --------------------------------------------------------------------
  allocator.free(first);
  println!("\n[4] After freeing the first block (coalesced with the hole)");
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 5) Exhaustion is a normal outcome: a request larger than every hole
  //    returns None and leaves the ledger untouched.
  // --------------------------------------------------------------------
  println!("\n[5] alloc(500) on a 256 byte arena -> {:?}", allocator.alloc(500));
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 6) Double free: tolerated, reported, block stays free. The head hole
  //    still starts where `first` did, so the second free finds it.
  // --------------------------------------------------------------------
  let status = allocator.free(first);
  println!("\n[6] Second free of the first block -> {status:?}");
  assert_eq!(FreeStatus::DoubleFree, status);

  allocator.free(third);
  print_ledger(&allocator);

  // --------------------------------------------------------------------
  // 7) Policy comparison: the same fragmented arena answers the same
  //    request differently under best fit and worst fit.
  // --------------------------------------------------------------------
  for policy in [Policy::BestFit, Policy::WorstFit] {
    let mut allocator = FitAllocator::new(88, policy).unwrap();

    // Shape the ledger into [FREE 24][USED 12][FREE 8][USED 12][FREE 32].
    let a = allocator.alloc(24).unwrap();
    let _b = allocator.alloc(12).unwrap();
    let c = allocator.alloc(8).unwrap();
    let _d = allocator.alloc(12).unwrap();
    allocator.free(a);
    allocator.free(c);

    allocator.alloc(8).unwrap();
    println!("\n[7] alloc(8) on a fragmented arena under {policy:?}");
    print_ledger(&allocator);
  }

  println!("\n[8] End of walkthrough. Arenas are released on drop.");
}
