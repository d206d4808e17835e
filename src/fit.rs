use std::fmt;
use std::ptr::NonNull;

use libc::c_void;
use log::{debug, trace, warn};

use crate::align4;
use crate::block::{Block, BlockStatus};
use crate::policy::Policy;

/// Prints one line per ledger descriptor, tagged with its arena offset.
///
/// Useful when eyeballing fragmentation from a demo or a debugger session.
pub fn print_ledger(allocator: &FitAllocator) {
  println!(
    "ledger: {} block(s), {} of {} bytes free",
    allocator.block_count(),
    allocator.free_bytes(),
    allocator.capacity(),
  );

  let mut offset = 0;
  for block in &allocator.blocks {
    println!(
      "  [{:>8}] {} {} bytes",
      offset,
      if block.is_free() { "FREE" } else { "USED" },
      block.size,
    );
    offset += block.size;
  }
}

/// Reasons [`FitAllocator::new`] can refuse to build an allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
  /// The capacity was zero, or too large to round up to a 4-byte multiple.
  InvalidSize,
  /// The arena reservation itself failed.
  OutOfMemory,
}

impl fmt::Display for InitError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      InitError::InvalidSize => write!(f, "arena capacity must be non-zero and representable"),
      InitError::OutOfMemory => write!(f, "arena reservation failed"),
    }
  }
}

impl std::error::Error for InitError {}

/// Outcome of a [`FitAllocator::free`] call.
///
/// Caller misuse is tolerated rather than escalated: a pointer that names no
/// tracked block is ignored, and releasing a block twice leaves it free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeStatus {
  /// The block was in use and is now free.
  Freed,
  /// The block was already free. It stays free.
  DoubleFree,
  /// The pointer does not name the start of any tracked block.
  Untracked,
}

/// A fixed-capacity arena allocator with a pluggable placement policy.
///
/// The arena is reserved once at construction and never grows. A ledger of
/// block descriptors, kept in ascending address order, tiles the arena
/// exactly: [`alloc`](FitAllocator::alloc) carves used blocks out of free
/// ones, and [`free`](FitAllocator::free) merges adjacent free blocks back
/// together.
///
/// Each instance owns its arena, ledger and policy outright, so independent
/// allocators never interfere with one another; the arena is released when
/// the instance is dropped. The type holds a raw arena pointer and is
/// neither `Send` nor `Sync`; all use is single-threaded.
pub struct FitAllocator {
  arena: NonNull<u8>,
  capacity: usize,
  blocks: Vec<Block>,
  policy: Policy,
  cursor: usize,
}

impl FitAllocator {
  /// Reserves an arena of `capacity` bytes, rounded up to a 4-byte multiple,
  /// and installs `policy` for the lifetime of this instance.
  ///
  /// The ledger starts as a single free block spanning the whole arena.
  pub fn new(
    capacity: usize,
    policy: Policy,
  ) -> Result<Self, InitError> {
    if capacity == 0 || capacity > usize::MAX - 3 {
      return Err(InitError::InvalidSize);
    }

    let capacity = align4!(capacity);

    let arena = unsafe { libc::malloc(capacity) } as *mut u8;
    let arena = NonNull::new(arena).ok_or(InitError::OutOfMemory)?;

    trace!("reserved {capacity} byte arena at {arena:?}");

    Ok(Self {
      arena,
      capacity,
      blocks: vec![Block::new(capacity, BlockStatus::Free)],
      policy,
      cursor: 0,
    })
  }

  /// Returns the address of a used block of at least `size` bytes, or `None`
  /// when no free block satisfies the request under the configured policy.
  ///
  /// Requests are rounded up to a 4-byte multiple; a zero-size request is
  /// served as a minimal 4-byte block. A failed request leaves the ledger
  /// byte-for-byte unchanged.
  pub fn alloc(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    if size > usize::MAX - 3 {
      return None;
    }

    let requested = align4!(size).max(4);

    let index = self.policy.pick(&self.blocks, self.cursor, requested)?;
    let offset = self.offset_of(index);

    let leftover = self.blocks[index].size - requested;
    self.blocks[index] = Block::new(requested, BlockStatus::Used);

    if leftover > 0 {
      self
        .blocks
        .insert(index + 1, Block::new(leftover, BlockStatus::Free));
    }

    self.cursor = index;

    trace!("placed {requested} bytes at offset {offset}, {leftover} left over");

    self.check_ledger();

    NonNull::new(unsafe { self.arena.as_ptr().add(offset) })
  }

  /// Releases the block starting at `ptr`, then merges any run of adjacent
  /// free blocks into one.
  ///
  /// A pointer that does not name the start of a tracked block is ignored.
  /// Releasing an already-free block logs a warning and is otherwise a no-op;
  /// the block stays free.
  pub fn free(
    &mut self,
    ptr: NonNull<u8>,
  ) -> FreeStatus {
    let base = self.arena.as_ptr() as usize;
    let addr = ptr.as_ptr() as usize;

    if addr < base || addr >= base + self.capacity {
      debug!("ignoring free of {ptr:?}: outside the arena");
      return FreeStatus::Untracked;
    }

    let target = addr - base;

    let Some(index) = self.index_at(target) else {
      debug!("ignoring free at offset {target}: not the start of a block");
      return FreeStatus::Untracked;
    };

    let status = if self.blocks[index].is_free() {
      warn!("double free at offset {target}");
      FreeStatus::DoubleFree
    } else {
      self.blocks[index].status = BlockStatus::Free;
      trace!("released {} bytes at offset {target}", self.blocks[index].size);
      FreeStatus::Freed
    };

    self.coalesce();
    self.check_ledger();

    status
  }

  /// Number of ledger descriptors, free and used.
  ///
  /// Coalescing keeps this the primary observable for fragmentation: a fully
  /// released arena always reports exactly one block.
  pub fn block_count(&self) -> usize {
    self.blocks.len()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn policy(&self) -> Policy {
    self.policy
  }

  /// Total bytes sitting in free blocks. Fragmentation can make a request
  /// fail even when this exceeds the requested size.
  pub fn free_bytes(&self) -> usize {
    self
      .blocks
      .iter()
      .filter(|block| block.is_free())
      .map(|block| block.size)
      .sum()
  }

  /// Merges every run of adjacent free descriptors into its first member.
  ///
  /// A merged position is re-examined before moving on, so runs longer than
  /// two collapse into a single descriptor in one pass.
  fn coalesce(&mut self) {
    let mut index = 0;

    while index + 1 < self.blocks.len() {
      if self.blocks[index].is_free() && self.blocks[index + 1].is_free() {
        self.blocks[index].size += self.blocks[index + 1].size;
        self.blocks.remove(index + 1);

        // Keep the next-fit cursor on the block it was pointing at; a cursor
        // on the absorbed block lands on the merge result.
        if self.cursor > index {
          self.cursor -= 1;
        }
      } else {
        index += 1;
      }
    }
  }

  fn offset_of(
    &self,
    index: usize,
  ) -> usize {
    self.blocks[..index].iter().map(|block| block.size).sum()
  }

  fn index_at(
    &self,
    target: usize,
  ) -> Option<usize> {
    let mut offset = 0;

    for (index, block) in self.blocks.iter().enumerate() {
      if offset == target {
        return Some(index);
      }
      offset += block.size;
    }

    None
  }

  /// The ledger must always tile the arena exactly in non-zero 4-byte
  /// multiples.
  fn check_ledger(&self) {
    debug_assert_eq!(
      self.capacity,
      self.blocks.iter().map(|block| block.size).sum::<usize>(),
    );
    debug_assert!(
      self
        .blocks
        .iter()
        .all(|block| block.size > 0 && block.size % 4 == 0),
    );
  }
}

impl Drop for FitAllocator {
  fn drop(&mut self) {
    trace!("releasing {} byte arena at {:?}", self.capacity, self.arena);
    unsafe { libc::free(self.arena.as_ptr() as *mut c_void) };
  }
}
