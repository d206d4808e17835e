//! # fitalloc - A Fixed-Arena Placement-Policy Allocator
//!
//! This crate provides a user-space memory allocator that manages a single
//! fixed-size byte arena with a pluggable **block-placement policy**:
//! first-fit, next-fit, best-fit or worst-fit.
//!
//! ## Overview
//!
//! The arena is reserved once, up front, and never grows. A ledger of block
//! descriptors tiles it exactly, each descriptor marking its range FREE or
//! USED:
//!
//! ```text
//!   Arena and Ledger:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        ARENA (fixed capacity)                        │
//!   │                                                                      │
//!   │   ┌──────────┬──────┬────────────────┬──────┬──────────────────┐     │
//!   │   │  USED 24 │ FREE │    USED 40     │ FREE │      FREE        │     │
//!   │   │          │  8   │                │  12  │   (never two     │     │
//!   │   │          │      │                │      │  FREE neighbors) │     │
//!   │   └──────────┴──────┴────────────────┴──────┴──────────────────┘     │
//!   │                                                                      │
//!   │   Ledger descriptors, in address order, sum exactly to the capacity. │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Allocation **splits** a free block when it is larger than the request:
//!
//! ```text
//!   alloc(10) on a 88 byte hole (requests round up to 4 bytes):
//!
//!   before:  ┌───────────── FREE 88 ─────────────┐
//!   after:   ┌─ USED 12 ─┬──────── FREE 76 ──────┐
//! ```
//!
//! Release **coalesces** adjacent free blocks back into one:
//!
//! ```text
//!   free(middle):
//!
//!   before:  ┌─ FREE 16 ─┬─ USED 16 ─┬─ FREE 16 ─┐
//!   after:   ┌──────────────── FREE 48 ──────────┐
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   fitalloc
//!   ├── align      - align4! rounding macro
//!   ├── block      - Block descriptor record (internal)
//!   ├── policy     - Policy enum: the four placement strategies
//!   └── fit        - FitAllocator implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fitalloc::{FitAllocator, FreeStatus, Policy};
//!
//! let mut allocator = FitAllocator::new(1024, Policy::BestFit).unwrap();
//!
//! // Carve a block out of the arena.
//! let ptr = allocator.alloc(100).unwrap();
//!
//! // Hand it back; adjacent free blocks merge automatically.
//! assert_eq!(FreeStatus::Freed, allocator.free(ptr));
//! assert_eq!(1, allocator.block_count());
//! ```
//!
//! ## Placement Policies
//!
//! All four policies share the same split-and-commit code; they only differ
//! in which free block they pick:
//!
//! | Policy     | Scan                                   | Picks                         |
//! |------------|----------------------------------------|-------------------------------|
//! | `FirstFit` | head to tail                           | first block that fits         |
//! | `NextFit`  | resumes at last placement, wraps once  | first block that fits         |
//! | `BestFit`  | full scan                              | smallest leftover, first wins |
//! | `WorstFit` | full scan                              | largest leftover, first wins  |
//!
//! ## Features
//!
//! - **Fixed arena**: one up-front reservation, released on drop
//! - **Exact byte accounting**: the ledger always tiles the arena
//! - **Pluggable placement**: four strategies behind one enum
//! - **Tolerant release**: double frees warn, foreign pointers are ignored
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no synchronization primitives; the type is
//!   neither `Send` nor `Sync`
//! - **No arena growth**: exhaustion is a normal `None` result
//! - **No compaction**: only adjacent free blocks merge
//! - **Fixed 4-byte alignment**: no stricter alignment guarantees
//!
//! ## Safety
//!
//! The allocator's own API is safe: it hands out addresses into an arena it
//! owns for its whole lifetime. Reading or writing through those addresses
//! is the caller's `unsafe` business, exactly as with any raw allocator.

pub mod align;
mod block;
mod fit;
mod policy;

pub use fit::{FitAllocator, FreeStatus, InitError, print_ledger};
pub use policy::Policy;
