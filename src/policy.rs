use crate::block::Block;

/// Placement policy used to choose which free block satisfies a request.
///
/// A policy only picks a candidate index into the ledger. Splitting the
/// winner and marking it used is one shared code path in
/// [`FitAllocator`](crate::FitAllocator), so the four strategies cannot drift
/// apart in how they commit a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
  /// Scan from the head, take the first block that fits.
  FirstFit,
  /// Resume scanning at the last placed block, wrapping once at the tail.
  NextFit,
  /// Take the fitting block with the smallest leftover.
  BestFit,
  /// Take the fitting block with the largest leftover.
  WorstFit,
}

impl Policy {
  /// Picks the index of the free block that should serve a request of
  /// `requested` bytes, or `None` when no block fits.
  ///
  /// `cursor` is only consulted by [`Policy::NextFit`]; the other policies
  /// ignore it.
  pub(crate) fn pick(
    self,
    blocks: &[Block],
    cursor: usize,
    requested: usize,
  ) -> Option<usize> {
    match self {
      Policy::FirstFit => first_fit(blocks, requested),
      Policy::NextFit => next_fit(blocks, cursor, requested),
      Policy::BestFit => best_fit(blocks, requested),
      Policy::WorstFit => worst_fit(blocks, requested),
    }
  }
}

fn fits(
  block: &Block,
  requested: usize,
) -> bool {
  block.is_free() && block.size >= requested
}

fn first_fit(
  blocks: &[Block],
  requested: usize,
) -> Option<usize> {
  blocks.iter().position(|block| fits(block, requested))
}

/// Visits every index exactly once, starting at the cursor and wrapping past
/// the tail, so a cursor parked on the only free block that is too small
/// terminates after one revolution instead of spinning.
fn next_fit(
  blocks: &[Block],
  cursor: usize,
  requested: usize,
) -> Option<usize> {
  if blocks.is_empty() {
    return None;
  }

  let start = if cursor < blocks.len() { cursor } else { 0 };

  (0..blocks.len())
    .map(|step| (start + step) % blocks.len())
    .find(|&index| fits(&blocks[index], requested))
}

fn best_fit(
  blocks: &[Block],
  requested: usize,
) -> Option<usize> {
  let mut winner: Option<usize> = None;
  let mut winner_leftover = 0;

  for (index, block) in blocks.iter().enumerate() {
    if !fits(block, requested) {
      continue;
    }

    // Strict comparison keeps the earliest candidate on ties.
    let leftover = block.size - requested;
    if winner.is_none() || leftover < winner_leftover {
      winner = Some(index);
      winner_leftover = leftover;
    }
  }

  winner
}

fn worst_fit(
  blocks: &[Block],
  requested: usize,
) -> Option<usize> {
  let mut winner: Option<usize> = None;
  let mut winner_leftover = 0;

  for (index, block) in blocks.iter().enumerate() {
    if !fits(block, requested) {
      continue;
    }

    let leftover = block.size - requested;
    if winner.is_none() || leftover > winner_leftover {
      winner = Some(index);
      winner_leftover = leftover;
    }
  }

  winner
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::block::BlockStatus;

  fn ledger(blocks: &[(usize, bool)]) -> Vec<Block> {
    blocks
      .iter()
      .map(|&(size, free)| {
        Block::new(
          size,
          if free { BlockStatus::Free } else { BlockStatus::Used },
        )
      })
      .collect()
  }

  #[test]
  fn first_fit_takes_first_fitting_block() {
    let blocks = ledger(&[(8, false), (8, true), (32, true)]);

    assert_eq!(Some(1), Policy::FirstFit.pick(&blocks, 0, 8));
  }

  #[test]
  fn first_fit_skips_too_small_holes() {
    let blocks = ledger(&[(8, true), (8, false), (32, true)]);

    assert_eq!(Some(2), Policy::FirstFit.pick(&blocks, 0, 16));
  }

  #[test]
  fn no_policy_picks_a_used_block() {
    let blocks = ledger(&[(64, false), (64, false)]);

    for policy in [
      Policy::FirstFit,
      Policy::NextFit,
      Policy::BestFit,
      Policy::WorstFit,
    ] {
      assert_eq!(None, policy.pick(&blocks, 0, 4));
    }
  }

  #[test]
  fn next_fit_resumes_at_cursor() {
    let blocks = ledger(&[(16, true), (8, false), (16, true)]);

    assert_eq!(Some(2), Policy::NextFit.pick(&blocks, 2, 8));
  }

  #[test]
  fn next_fit_wraps_to_head_once() {
    let blocks = ledger(&[(16, true), (8, false), (8, false)]);

    assert_eq!(Some(0), Policy::NextFit.pick(&blocks, 1, 8));
  }

  #[test]
  fn next_fit_gives_up_after_one_revolution() {
    // The cursor sits on the only free block and it is too small.
    let blocks = ledger(&[(16, false), (8, true)]);

    assert_eq!(None, Policy::NextFit.pick(&blocks, 1, 12));
  }

  #[test]
  fn next_fit_tolerates_stale_cursor() {
    let blocks = ledger(&[(8, false), (16, true)]);

    assert_eq!(Some(1), Policy::NextFit.pick(&blocks, 7, 8));
  }

  #[test]
  fn next_fit_handles_empty_ledger() {
    assert_eq!(None, Policy::NextFit.pick(&[], 0, 4));
  }

  #[test]
  fn best_fit_minimizes_leftover() {
    let blocks = ledger(&[(24, true), (12, false), (8, true), (32, true)]);

    assert_eq!(Some(2), Policy::BestFit.pick(&blocks, 0, 8));
  }

  #[test]
  fn best_fit_first_minimum_wins_ties() {
    let blocks = ledger(&[(16, true), (16, true), (32, true)]);

    assert_eq!(Some(0), Policy::BestFit.pick(&blocks, 0, 8));
  }

  #[test]
  fn worst_fit_maximizes_leftover() {
    let blocks = ledger(&[(24, true), (12, false), (8, true), (32, true)]);

    assert_eq!(Some(3), Policy::WorstFit.pick(&blocks, 0, 8));
  }

  #[test]
  fn worst_fit_first_maximum_wins_ties() {
    let blocks = ledger(&[(8, true), (32, true), (32, true)]);

    assert_eq!(Some(1), Policy::WorstFit.pick(&blocks, 0, 8));
  }

  #[test]
  fn exact_fit_beats_everything_for_best_fit() {
    let blocks = ledger(&[(32, true), (8, true)]);

    assert_eq!(Some(1), Policy::BestFit.pick(&blocks, 0, 8));
  }
}
