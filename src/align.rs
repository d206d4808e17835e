/// Rounds the given size up to the allocator's fixed 4-byte boundary.
///
/// Arena capacities, request sizes and every ledger descriptor size are kept
/// as multiples of 4, so byte accounting never has to deal with stragglers.
///
/// # Examples
///
/// ```rust
/// use fitalloc::align4;
///
/// assert_eq!(align4!(10), 12);
/// assert_eq!(align4!(12), 12);
/// assert_eq!(align4!(1), 4);
/// assert_eq!(align4!(0), 0);
/// ```
#[macro_export]
macro_rules! align4 {
  ($value:expr) => {
    ($value + 4 - 1) & !(4 - 1)
  };
}
