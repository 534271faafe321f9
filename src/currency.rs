//! Money input as typed: the last two digits are always the cents.

use crate::mask::only_digits;

/// Format up to `max` typed digits as an amount with a `.` before the cents.
/// Fewer than three digits are returned as-is.
pub fn format_amount(value: &str, max: usize) -> String {
  let digits: String = only_digits(value).chars().take(max).collect();
  let len = digits.len();
  if len >= 3 {
    let (int_part, cents) = digits.split_at(len - 2);
    format!("{}.{}", int_part, cents)
  } else {
    digits
  }
}
