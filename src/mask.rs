//! Incremental masking of numeric form input.
//!
//! Every mask in this module is the same routine: keep the digits, cap them at
//! the shape's length, and interleave literal tokens at fixed positions. A token
//! is never emitted around the final digit, so partially typed input renders
//! without a dangling delimiter ("15/0" rather than "15/0/").
//!
//! Example:
//!   "15031990"    → "15/03/1990"
//!   "11987654321" → "(11) 98765-4321"

/// Literal tokens attached to one digit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark<'a> {
  /// Emitted right before the digit.
  pub prefix: &'a str,
  /// Emitted right after the digit.
  pub suffix: &'a str,
}

impl<'a> Mark<'a> {
  pub const fn before(token: &'a str) -> Self {
    Self { prefix: token, suffix: "" }
  }

  pub const fn after(token: &'a str) -> Self {
    Self { prefix: "", suffix: token }
  }
}

/// Output shape of a mask: how many digits it holds and where tokens go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape<'a> {
  pub max_len: usize,
  /// `(position, mark)` pairs, positions are zero-based digit indices.
  pub marks: &'a [(usize, Mark<'a>)],
}

/// DD/MM/YYYY
pub const DATE: Shape<'static> = Shape::new(8, &[(1, Mark::after("/")), (3, Mark::after("/"))]);
/// HH:MM
pub const HOUR_MINUTE: Shape<'static> = Shape::new(4, &[(1, Mark::after(":"))]);
/// HH:MMM
pub const HOUR_EXTENDED: Shape<'static> = Shape::new(5, &[(1, Mark::after(":"))]);
/// CEP, 00000-000
pub const POSTAL_CODE: Shape<'static> = Shape::new(8, &[(4, Mark::after("-"))]);
pub const CREDIT_CARD: Shape<'static> = Shape::new(
  16,
  &[(3, Mark::after(" ")), (7, Mark::after(" ")), (11, Mark::after(" "))],
);
/// (DD) NNNNN-NNNN, fixed and mobile lines.
pub const PHONE_BR: Shape<'static> = Shape::new(
  11,
  &[(0, Mark::before("(")), (1, Mark::after(") ")), (5, Mark::after("-"))],
);

/// International numbers are kept as typed, minus foreign characters, up to this length.
pub const INTERNATIONAL_PHONE_MAX: usize = 22;

impl<'a> Shape<'a> {
  pub const fn new(max_len: usize, marks: &'a [(usize, Mark<'a>)]) -> Self {
    Self { max_len, marks }
  }

  fn mark_at(&self, position: usize) -> Option<&Mark<'a>> {
    self.marks.iter().find(|(p, _)| *p == position).map(|(_, m)| m)
  }

  /// Mask `raw` into this shape. Non-digits are dropped, extra digits ignored.
  pub fn apply(&self, raw: &str) -> String {
    let digits: Vec<char> = raw
      .chars()
      .filter(char::is_ascii_digit)
      .take(self.max_len)
      .collect();
    let last = digits.len().saturating_sub(1);

    let mut out = String::with_capacity(digits.len() * 2);
    for (i, digit) in digits.iter().enumerate() {
      let mark = if i == last { None } else { self.mark_at(i) };
      if let Some(m) = mark {
        out.push_str(m.prefix);
      }
      out.push(*digit);
      if let Some(m) = mark {
        out.push_str(m.suffix);
      }
    }
    out
  }
}

/// Keep only ASCII digits, in order.
pub fn only_digits(value: &str) -> String {
  value.chars().filter(char::is_ascii_digit).collect()
}

pub fn format_date_input(value: &str) -> String {
  DATE.apply(value)
}

pub fn format_hour_minute_input(value: &str) -> String {
  HOUR_MINUTE.apply(value)
}

pub fn format_hour_input(value: &str) -> String {
  HOUR_EXTENDED.apply(value)
}

pub fn format_postal_code(value: &str) -> String {
  POSTAL_CODE.apply(value)
}

pub fn format_credit_card(value: &str) -> String {
  CREDIT_CARD.apply(value)
}

/// Mask a phone number as typed.
///
/// Input containing `+` is treated as international: it is not grouped, only
/// stripped of anything other than digits, `+`, parentheses, spaces and
/// hyphens, then capped at [`INTERNATIONAL_PHONE_MAX`] characters. Everything
/// else is masked as a Brazilian number. Absent input yields `None`.
pub fn format_phone(value: Option<&str>) -> Option<String> {
  let value = value?;
  if value.contains('+') {
    return Some(strip_international(value));
  }
  Some(PHONE_BR.apply(value))
}

fn strip_international(value: &str) -> String {
  value
    .chars()
    .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | ' ' | '-'))
    .take(INTERNATIONAL_PHONE_MAX)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_digits_keeps_order() {
    assert_eq!(only_digits("a1b2-c3 4"), "1234");
    assert_eq!(only_digits(""), "");
    assert_eq!(only_digits("abc"), "");
  }

  #[test]
  fn only_digits_ignores_non_ascii_digits() {
    assert_eq!(only_digits("١٢3"), "3");
  }

  #[test]
  fn date_masks_full_and_partial_input() {
    assert_eq!(format_date_input("15031990"), "15/03/1990");
    assert_eq!(format_date_input("1"), "1");
    assert_eq!(format_date_input("15"), "15");
    assert_eq!(format_date_input("150"), "15/0");
    assert_eq!(format_date_input("1503"), "15/03");
    assert_eq!(format_date_input("15031"), "15/03/1");
  }

  #[test]
  fn date_drops_extra_digits_and_noise() {
    assert_eq!(format_date_input("15/03/1990123"), "15/03/1990");
    assert_eq!(format_date_input("x1x5x0x3"), "15/03");
  }

  #[test]
  fn hour_minute_masks() {
    assert_eq!(format_hour_minute_input("0930"), "09:30");
    assert_eq!(format_hour_minute_input("09"), "09");
    assert_eq!(format_hour_minute_input("093"), "09:3");
    assert_eq!(format_hour_minute_input("093015"), "09:30");
  }

  #[test]
  fn extended_hour_keeps_five_digits() {
    assert_eq!(format_hour_input("12345"), "12:345");
    assert_eq!(format_hour_input("123456"), "12:345");
  }

  #[test]
  fn postal_code_masks() {
    assert_eq!(format_postal_code("12345678"), "12345-678");
    assert_eq!(format_postal_code("12345"), "12345");
    assert_eq!(format_postal_code("123456"), "12345-6");
    assert_eq!(format_postal_code("12345-678"), "12345-678");
  }

  #[test]
  fn credit_card_masks() {
    assert_eq!(format_credit_card("1234567890123456"), "1234 5678 9012 3456");
    assert_eq!(format_credit_card("1234"), "1234");
    assert_eq!(format_credit_card("12345"), "1234 5");
    assert_eq!(format_credit_card("12345678901234567890"), "1234 5678 9012 3456");
  }

  #[test]
  fn brazilian_phone_masks() {
    assert_eq!(format_phone(Some("11987654321")).as_deref(), Some("(11) 98765-4321"));
    assert_eq!(format_phone(Some("1")).as_deref(), Some("1"));
    assert_eq!(format_phone(Some("11")).as_deref(), Some("(11"));
    assert_eq!(format_phone(Some("119")).as_deref(), Some("(11) 9"));
    assert_eq!(format_phone(Some("1133334444")).as_deref(), Some("(11) 3333-4444"));
    assert_eq!(format_phone(Some("(11) 98765-4321")).as_deref(), Some("(11) 98765-4321"));
  }

  #[test]
  fn international_phone_is_stripped_not_grouped() {
    assert_eq!(
      format_phone(Some("+1 (555) 123-4567")).as_deref(),
      Some("+1 (555) 123-4567")
    );
    assert_eq!(format_phone(Some("+44 20.7946#0958")).as_deref(), Some("+44 2079460958"));
  }

  #[test]
  fn international_phone_is_capped() {
    let out = format_phone(Some("+55 (11) 98765-4321 1234 5678")).unwrap();
    assert_eq!(out, "+55 (11) 98765-4321 12");
    assert_eq!(out.chars().count(), INTERNATIONAL_PHONE_MAX);
  }

  #[test]
  fn absent_phone_falls_back_to_none() {
    assert_eq!(format_phone(None), None);
  }

  #[test]
  fn empty_input_gives_empty_output() {
    assert_eq!(format_date_input(""), "");
    assert_eq!(format_hour_minute_input(""), "");
    assert_eq!(format_hour_input(""), "");
    assert_eq!(format_postal_code(""), "");
    assert_eq!(format_credit_card(""), "");
    assert_eq!(format_phone(Some("")).as_deref(), Some(""));
  }

  #[test]
  fn custom_shape_supports_prefix_and_suffix() {
    let cpf_marks = [(2, Mark::after(".")), (5, Mark::after(".")), (8, Mark::after("-"))];
    let cpf = Shape::new(11, &cpf_marks);
    assert_eq!(cpf.apply("12345678901"), "123.456.789-01");

    let wrapped_marks = [(1, Mark { prefix: "[", suffix: "]" })];
    let wrapped = Shape::new(3, &wrapped_marks);
    assert_eq!(wrapped.apply("123"), "1[2]3");
    assert_eq!(wrapped.apply("12"), "12");
  }
}
