//! Small text helpers used across modules and by form front ends.

use crate::mask::only_digits;

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize_first_letter(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Make a user-typed link clickable: anything without an http(s) scheme gets `http://`.
pub fn ensure_http_scheme(link: &str) -> String {
  if link.contains("http://") || link.contains("https://") {
    link.to_string()
  } else {
    format!("http://{}", link)
  }
}

/// Digits for a wa.me link. A bare 11-digit Brazilian number gets the 55 country code.
pub fn whatsapp_number(number: &str) -> String {
  let digits = only_digits(number);
  if digits.len() == 11 { format!("55{}", digits) } else { digits }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn capitalizes_first_char_only() {
    assert_eq!(capitalize_first_letter("são paulo"), "São paulo");
    assert_eq!(capitalize_first_letter("élan"), "Élan");
    assert_eq!(capitalize_first_letter(""), "");
  }

  #[test]
  fn adds_scheme_when_missing() {
    assert_eq!(ensure_http_scheme("example.com"), "http://example.com");
    assert_eq!(ensure_http_scheme("https://example.com"), "https://example.com");
    assert_eq!(ensure_http_scheme("http://example.com/a"), "http://example.com/a");
  }

  #[test]
  fn whatsapp_prefixes_brazilian_mobiles() {
    assert_eq!(whatsapp_number("(11) 98765-4321"), "5511987654321");
    assert_eq!(whatsapp_number("1133334444"), "1133334444");
    assert_eq!(whatsapp_number("+55 11 98765-4321"), "5511987654321");
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
    assert_eq!(trunc_for_log("abcdef", 3), "abc… (6 bytes total)");
    assert_eq!(trunc_for_log("ããã", 3), "ã… (6 bytes total)");
  }
}
