/* src/server/engine/rust/src/escape.rs */

/// Make serialized JSON safe to embed inside a `<script>` element.
///
/// `<`, `>` and `&` only ever appear inside JSON strings, so they can be
/// rewritten to `\uXXXX` escapes without tracking string state. U+2028 and
/// U+2029 are escaped as well since some script parsers treat them as line
/// terminators.
pub fn script_safe_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  for ch in json.chars() {
    match ch {
      '<' => out.push_str("\\u003c"),
      '>' => out.push_str("\\u003e"),
      '&' => out.push_str("\\u0026"),
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      c => out.push(c),
    }
  }
  out
}
