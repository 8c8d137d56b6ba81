/* src/server/injector/rust/src/helpers.rs */

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

const ENTITIES: &[(&str, char)] = &[
  ("&amp;", '&'),
  ("&lt;", '<'),
  ("&gt;", '>'),
  ("&quot;", '"'),
  ("&#x27;", '\''),
  ("&#39;", '\''),
  ("&apos;", '\''),
];

/// Decode the entities `escape_html` produces. Anything else is kept verbatim.
pub(crate) fn decode_entities(s: &str) -> String {
  if !s.contains('&') {
    return s.to_string();
  }
  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(pos) = rest.find('&') {
    out.push_str(&rest[..pos]);
    rest = &rest[pos..];
    match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
      Some((entity, ch)) => {
        out.push(*ch);
        rest = &rest[entity.len()..];
      }
      None => {
        out.push('&');
        rest = &rest[1..];
      }
    }
  }
  out.push_str(rest);
  out
}

/// Byte offset of `needle` in `haystack`, ignoring ASCII case.
pub(crate) fn find_ascii_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
  let lower = haystack.get(from..)?.to_ascii_lowercase();
  lower.find(&needle.to_ascii_lowercase()).map(|pos| pos + from)
}
