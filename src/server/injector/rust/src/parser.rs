/* src/server/injector/rust/src/parser.rs */

use crate::head::{Element, HeadNode};
use crate::helpers::{decode_entities, find_ascii_ci};

/// Elements whose body is text up to the matching close tag.
const RAW_TEXT_TAGS: &[&str] = &["title", "script", "style", "noscript"];

/// Elements the injector reads and rewrites. Any other tag is kept as raw markup.
const VOID_TAGS: &[&str] = &["meta", "link", "base"];

/// Split the inner HTML of `<head>` into managed elements and raw spans.
/// Malformed markup degrades to `Raw` and is written back unchanged.
pub(crate) fn parse_head(html: &str) -> Vec<HeadNode> {
  let mut nodes = Vec::new();
  let mut pos = 0;

  while pos < html.len() {
    let rest = &html[pos..];

    if !rest.starts_with('<') {
      let end = rest.find('<').unwrap_or(rest.len());
      push_raw(&mut nodes, &rest[..end]);
      pos += end;
      continue;
    }

    if rest.starts_with("<!--") {
      let end = rest.find("-->").map_or(rest.len(), |i| i + 3);
      push_raw(&mut nodes, &rest[..end]);
      pos += end;
      continue;
    }

    match parse_open_tag(rest) {
      Some((tag, attrs, consumed)) if VOID_TAGS.contains(&tag.as_str()) => {
        nodes.push(HeadNode::Element(Element { tag, attrs, body: None }));
        pos += consumed;
      }
      Some((tag, attrs, consumed)) if RAW_TEXT_TAGS.contains(&tag.as_str()) => {
        let body_start = pos + consumed;
        let close = format!("</{tag}");
        let Some(close_at) = find_ascii_ci(html, &close, body_start) else {
          push_raw(&mut nodes, rest);
          break;
        };
        let close_end = html[close_at..].find('>').map_or(html.len(), |i| close_at + i + 1);
        let raw_body = &html[body_start..close_at];
        let body = if tag == "title" { decode_entities(raw_body) } else { raw_body.to_string() };
        nodes.push(HeadNode::Element(Element { tag, attrs, body: Some(body) }));
        pos = close_end;
      }
      Some((_, _, consumed)) => {
        push_raw(&mut nodes, &rest[..consumed]);
        pos += consumed;
      }
      None => {
        // Lone '<' or a closing tag: keep one char and move on.
        let end = rest[1..].find('<').map_or(rest.len(), |i| i + 1);
        push_raw(&mut nodes, &rest[..end]);
        pos += end;
      }
    }
  }

  nodes
}

fn push_raw(nodes: &mut Vec<HeadNode>, text: &str) {
  if text.is_empty() {
    return;
  }
  if let Some(HeadNode::Raw(prev)) = nodes.last_mut() {
    prev.push_str(text);
  } else {
    nodes.push(HeadNode::Raw(text.to_string()));
  }
}

/// Parse `<tag attr="v" ...>` at the start of `input`.
/// Returns the lowercased tag, decoded attributes and bytes consumed.
fn parse_open_tag(input: &str) -> Option<(String, Vec<(String, String)>, usize)> {
  let bytes = input.as_bytes();
  let mut i = 1;
  while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
    i += 1;
  }
  if i == 1 || !bytes[1].is_ascii_alphabetic() {
    return None;
  }
  let tag = input[1..i].to_ascii_lowercase();
  let mut attrs = Vec::new();

  loop {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
      i += 1;
    }
    if i >= bytes.len() {
      return None;
    }
    match bytes[i] {
      b'>' => return Some((tag, attrs, i + 1)),
      b'/' if bytes.get(i + 1) == Some(&b'>') => return Some((tag, attrs, i + 2)),
      b'/' => {
        i += 1;
        continue;
      }
      _ => {}
    }

    let name_start = i;
    while i < bytes.len() && !matches!(bytes[i], b'=' | b'>' | b'/') && !bytes[i].is_ascii_whitespace()
    {
      i += 1;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
      i += 1;
    }
    if bytes.get(i) != Some(&b'=') {
      attrs.push((name, String::new()));
      continue;
    }
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
      i += 1;
    }

    let value = match bytes.get(i) {
      Some(&q) if q == b'"' || q == b'\'' => {
        let start = i + 1;
        let len = input[start..].find(q as char)?;
        i = start + len + 1;
        &input[start..start + len]
      }
      Some(_) => {
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
          i += 1;
        }
        &input[start..i]
      }
      None => return None,
    };
    attrs.push((name, decode_entities(value)));
  }
}
