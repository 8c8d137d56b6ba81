/* src/server/injector/rust/src/render.rs */

use crate::head::{Element, HeadNode};
use crate::helpers::escape_html;

pub(crate) fn render_head(nodes: &[HeadNode]) -> String {
  let mut out = String::new();
  for node in nodes {
    match node {
      HeadNode::Raw(raw) => out.push_str(raw),
      HeadNode::Element(el) => render_element(el, &mut out),
    }
  }
  out
}

fn render_element(el: &Element, out: &mut String) {
  out.push('<');
  out.push_str(&el.tag);
  for (name, value) in &el.attrs {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
  }
  out.push('>');

  if let Some(ref body) = el.body {
    // Only the title body is text; script and style bodies go out as stored.
    if el.tag == "title" {
      out.push_str(&escape_html(body));
    } else {
      out.push_str(body);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
  }
}
