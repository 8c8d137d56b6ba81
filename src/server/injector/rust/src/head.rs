/* src/server/injector/rust/src/head.rs */

use crate::HeadDocument;
use crate::parser::parse_head;
use crate::render::render_head;

/// Attribute key a `<meta>` tag is identified by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
  /// `<meta name="...">`
  Name,
  /// `<meta property="...">`, used by Open Graph
  Property,
}

impl MetaKey {
  pub fn attr(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Property => "property",
    }
  }
}

/// A head element. Attribute values and the title body are stored decoded;
/// script and style bodies are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub tag: String,
  pub attrs: Vec<(String, String)>,
  /// `None` for void elements such as `<meta>` and `<link>`.
  pub body: Option<String>,
}

impl Element {
  pub fn void(tag: &str, attrs: &[(&str, &str)]) -> Self {
    Self {
      tag: tag.to_string(),
      attrs: attrs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
      body: None,
    }
  }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  pub fn set_attr(&mut self, name: &str, value: &str) {
    match self.attrs.iter_mut().find(|(k, _)| k == name) {
      Some((_, v)) => *v = value.to_string(),
      None => self.attrs.push((name.to_string(), value.to_string())),
    }
  }

  fn is(&self, tag: &str) -> bool {
    self.tag == tag
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
  Element(Element),
  /// Text, comments and markup the injector does not manage, kept byte for byte.
  Raw(String),
}

/// In-memory document head: the server-side stand-in for `document.head`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
  nodes: Vec<HeadNode>,
}

impl Head {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse the inner HTML of a `<head>` element.
  pub fn parse(inner_html: &str) -> Self {
    Self { nodes: parse_head(inner_html) }
  }

  pub fn render(&self) -> String {
    render_head(&self.nodes)
  }

  pub fn nodes(&self) -> &[HeadNode] {
    &self.nodes
  }

  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.nodes.iter().filter_map(|n| match n {
      HeadNode::Element(el) => Some(el),
      HeadNode::Raw(_) => None,
    })
  }

  pub fn title(&self) -> Option<&str> {
    self.elements().find(|el| el.is("title")).and_then(|el| el.body.as_deref())
  }

  pub fn meta(&self, key: MetaKey, name: &str) -> Option<&str> {
    self
      .elements()
      .find(|el| el.is("meta") && el.attr(key.attr()) == Some(name))
      .and_then(|el| el.attr("content"))
  }

  pub fn link_href(&self, rel: &str) -> Option<&str> {
    self
      .elements()
      .find(|el| el.is("link") && el.attr("rel") == Some(rel))
      .and_then(|el| el.attr("href"))
  }

  pub fn scripts(&self, script_type: &str) -> Vec<&str> {
    self
      .elements()
      .filter(|el| el.is("script") && el.attr("type") == Some(script_type))
      .map(|el| el.body.as_deref().unwrap_or_default())
      .collect()
  }

  /// Number of elements matching `pred`.
  pub fn count(&self, pred: impl Fn(&Element) -> bool) -> usize {
    self.elements().filter(|el| pred(el)).count()
  }

  /// Keep the first element matching `pred`, drop the rest, and return the
  /// index of the survivor.
  fn dedupe(&mut self, pred: impl Fn(&Element) -> bool) -> Option<usize> {
    let mut first = None;
    let mut idx = 0;
    self.nodes.retain(|node| {
      let hit = matches!(node, HeadNode::Element(el) if pred(el));
      let keep = if hit && first.is_none() {
        first = Some(idx);
        true
      } else {
        !hit
      };
      if keep {
        idx += 1;
      }
      keep
    });
    first
  }

  fn element_mut(&mut self, idx: usize) -> Option<&mut Element> {
    match self.nodes.get_mut(idx) {
      Some(HeadNode::Element(el)) => Some(el),
      _ => None,
    }
  }

  fn upsert(&mut self, pred: impl Fn(&Element) -> bool, create: impl FnOnce() -> Element) -> usize {
    match self.dedupe(pred) {
      Some(idx) => idx,
      None => {
        self.nodes.push(HeadNode::Element(create()));
        self.nodes.len() - 1
      }
    }
  }
}

impl HeadDocument for Head {
  fn set_title(&mut self, title: &str) {
    let idx = self.upsert(|el| el.is("title"), || Element {
      tag: "title".into(),
      attrs: Vec::new(),
      body: None,
    });
    if let Some(el) = self.element_mut(idx) {
      el.body = Some(title.to_string());
    }
  }

  fn upsert_meta(&mut self, key: MetaKey, name: &str, content: &str) {
    let attr = key.attr();
    let idx = self.upsert(
      |el| el.is("meta") && el.attr(attr) == Some(name),
      || Element::void("meta", &[(attr, name)]),
    );
    if let Some(el) = self.element_mut(idx) {
      el.set_attr("content", content);
    }
  }

  fn upsert_link(&mut self, rel: &str, href: &str) {
    let idx = self.upsert(
      |el| el.is("link") && el.attr("rel") == Some(rel),
      || Element::void("link", &[("rel", rel)]),
    );
    if let Some(el) = self.element_mut(idx) {
      el.set_attr("href", href);
    }
  }

  fn replace_script(&mut self, script_type: &str, body: &str) {
    self.nodes.retain(|node| match node {
      HeadNode::Element(el) => !(el.is("script") && el.attr("type") == Some(script_type)),
      HeadNode::Raw(_) => true,
    });
    self.nodes.push(HeadNode::Element(Element {
      tag: "script".into(),
      attrs: vec![("type".into(), script_type.to_string())],
      body: Some(body.to_string()),
    }));
  }
}
