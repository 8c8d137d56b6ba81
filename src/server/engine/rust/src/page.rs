/* src/server/engine/rust/src/page.rs */

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Logical page of the site. Serialized as its slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PageId {
  #[default]
  Home,
  Services,
  About,
  Gallery,
  Blog,
  BlogDetail,
  Books,
  Charity,
  Testimonials,
  Contact,
  Admin,
  Terms,
  Privacy,
  Dakshina,
  /// Identifier outside the known set. Navigation accepts it; rendering falls back to home.
  Other(String),
}

impl PageId {
  /// Pages reachable as `/{slug}` by a plain path lookup.
  /// Home, admin and blog detail have dedicated path rules.
  pub const ROUTABLE: [PageId; 11] = [
    PageId::Services,
    PageId::About,
    PageId::Gallery,
    PageId::Blog,
    PageId::Books,
    PageId::Charity,
    PageId::Testimonials,
    PageId::Contact,
    PageId::Terms,
    PageId::Privacy,
    PageId::Dakshina,
  ];

  pub fn as_str(&self) -> &str {
    match self {
      Self::Home => "home",
      Self::Services => "services",
      Self::About => "about",
      Self::Gallery => "gallery",
      Self::Blog => "blog",
      Self::BlogDetail => "blog-detail",
      Self::Books => "books",
      Self::Charity => "charity",
      Self::Testimonials => "testimonials",
      Self::Contact => "contact",
      Self::Admin => "admin",
      Self::Terms => "terms",
      Self::Privacy => "privacy",
      Self::Dakshina => "dakshina",
      Self::Other(slug) => slug,
    }
  }

  /// Map a slug to a page. Never fails: unknown slugs become `Other`.
  pub fn from_slug(slug: &str) -> Self {
    match slug {
      "home" => Self::Home,
      "services" => Self::Services,
      "about" => Self::About,
      "gallery" => Self::Gallery,
      "blog" => Self::Blog,
      "blog-detail" => Self::BlogDetail,
      "books" => Self::Books,
      "charity" => Self::Charity,
      "testimonials" => Self::Testimonials,
      "contact" => Self::Contact,
      "admin" => Self::Admin,
      "terms" => Self::Terms,
      "privacy" => Self::Privacy,
      "dakshina" => Self::Dakshina,
      other => Self::Other(other.to_string()),
    }
  }

  /// Look up a slug in the routable set only.
  pub fn routable(slug: &str) -> Option<Self> {
    Self::ROUTABLE.iter().find(|p| p.as_str() == slug).cloned()
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, Self::Other(_))
  }
}

impl fmt::Display for PageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PageId {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from_slug(s))
  }
}

impl From<&str> for PageId {
  fn from(slug: &str) -> Self {
    Self::from_slug(slug)
  }
}

impl Serialize for PageId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for PageId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let slug = String::deserialize(deserializer)?;
    Ok(Self::from_slug(&slug))
  }
}

/// One entry of the primary navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
  pub page: PageId,
  pub label: &'static str,
}

const MENU: [(PageId, &str); 10] = [
  (PageId::Home, "Home"),
  (PageId::Services, "Services"),
  (PageId::About, "About"),
  (PageId::Gallery, "Gallery"),
  (PageId::Blog, "Blog"),
  (PageId::Books, "Books"),
  (PageId::Testimonials, "Testimonials"),
  (PageId::Charity, "Charity"),
  (PageId::Dakshina, "Dakshina"),
  (PageId::Contact, "Contact"),
];

/// Menu entries in display order. The admin entry is appended for the site owner only.
pub fn menu_entries(is_owner: bool) -> Vec<MenuEntry> {
  let mut entries: Vec<MenuEntry> =
    MENU.iter().map(|(page, label)| MenuEntry { page: page.clone(), label: *label }).collect();
  if is_owner {
    entries.push(MenuEntry { page: PageId::Admin, label: "Admin" });
  }
  entries
}
