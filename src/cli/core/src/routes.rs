/* src/cli/core/src/routes.rs */

use std::fmt::Write;

use pujari_engine::{PageId, route_table};

/// Path table, one `path  page` line per route.
pub(crate) fn format_routes() -> String {
  let mut rows: Vec<(String, String)> =
    route_table().into_iter().map(|(path, page)| (path, page.to_string())).collect();
  rows.push(("/blog/{slug}".to_string(), PageId::BlogDetail.to_string()));

  let width = rows.iter().map(|(path, _)| path.len()).max().unwrap_or(0);
  let mut out = String::new();
  for (path, page) in rows {
    let _ = writeln!(out, "{path:<width$}  {page}");
  }
  out
}
