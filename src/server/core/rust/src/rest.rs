/* src/server/core/rust/src/rest.rs */

use pujari_engine::{PageMetadataRecord, SiteMetadataDefaults};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::errors::SiteError;
use crate::source::{BlogPost, BoxFuture, MetadataSource};

const PAGE_TABLE: &str = "page_seo";
const SETTINGS_TABLE: &str = "site_settings";
const POSTS_TABLE: &str = "blog_posts";
const DEFAULTS_KEY: &str = "seo_defaults";

/// Row of the settings table; the defaults live in `value`.
#[derive(Deserialize)]
struct SettingRow {
  value: SiteMetadataDefaults,
}

/// Record store reached over a PostgREST-style HTTP API.
#[derive(Debug, Clone)]
pub struct RestSource {
  client: reqwest::Client,
  base: String,
  api_key: Option<String>,
}

impl RestSource {
  pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, SiteError> {
    let base = base_url.trim_end_matches('/').to_string();
    Url::parse(&base).map_err(|e| SiteError::validation(format!("invalid source url {base}: {e}")))?;
    Ok(Self { client: reqwest::Client::new(), base, api_key })
  }

  fn endpoint(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, SiteError> {
    let mut url = Url::parse(&format!("{}/{table}", self.base))
      .map_err(|e| SiteError::internal(format!("build url for {table}: {e}")))?;
    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
  }

  async fn rows<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, SiteError> {
    let mut req = self.client.get(url.clone()).header("Accept", "application/json");
    if let Some(key) = &self.api_key {
      req = req.header("apikey", key).bearer_auth(key);
    }
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(SiteError::unavailable(format!("{} answered {status}", url.path())));
    }
    Ok(resp.json::<Vec<T>>().await?)
  }
}

impl MetadataSource for RestSource {
  fn fetch_page_metadata<'a>(
    &'a self,
    slug: &'a str,
  ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>> {
    Box::pin(async move {
      let filter = format!("eq.{slug}");
      let url = self.endpoint(PAGE_TABLE, &[("slug", filter.as_str()), ("limit", "1")])?;
      let rows: Vec<PageMetadataRecord> = self.rows(url).await?;
      Ok(rows.into_iter().next())
    })
  }

  fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>> {
    Box::pin(async move {
      let filter = format!("eq.{DEFAULTS_KEY}");
      let url = self.endpoint(SETTINGS_TABLE, &[("key", filter.as_str()), ("select", "value")])?;
      let rows: Vec<SettingRow> = self.rows(url).await?;
      Ok(rows.into_iter().next().map(|row| row.value).unwrap_or_default())
    })
  }

  fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>> {
    Box::pin(async move {
      let url = self.endpoint(
        POSTS_TABLE,
        &[
          ("select", "slug,title,excerpt,published_at"),
          ("published", "eq.true"),
          ("order", "published_at.desc"),
        ],
      )?;
      self.rows(url).await
    })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use axum::Json;
  use axum::Router;
  use axum::extract::Query;
  use axum::http::{HeaderMap, StatusCode};
  use axum::routing::get;
  use serde_json::{Value, json};

  use super::*;

  async fn page_seo(Query(q): Query<HashMap<String, String>>, headers: HeaderMap) -> Json<Value> {
    assert_eq!(headers.get("apikey").and_then(|v| v.to_str().ok()), Some("anon"));
    assert_eq!(headers.get("authorization").and_then(|v| v.to_str().ok()), Some("Bearer anon"));
    match q.get("slug").map(String::as_str) {
      Some("eq.services") => Json(json!([{
        "slug": "services",
        "meta_title": "Pooja Services",
        "meta_keywords": ["pooja", "havan"]
      }])),
      _ => Json(json!([])),
    }
  }

  async fn site_settings(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(q.get("key").map(String::as_str), Some("eq.seo_defaults"));
    Json(json!([{ "value": { "title": "Default Title", "description": "Default Desc" } }]))
  }

  async fn blog_posts(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(q.get("published").map(String::as_str), Some("eq.true"));
    Json(json!([{ "slug": "significance-pooja", "title": "Significance of Pooja" }]))
  }

  async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
  }

  #[tokio::test]
  async fn reads_postgrest_tables() {
    let base = serve(
      Router::new()
        .route("/page_seo", get(page_seo))
        .route("/site_settings", get(site_settings))
        .route("/blog_posts", get(blog_posts)),
    )
    .await;
    let source = RestSource::new(&format!("{base}/"), Some("anon".into())).unwrap();

    let rec = source.fetch_page_metadata("services").await.unwrap().unwrap();
    assert_eq!(rec.meta_title.as_deref(), Some("Pooja Services"));
    assert_eq!(rec.meta_keywords, Some(vec!["pooja".to_string(), "havan".to_string()]));
    assert!(source.fetch_page_metadata("about").await.unwrap().is_none());

    let defaults = source.fetch_site_defaults().await.unwrap();
    assert_eq!(defaults.title.as_deref(), Some("Default Title"));
    assert!(defaults.keywords.is_none());

    let posts = source.list_blog_posts().await.unwrap();
    assert_eq!(posts[0].slug, "significance-pooja");
  }

  #[tokio::test]
  async fn error_status_is_unavailable() {
    let base = serve(
      Router::new().route("/page_seo", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
    )
    .await;
    let source = RestSource::new(&base, None).unwrap();
    let err = source.fetch_page_metadata("services").await.unwrap_err();
    assert_eq!(err.code(), "UNAVAILABLE");
    assert_eq!(err.status(), 503);
  }

  #[test]
  fn rejects_bad_base_url() {
    let err = RestSource::new("not a url", None).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
  }
}
