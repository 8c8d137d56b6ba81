/* src/cli/core/src/config/tests.rs */

use std::path::Path;

use super::*;

const FILE_CONFIG: &str = r#"
[site]
name = "Pandit Rajesh Joshi"
origin = "https://example.org/"

[source]
kind = "file"
path = "content.json"
"#;

fn write(dir: &Path, content: &str) -> std::path::PathBuf {
  let path = dir.join(CONFIG_FILE);
  std::fs::write(&path, content).unwrap();
  path
}

#[test]
fn loads_with_defaults_and_normalized_origin() {
  let tmp = tempfile::tempdir().unwrap();
  let config = load_pujari_config(&write(tmp.path(), FILE_CONFIG)).unwrap();
  assert_eq!(config.server.bind, "0.0.0.0:3000");
  assert!(config.server.template.is_none());
  assert_eq!(config.source.kind, SourceKind::File);
  assert!(!config.log.json);

  let identity = config.identity();
  assert_eq!(identity.origin.as_deref(), Some("https://example.org"));
  assert_eq!(identity.name, "Pandit Rajesh Joshi");
  assert_eq!(identity.author, "Pandit Rajesh Joshi");
}

#[test]
fn discovery_walks_upward() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), FILE_CONFIG);
  let nested = tmp.path().join("pages/blog");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_pujari_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));
}

#[test]
fn discovery_fails_without_config() {
  let tmp = tempfile::tempdir().unwrap();
  let err = find_pujari_config(tmp.path()).unwrap_err();
  assert!(err.to_string().contains("pujari.toml not found"));
}

#[test]
fn file_source_requires_path() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(tmp.path(), "[source]\nkind = \"file\"\n");
  let err = load_pujari_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("source.path is required"));
}

#[test]
fn rest_source_requires_url() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(tmp.path(), "[source]\nkind = \"rest\"\napi_key = \"anon\"\n");
  let err = load_pujari_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("source.url is required"));
}

#[test]
fn origin_must_be_http() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write(
    tmp.path(),
    "[site]\norigin = \"example.org\"\n\n[source]\nkind = \"rest\"\nurl = \"https://db.example.org/\"\n",
  );
  let err = load_pujari_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("must start with http://"));
}

#[test]
fn rest_config_with_log_and_server() {
  let mut config: PujariConfig = toml::from_str(
    r#"
[server]
bind = "127.0.0.1:8080"
template = "dist/index.html"

[source]
kind = "rest"
url = "https://db.example.org/rest/v1/"
api_key = "anon"

[log]
json = true
"#,
  )
  .unwrap();
  config.validate().unwrap();
  config.normalize();
  assert_eq!(config.source.url.as_deref(), Some("https://db.example.org/rest/v1"));
  assert_eq!(config.server.bind, "127.0.0.1:8080");
  assert!(config.log.json);
  assert_eq!(config.source.kind.as_str(), "rest");
}

#[test]
fn relative_paths_follow_config_dir() {
  let config_path = Path::new("/srv/site/pujari.toml");
  assert_eq!(config_relative(config_path, "content.json"), Path::new("/srv/site/content.json"));
  assert_eq!(config_relative(config_path, "/data/content.json"), Path::new("/data/content.json"));
}

#[test]
fn unknown_source_kind_is_rejected() {
  let parsed: Result<PujariConfig, _> = toml::from_str("[source]\nkind = \"sqlite\"\n");
  assert!(parsed.is_err());
}
