use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, warn};
use s2r_core::config::FetchConfig;
use s2r_core::{ContentFetcher, FetchError, resolve};
use walkdir::WalkDir;

/// Reads `http(s)` identifiers over the network and everything else from disk.
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for SourceFetcher {
    async fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        if is_remote(identifier) {
            debug!("GET {identifier}");
            let body = self
                .client
                .get(identifier)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(body)
        } else {
            Ok(tokio::fs::read_to_string(identifier).await?)
        }
    }
}

/// True for identifiers with an `http` or `https` scheme, in any case.
pub fn is_remote(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Read every text file below `dir` into a map keyed by path, in file name
/// order. Keys are built from the canonical directory path, normalized the
/// way [`resolve`] normalizes declaration identifiers, with a `.json`
/// extension dropped, so that `api-docs.json` and `api-docs/pet.json` line
/// up with the listing's `/pet` reference. Symlinks are followed and a
/// symlink loop is an error. Files that are not UTF-8 are skipped.
///
/// This blocks; run it off the async runtime.
pub fn read_directory(dir: &Path) -> Result<IndexMap<String, String>> {
    let root = fs::canonicalize(dir)
        .with_context(|| format!("failed to resolve directory {}", dir.display()))?;
    let mut files = IndexMap::new();

    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match fs::read_to_string(path) {
            Ok(content) => {
                let key = document_key(path);
                if files.insert(key.clone(), content).is_some() {
                    warn!("{} shadows an earlier file with key {key}", path.display());
                }
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("skipping non-text file {}", path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        }
    }

    debug!("read {} files from {}", files.len(), root.display());
    Ok(files)
}

fn document_key(path: &Path) -> String {
    let key = match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("json") => path.with_extension(""),
        _ => path.to_path_buf(),
    };
    resolve(&key.to_string_lossy(), &[] as &[&str])
}
