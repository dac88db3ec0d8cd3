use async_trait::async_trait;
use futures::future::try_join_all;
use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{ConvertError, FetchError};
use crate::parse::{Document, ParseMode, parse_document};
use crate::raml::RamlObject;
use crate::transform::{convert_api_declaration, convert_resource_listing, resolve};

/// Produces the raw text behind a document identifier (file path or URL).
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<String, FetchError>;
}

/// In-memory documents keyed by identifier.
#[async_trait]
impl ContentFetcher for IndexMap<String, String> {
    async fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        self.get(identifier)
            .cloned()
            .ok_or_else(|| format!("no document named {identifier}").into())
    }
}

/// Options for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub parse_mode: ParseMode,
    /// Object the documents are folded into.
    pub seed: RamlObject,
}

/// Convert the document at `identifier` with default options.
pub async fn convert<F>(identifier: &str, fetcher: &F) -> Result<RamlObject, ConvertError>
where
    F: ContentFetcher + ?Sized,
{
    convert_with_options(identifier, fetcher, ConvertOptions::default()).await
}

/// Convert the document at `identifier`.
///
/// A resource listing is converted first, then every declaration it
/// references is fetched concurrently and folded in listing order. Any other
/// document is converted as a lone API declaration.
pub async fn convert_with_options<F>(
    identifier: &str,
    fetcher: &F,
    options: ConvertOptions,
) -> Result<RamlObject, ConvertError>
where
    F: ContentFetcher + ?Sized,
{
    let root = fetch_document(identifier, fetcher, options.parse_mode).await?;
    let source = DeclarationSource {
        files: None,
        fetcher,
    };
    convert_root(identifier, root, &source, options).await
}

/// Convert a set of already fetched documents.
///
/// Entries that are not Swagger documents are skipped. Exactly one resource
/// listing must remain, unless the set holds a single document, which is then
/// converted on its own. Declarations missing from `files` are requested from
/// `fetcher`.
pub async fn convert_files<F>(
    files: &IndexMap<String, String>,
    fetcher: &F,
    options: ConvertOptions,
) -> Result<RamlObject, ConvertError>
where
    F: ContentFetcher + ?Sized,
{
    let mut documents: Vec<(&str, Document)> = Vec::new();
    for (identifier, content) in files {
        match parse_document(content, options.parse_mode) {
            Ok(document) => documents.push((identifier.as_str(), document)),
            Err(err) => debug!("skipping {identifier}: {err}"),
        }
    }

    let listings: Vec<usize> = documents
        .iter()
        .enumerate()
        .filter(|(_, (_, document))| document.is_resource_listing())
        .map(|(index, _)| index)
        .collect();

    let root = match listings.as_slice() {
        [index] => documents.swap_remove(*index),
        [] if documents.len() == 1 => documents.remove(0),
        [] => return Err(ConvertError::NoListingFound),
        _ => {
            let identifiers = listings
                .iter()
                .map(|&index| documents[index].0.to_string())
                .collect();
            return Err(ConvertError::MultipleListings(identifiers));
        }
    };

    let (identifier, document) = root;
    debug!("using {identifier} as the root document");
    let source = DeclarationSource {
        files: Some(files),
        fetcher,
    };
    convert_root(identifier, document, &source, options).await
}

/// Where referenced declarations are loaded from.
struct DeclarationSource<'a, F: ?Sized> {
    files: Option<&'a IndexMap<String, String>>,
    fetcher: &'a F,
}

impl<F> DeclarationSource<'_, F>
where
    F: ContentFetcher + ?Sized,
{
    async fn load(&self, identifier: &str, mode: ParseMode) -> Result<Document, ConvertError> {
        let Some(files) = self.files else {
            return fetch_document(identifier, self.fetcher, mode).await;
        };

        match files.get(identifier) {
            Some(content) => parse(identifier, content, mode),
            None => {
                debug!("{identifier} is not in the file set, fetching");
                let content = self.fetcher.fetch(identifier).await.map_err(|source| {
                    ConvertError::MissingDeclarationFile {
                        identifier: identifier.to_string(),
                        source: Some(source),
                    }
                })?;
                parse(identifier, &content, mode)
            }
        }
    }
}

async fn convert_root<F>(
    identifier: &str,
    root: Document,
    source: &DeclarationSource<'_, F>,
    options: ConvertOptions,
) -> Result<RamlObject, ConvertError>
where
    F: ContentFetcher + ?Sized,
{
    if !root.is_resource_listing() {
        debug!("{identifier} is an api declaration, converting on its own");
        let declaration = root.into_declaration()?;
        return convert_api_declaration(&declaration, options.seed);
    }

    let listing = root.into_listing()?;
    let raml = convert_resource_listing(&listing, options.seed)?;

    let identifiers: Vec<String> = listing
        .apis
        .iter()
        .flatten()
        .map(|api| resolve(identifier, &[api.path.as_str()]))
        .collect();

    let loads = identifiers.iter().map(|id| {
        debug!("fetching declaration {id}");
        source.load(id, options.parse_mode)
    });
    let documents = try_join_all(loads).await?;

    documents
        .into_iter()
        .zip(&identifiers)
        .try_fold(raml, |raml, (document, id)| {
            if document.is_resource_listing() {
                warn!("{id} has no basePath and is not a valid api declaration");
            }
            let declaration = document.into_declaration()?;
            convert_api_declaration(&declaration, raml)
        })
}

async fn fetch_document<F>(
    identifier: &str,
    fetcher: &F,
    mode: ParseMode,
) -> Result<Document, ConvertError>
where
    F: ContentFetcher + ?Sized,
{
    let content = fetcher
        .fetch(identifier)
        .await
        .map_err(|source| ConvertError::Fetch {
            identifier: identifier.to_string(),
            source,
        })?;
    parse(identifier, &content, mode)
}

fn parse(identifier: &str, content: &str, mode: ParseMode) -> Result<Document, ConvertError> {
    parse_document(content, mode).map_err(|source| ConvertError::Document {
        identifier: identifier.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use serde_json::json;

    fn files(entries: &[(&str, serde_json::Value)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(id, doc)| (id.to_string(), doc.to_string()))
            .collect()
    }

    fn listing() -> serde_json::Value {
        json!({
            "swaggerVersion": "1.2",
            "apiVersion": "1.0.0",
            "apis": [{"path": "/pet"}, {"path": "/user"}]
        })
    }

    fn declaration(resource: &str) -> serde_json::Value {
        json!({
            "swaggerVersion": "1.2",
            "apiVersion": "1.0.0",
            "basePath": "http://example.com/api",
            "resourcePath": resource,
            "apis": [{"path": resource, "operations": [{"method": "GET"}]}]
        })
    }

    /// Answers later requests faster, so completion order differs from
    /// request order.
    struct SlowFetcher(IndexMap<String, String>);

    #[async_trait]
    impl ContentFetcher for SlowFetcher {
        async fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
            let position = self.0.get_index_of(identifier).unwrap_or_default();
            let delay = 40_u64.saturating_sub(position as u64 * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.0.fetch(identifier).await
        }
    }

    #[tokio::test]
    async fn test_convert_listing_and_declarations() {
        let fetcher = files(&[
            ("/api-docs", listing()),
            ("/api-docs/pet", declaration("/pet")),
            ("/api-docs/user", declaration("/user")),
        ]);
        let raml = convert("/api-docs", &fetcher).await.unwrap();

        assert_eq!(raml.base_uri.as_deref(), Some("http://example.com/api"));
        let uris: Vec<_> = raml.resources.iter().map(|r| r.relative_uri.as_str()).collect();
        assert_eq!(uris, vec!["/pet", "/user"]);
        assert_eq!(raml.method_count(), 2);
    }

    #[tokio::test]
    async fn test_folds_in_request_order() {
        let fetcher = SlowFetcher(files(&[
            ("/api-docs", listing()),
            ("/api-docs/pet", declaration("/pet")),
            ("/api-docs/user", declaration("/user")),
        ]));
        let raml = convert("/api-docs", &fetcher).await.unwrap();
        let uris: Vec<_> = raml.resources.iter().map(|r| r.relative_uri.as_str()).collect();
        assert_eq!(uris, vec!["/pet", "/user"]);
    }

    #[tokio::test]
    async fn test_lone_declaration() {
        let fetcher = files(&[("pet.json", declaration("/pet"))]);
        let raml = convert("pet.json", &fetcher).await.unwrap();
        assert_eq!(raml.resources.len(), 1);
        assert_eq!(raml.resources[0].methods.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let fetcher = files(&[("/api-docs", listing()), ("/api-docs/pet", declaration("/pet"))]);
        let err = convert("/api-docs", &fetcher).await.unwrap_err();
        assert!(
            matches!(err, ConvertError::Fetch { ref identifier, .. } if identifier == "/api-docs/user")
        );
    }

    #[tokio::test]
    async fn test_version_conflict_between_files() {
        let mut other = declaration("/user");
        other["apiVersion"] = json!("2.0.0");
        let fetcher = files(&[
            ("/api-docs", listing()),
            ("/api-docs/pet", declaration("/pet")),
            ("/api-docs/user", other),
        ]);
        let err = convert("/api-docs", &fetcher).await.unwrap_err();
        assert_eq!(err.to_string(), "the api version has changed: 1.0.0 -> 2.0.0");
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_unversioned() {
        let fetcher = files(&[("/api-docs", json!({"apis": []}))]);
        let err = convert("/api-docs", &fetcher).await.unwrap_err();
        assert!(matches!(err, ConvertError::Document { .. }));

        let options = ConvertOptions {
            parse_mode: ParseMode::Lenient,
            ..ConvertOptions::default()
        };
        let raml = convert_with_options("/api-docs", &fetcher, options).await.unwrap();
        assert!(raml.resources.is_empty());
    }

    #[tokio::test]
    async fn test_files_skip_noise() {
        let mut set = files(&[
            ("docs/api-docs", listing()),
            ("docs/api-docs/pet", declaration("/pet")),
            ("docs/api-docs/user", declaration("/user")),
        ]);
        set.insert("docs/README.md".to_string(), "# Petstore".to_string());

        let raml = convert_files(&set, &IndexMap::<String, String>::new(), ConvertOptions::default())
            .await
            .unwrap();
        assert_eq!(raml.resource_count(), 2);
    }

    #[tokio::test]
    async fn test_files_multiple_listings() {
        let set = files(&[("a", listing()), ("b", listing())]);
        let err = convert_files(&set, &IndexMap::<String, String>::new(), ConvertOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::MultipleListings(ref ids) if ids == &["a", "b"]));
    }

    #[tokio::test]
    async fn test_files_without_listing() {
        let set = files(&[("pet", declaration("/pet")), ("user", declaration("/user"))]);
        let err = convert_files(&set, &IndexMap::<String, String>::new(), ConvertOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoListingFound));

        let single = files(&[("pet", declaration("/pet"))]);
        let raml = convert_files(&single, &IndexMap::<String, String>::new(), ConvertOptions::default())
            .await
            .unwrap();
        assert_eq!(raml.resources[0].relative_uri, "/pet");
    }

    #[tokio::test]
    async fn test_files_fall_back_to_fetcher() {
        let set = files(&[("/api-docs", listing()), ("/api-docs/pet", declaration("/pet"))]);
        let remote = files(&[("/api-docs/user", declaration("/user"))]);
        let raml = convert_files(&set, &remote, ConvertOptions::default())
            .await
            .unwrap();
        assert_eq!(raml.resources.len(), 2);

        let err = convert_files(&set, &IndexMap::<String, String>::new(), ConvertOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingDeclarationFile { ref identifier, source: Some(_) }
                if identifier == "/api-docs/user"
        ));
    }
}
