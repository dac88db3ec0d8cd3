use thiserror::Error;

/// Error produced by a [`ContentFetcher`](crate::aggregate::ContentFetcher).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing `swaggerVersion` or `swagger` field")]
    MissingVersionField,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Swagger {0:.1} is not supported")]
    UnsupportedVersion(f64),

    #[error(
        "must be a valid resource listing: \
         https://github.com/wordnik/swagger-spec/blob/master/versions/1.2.md#51-resource-listing"
    )]
    InvalidResourceListing,

    #[error(
        "must be a valid api declaration: \
         https://github.com/wordnik/swagger-spec/blob/master/versions/1.2.md#52-api-declaration"
    )]
    InvalidDeclaration,

    #[error("the api version has changed: {current} -> {incoming}")]
    VersionConflict { current: String, incoming: String },

    #[error("the base uri has changed: {current} -> {incoming}")]
    BasePathConflict { current: String, incoming: String },

    #[error("found {0} parameters for body type, expected at most one")]
    MultipleBodyParameters(usize),

    #[error("expected the operation to have a method defined")]
    MissingMethod,

    #[error("failed to serialize schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("found multiple resource listings: {}", .0.join(", "))]
    MultipleListings(Vec<String>),

    #[error("no resource listing found")]
    NoListingFound,

    #[error("missing api declaration file: {identifier}")]
    MissingDeclarationFile {
        identifier: String,
        #[source]
        source: Option<FetchError>,
    },

    #[error("failed to parse {identifier}: {source}")]
    Document {
        identifier: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to fetch {identifier}: {source}")]
    Fetch {
        identifier: String,
        #[source]
        source: FetchError,
    },
}
