pub mod data_type;
pub mod declaration;
pub mod listing;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConvertError, ParseError};
use crate::transform;
use crate::version::{self, is_truthy};
use declaration::ApiDeclaration;
use listing::ResourceListing;

/// How strictly raw documents are checked before conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Require a top-level `swaggerVersion` or `swagger` field.
    #[default]
    Strict,
    /// Accept any JSON object, for older documents without a version marker.
    Lenient,
}

/// A parsed Swagger document that has not been classified yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    value: Value,
}

/// A document classified as either a resource listing or an API declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum SwaggerDocument {
    Listing(ResourceListing),
    Declaration(ApiDeclaration),
}

/// Parse raw text into a [`Document`].
pub fn parse_document(input: &str, mode: ParseMode) -> Result<Document, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(ParseError::NotAnObject);
    }
    let has_version = value.get("swaggerVersion").is_some() || value.get("swagger").is_some();
    if mode == ParseMode::Strict && !has_version {
        return Err(ParseError::MissingVersionField);
    }
    Ok(Document { value })
}

/// Parse a resource listing from JSON without classification.
pub fn listing_from_json(input: &str) -> Result<ResourceListing, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse an API declaration from JSON without classification.
pub fn declaration_from_json(input: &str) -> Result<ApiDeclaration, ParseError> {
    Ok(serde_json::from_str(input)?)
}

impl Document {
    /// A document without a `basePath` is a resource listing. A declaration
    /// that forgot its `basePath` is misread as a listing; nothing in the
    /// documents themselves tells the two apart.
    pub fn is_resource_listing(&self) -> bool {
        !self.value.get("basePath").is_some_and(is_truthy)
    }

    pub fn swagger_version(&self) -> Option<f64> {
        version::detect_version(&self.value)
    }

    /// Fail with `UnsupportedVersion` for Swagger 2.0 and later.
    pub fn check_version(&self) -> Result<(), ConvertError> {
        transform::ensure_supported(self.swagger_version())
    }

    /// Read the document as a resource listing regardless of its shape.
    pub fn into_listing(self) -> Result<ResourceListing, ConvertError> {
        self.check_version()?;
        Ok(serde_json::from_value(self.value).map_err(ParseError::from)?)
    }

    /// Read the document as an API declaration regardless of its shape.
    pub fn into_declaration(self) -> Result<ApiDeclaration, ConvertError> {
        self.check_version()?;
        Ok(serde_json::from_value(self.value).map_err(ParseError::from)?)
    }

    /// Reject unsupported versions, then read the document into the typed
    /// model matching its kind.
    pub fn classify(self) -> Result<SwaggerDocument, ConvertError> {
        if self.is_resource_listing() {
            self.into_listing().map(SwaggerDocument::Listing)
        } else {
            self.into_declaration().map(SwaggerDocument::Declaration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_requires_version_field() {
        let err = parse_document(r#"{"apis": []}"#, ParseMode::Strict).unwrap_err();
        assert!(matches!(err, ParseError::MissingVersionField));
    }

    #[test]
    fn test_lenient_skips_version_field() {
        let doc = parse_document(r#"{"apis": []}"#, ParseMode::Lenient).unwrap();
        assert!(doc.is_resource_listing());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_document("{not json", ParseMode::Lenient).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = parse_document("[1, 2]", ParseMode::Lenient).unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn test_classify_by_base_path() {
        let listing = parse_document(r#"{"swaggerVersion": "1.2", "apis": []}"#, ParseMode::Strict)
            .unwrap()
            .classify()
            .unwrap();
        assert!(matches!(listing, SwaggerDocument::Listing(_)));

        let declaration = parse_document(
            r#"{"swaggerVersion": "1.2", "basePath": "http://example.com", "apis": []}"#,
            ParseMode::Strict,
        )
        .unwrap()
        .classify()
        .unwrap();
        assert!(matches!(declaration, SwaggerDocument::Declaration(_)));
    }

    #[test]
    fn test_classify_rejects_swagger_two() {
        let doc = parse_document(
            r#"{"swagger": "2.0", "info": {"contact": {"name": "x"}}}"#,
            ParseMode::Strict,
        )
        .unwrap();
        let err = doc.classify().unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedVersion(v) if v == 2.0));
    }
}
