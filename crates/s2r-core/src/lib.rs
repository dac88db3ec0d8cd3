//! Convert Swagger 1.x resource listings and API declarations into a RAML
//! object graph.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod parse;
pub mod raml;
pub mod transform;
pub mod version;

pub use aggregate::{ContentFetcher, ConvertOptions, convert, convert_files, convert_with_options};
pub use error::{ConvertError, FetchError, ParseError};
pub use parse::{Document, ParseMode, SwaggerDocument, parse_document};
pub use raml::RamlObject;
pub use transform::{convert_api_declaration, convert_resource_listing, resolve};
