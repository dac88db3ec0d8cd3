use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::parse::ParseMode;

/// Top-level project configuration loaded from `.s2r.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct S2rConfig {
    /// Resource listing, declaration, URL or directory to convert when the
    /// command line names none.
    pub input: Option<String>,
    pub output: OutputConfig,
    pub parser: ParserConfig,
    pub fetch: FetchConfig,
}

/// How the RAML object is printed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON output. YAML is always block style.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: ParseMode,
}

/// Options for the content fetcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout for remote documents. No timeout when unset.
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate verification for remote documents.
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            accept_invalid_certs: true,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".s2r.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<S2rConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: S2rConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# s2r configuration
# input: api-docs         # resource listing, declaration, URL or directory

output:
  format: json           # json | yaml
  pretty: true

parser:
  mode: strict           # strict | lenient (lenient accepts documents without swaggerVersion)

fetch:
  # timeout_secs: 30
  accept_invalid_certs: true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = S2rConfig::default();
        assert_eq!(config.input, None);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert_eq!(config.parser.mode, ParseMode::Strict);
        assert_eq!(config.fetch.timeout_secs, None);
        assert!(config.fetch.accept_invalid_certs);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: http://petstore.example.com/api/api-docs
output:
  format: yaml
  pretty: false
parser:
  mode: lenient
fetch:
  timeout_secs: 10
  accept_invalid_certs: false
"#;
        let config: S2rConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            config.input.as_deref(),
            Some("http://petstore.example.com/api/api-docs")
        );
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(!config.output.pretty);
        assert_eq!(config.parser.mode, ParseMode::Lenient);
        assert_eq!(config.fetch.timeout_secs, Some(10));
        assert!(!config.fetch.accept_invalid_certs);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "input: docs/\n";
        let config: S2rConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input.as_deref(), Some("docs/"));
        // Defaults applied
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.fetch.accept_invalid_certs);
    }

    #[test]
    fn test_default_content_parses() {
        let config: S2rConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.input, None);
        assert_eq!(config.parser.mode, ParseMode::Strict);
    }

    #[test]
    fn test_load_missing_config() {
        let path = Path::new("definitely/not/here/.s2r.yaml");
        assert!(load_config(path).unwrap().is_none());
    }
}
