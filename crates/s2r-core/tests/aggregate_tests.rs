use indexmap::IndexMap;
use s2r_core::raml::RamlObject;
use s2r_core::{ConvertError, ConvertOptions, convert, convert_files, convert_with_options};

const API_DOCS: &str = include_str!("fixtures/api-docs.json");
const PET: &str = include_str!("fixtures/pet.json");
const USER: &str = include_str!("fixtures/user.json");

fn remote_petstore() -> IndexMap<String, String> {
    let base = "http://petstore.swagger.wordnik.com/api/api-docs";
    IndexMap::from([
        (base.to_string(), API_DOCS.to_string()),
        (format!("{base}/pet"), PET.to_string()),
        (format!("{base}/user"), USER.to_string()),
    ])
}

#[tokio::test]
async fn convert_remote_petstore() {
    let fetcher = remote_petstore();
    let raml = convert("http://petstore.swagger.wordnik.com/api/api-docs", &fetcher)
        .await
        .expect("should convert petstore");

    assert_eq!(raml.title.as_deref(), Some("Swagger Sample App"));
    assert_eq!(raml.base_uri.as_deref(), Some("http://petstore.swagger.wordnik.com/api"));
    assert_eq!(raml.security_schemes.len(), 2);

    let pet = &raml.resources[0];
    assert_eq!(pet.relative_uri, "/pet");
    // The stub description survives the fold.
    assert_eq!(pet.description.as_deref(), Some("Operations about pets"));
    assert_eq!(pet.resources.len(), 3);

    let user = &raml.resources[1];
    assert_eq!(user.relative_uri, "/user");
    assert_eq!(user.resources[0].relative_uri, "/{userName}");
    assert_eq!(raml.method_count(), 7);
}

#[tokio::test]
async fn convert_with_seed() {
    let fetcher = remote_petstore();
    let options = ConvertOptions {
        seed: RamlObject {
            base_uri: Some("http://elsewhere.example.com".to_string()),
            ..RamlObject::default()
        },
        ..ConvertOptions::default()
    };
    let err = convert_with_options(
        "http://petstore.swagger.wordnik.com/api/api-docs",
        &fetcher,
        options,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ConvertError::BasePathConflict { .. }));
}

#[tokio::test]
async fn convert_missing_root() {
    let fetcher = IndexMap::<String, String>::new();
    let err = convert("api-docs", &fetcher).await.unwrap_err();
    assert!(matches!(err, ConvertError::Fetch { ref identifier, .. } if identifier == "api-docs"));
}

#[tokio::test]
async fn convert_directory_set() {
    let files = IndexMap::from([
        ("docs/README.md".to_string(), "Petstore dump".to_string()),
        ("docs/api-docs".to_string(), API_DOCS.to_string()),
        ("docs/api-docs/pet".to_string(), PET.to_string()),
        ("docs/api-docs/user".to_string(), USER.to_string()),
    ]);
    let raml = convert_files(&files, &IndexMap::<String, String>::new(), ConvertOptions::default())
        .await
        .expect("should convert file set");

    assert_eq!(raml.resources.len(), 2);
    assert_eq!(raml.method_count(), 7);
}

#[tokio::test]
async fn convert_directory_missing_declaration() {
    let files = IndexMap::from([
        ("docs/api-docs".to_string(), API_DOCS.to_string()),
        ("docs/api-docs/pet".to_string(), PET.to_string()),
    ]);
    let err = convert_files(&files, &IndexMap::<String, String>::new(), ConvertOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "missing api declaration file: docs/api-docs/user");
}
