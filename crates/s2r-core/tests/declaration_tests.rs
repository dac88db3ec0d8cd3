use s2r_core::parse::declaration_from_json;
use s2r_core::raml::{BodyContent, RamlObject, RamlType};
use s2r_core::{ConvertError, convert_api_declaration};

const USER_DECLARATION: &str = include_str!("fixtures/user-declaration.json");
const USER_EXPECTED: &str = include_str!("fixtures/user-declaration.raml.json");
const PET: &str = include_str!("fixtures/pet.json");
const USER: &str = include_str!("fixtures/user.json");

fn convert(input: &str) -> RamlObject {
    let declaration = declaration_from_json(input).expect("should parse declaration");
    convert_api_declaration(&declaration, RamlObject::default()).expect("should convert")
}

#[test]
fn convert_user_declaration() {
    let raml = convert(USER_DECLARATION);
    let actual = serde_json::to_value(&raml).unwrap();
    let expected: serde_json::Value = serde_json::from_str(USER_EXPECTED).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn convert_pet_declaration() {
    let raml = convert(PET);
    assert_eq!(raml.base_uri.as_deref(), Some("http://petstore.swagger.wordnik.com/api"));
    assert_eq!(raml.resources.len(), 1);

    let pet = &raml.resources[0];
    assert_eq!(pet.relative_uri, "/pet");
    let children: Vec<_> = pet.resources.iter().map(|r| r.relative_uri.as_str()).collect();
    assert_eq!(children, vec!["/{petId}", "/{petId}/uploadImage", "/findByStatus"]);
    assert_eq!(raml.method_count(), 5);
}

#[test]
fn pet_path_parameters_follow_last_operation() {
    let raml = convert(PET);
    let by_id = &raml.resources[0].resources[0];

    let uri = by_id.uri_parameters.as_ref().expect("should have uri parameters");
    assert_eq!(uri["petId"].param_type, Some(RamlType::String));
    assert_eq!(uri["petId"].description.as_deref(), Some("Pet id to delete"));
}

#[test]
fn pet_get_by_id_responses() {
    let raml = convert(PET);
    let get = &raml.resources[0].resources[0].methods[0];
    assert_eq!(get.display_name.as_deref(), Some("getPetById"));
    assert_eq!(get.description.as_deref(), Some("Returns a pet based on ID"));

    let responses = get.responses.as_ref().unwrap();
    let ok = responses["200"].body.as_ref().unwrap();
    let Some(BodyContent::Schema { schema }) = &ok["application/json"] else {
        panic!("expected a JSON schema for the 200 response");
    };
    let schema: serde_json::Value = serde_json::from_str(schema).unwrap();
    assert_eq!(schema["properties"]["tags"]["items"]["properties"]["name"]["type"], "string");
    assert_eq!(schema["properties"]["id"]["minimum"], "0.0");
    assert_eq!(ok["application/xml"], None);
    assert_eq!(responses["404"].body.as_ref().unwrap()["application/json"], None);
}

#[test]
fn pet_form_bodies() {
    let raml = convert(PET);
    let by_id = &raml.resources[0].resources[0];

    let update = &by_id.methods[1];
    let body = update.body.as_ref().unwrap();
    assert_eq!(
        body.keys().collect::<Vec<_>>(),
        vec!["application/x-www-form-urlencoded"]
    );

    let upload = &raml.resources[0].resources[1].methods[0];
    let body = upload.body.as_ref().unwrap();
    let Some(BodyContent::Form { form_parameters }) = &body["multipart/form-data"] else {
        panic!("expected multipart form parameters");
    };
    assert_eq!(form_parameters["file"].param_type, Some(RamlType::File));
}

#[test]
fn pet_deprecated_delete() {
    let raml = convert(PET);
    let delete = &raml.resources[0].resources[0].methods[2];
    assert_eq!(
        delete.description.as_deref(),
        Some("Deletes a pet\n\nThis method has been deprecated.")
    );
}

#[test]
fn pet_query_parameters() {
    let raml = convert(PET);
    let find = &raml.resources[0].resources[2].methods[0];
    let query = find.query_parameters.as_ref().unwrap();
    let status = &query["status"];
    assert_eq!(status.default, Some(serde_json::json!("available")));
    assert_eq!(status.enum_values.as_ref().map(Vec::len), Some(3));
    assert_eq!(status.required, Some(true));
}

#[test]
fn user_dotted_parameter_is_camel_cased() {
    let raml = convert(USER);
    let by_name = &raml.resources[0].resources[0];
    assert_eq!(by_name.relative_uri, "/{userName}");

    let keys: Vec<_> = by_name.uri_parameters.as_ref().unwrap().keys().collect();
    assert_eq!(keys, vec!["userName"]);
}

#[test]
fn merge_pet_and_user() {
    let pet = declaration_from_json(PET).unwrap();
    let user = declaration_from_json(USER).unwrap();

    let raml = convert_api_declaration(&pet, RamlObject::default()).unwrap();
    let raml = convert_api_declaration(&user, raml).unwrap();

    let uris: Vec<_> = raml.resources.iter().map(|r| r.relative_uri.as_str()).collect();
    assert_eq!(uris, vec!["/pet", "/user"]);
}

#[test]
fn conflicting_base_path() {
    let pet = declaration_from_json(PET).unwrap();
    let mut other = declaration_from_json(USER).unwrap();
    other.base_path = Some("http://other.example.com/api".to_string());

    let raml = convert_api_declaration(&pet, RamlObject::default()).unwrap();
    let err = convert_api_declaration(&other, raml).unwrap_err();
    assert!(matches!(err, ConvertError::BasePathConflict { .. }));
}

#[test]
fn user_by_name_resource_shape() {
    let raml = convert(USER);
    let by_name = &raml.resources[0].resources[0];
    assert_eq!(
        serde_json::to_value(by_name).unwrap(),
        serde_json::json!({
            "relativeUri": "/{userName}",
            "uriParameters": {
                "userName": {
                    "type": "string",
                    "description": "The name that needs to be fetched. Use user1 for testing.",
                    "required": true
                }
            },
            "methods": [{
                "method": "GET",
                "displayName": "getUserByName",
                "description": "Get user by user name",
                "responses": {
                    "404": {
                        "description": "User not found",
                        "body": {"application/json": null}
                    }
                }
            }]
        })
    );
}
