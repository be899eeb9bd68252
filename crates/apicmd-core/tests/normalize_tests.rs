use apicmd_core::model::HttpMethod;
use apicmd_core::transform::name_normalizer::{
    PLACEHOLDER_NAME, route_to_name, to_camel, to_env_prefix, to_kebab, trim_description,
};
use apicmd_core::transform::{NameConvention, UniqueNameAllocator};

#[test]
fn test_operation_ids() {
    assert_eq!(to_camel("listPets"), "listPets");
    assert_eq!(to_camel("list_pets"), "listPets");
    assert_eq!(to_camel("ListPets"), "listPets");
    assert_eq!(to_camel("pets.list"), "petsList");
}

#[test]
fn test_parameter_names() {
    assert_eq!(to_kebab("X-Request-ID"), "x-request-id");
    assert_eq!(to_kebab("pageSize"), "page-size");
    assert_eq!(to_kebab("filter[name]"), "filter-name");
    assert_eq!(to_kebab("名前"), PLACEHOLDER_NAME);
}

#[test]
fn test_route_names() {
    assert_eq!(route_to_name(HttpMethod::Get, "/pets/{id}"), "getPetsId");
    assert_eq!(route_to_name(HttpMethod::Put, "/v2/users/{user_id}/avatar"), "putV2UsersUserIdAvatar");
}

#[test]
fn test_env_prefix() {
    assert_eq!(to_env_prefix("petstore"), "PETSTORE");
    assert_eq!(to_env_prefix("pet-store-cli"), "PET_STORE_CLI");
}

#[test]
fn test_trim_description() {
    assert_eq!(trim_description("Find pets.\n\nLonger text."), "Find pets....");
    assert_eq!(trim_description("Find pets."), "Find pets.");
}

#[test]
fn test_program_and_command_scopes() {
    let mut program = UniqueNameAllocator::new(NameConvention::Camel, ["help"]);
    assert_eq!(program.allocate("pets"), "pets");
    assert_eq!(program.allocate("pets"), "pets1");

    let mut first = UniqueNameAllocator::new(NameConvention::Kebab, ["s", "server"]);
    let mut second = UniqueNameAllocator::new(NameConvention::Kebab, ["s", "server"]);
    assert_eq!(first.allocate("status"), "status");
    assert_eq!(second.allocate("status"), "status");
    assert_eq!(first.allocate("server"), "server1");
}

#[test]
fn test_route_name_snapshot() {
    insta::assert_snapshot!(
        route_to_name(HttpMethod::Delete, "/store/order/{orderId}"),
        @"deleteStoreOrderOrderId"
    );
}
