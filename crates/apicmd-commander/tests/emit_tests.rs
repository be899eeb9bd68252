use apicmd_core::model::Program;
use apicmd_core::{CodeGenerator, parse, transform};
use apicmd_commander::{CommanderGenerator, GenerateError};

const PETSTORE: &str = include_str!("../../apicmd-core/tests/fixtures/petstore.yaml");
const QUERY_PARAMS: &str = include_str!("../../apicmd-core/tests/fixtures/query-params.yaml");
const CONTENT_TYPES: &str = include_str!("../../apicmd-core/tests/fixtures/content-types.yaml");

fn build(yaml: &str, name: &str) -> Program {
    let spec = parse::from_yaml(yaml).unwrap();
    let resolved = parse::resolve(&spec).unwrap();
    transform::build(&resolved, name).unwrap()
}

fn generate(yaml: &str, name: &str) -> String {
    CommanderGenerator.generate(&build(yaml, name)).unwrap()
}

#[test]
fn scenario_a_group_command_and_action() {
    let js = generate(PETSTORE, "petstore");
    assert!(js.contains("/* ============== pets ============== */\nconst pets = program.command('pets')\n"));
    assert!(js.contains("\npets.command('getPetById')\n"));
    assert!(js.contains("  .addArgument(new Argument('<id>', 'The id of the pet to retrieve'))\n"));
    assert!(js.contains(
        "  .action(async (id, options) => {\n    const req = emptyRequestParams()\n    req.pathParams['id'] = id\n    await request('GET', defaultServer, '/pets/{id}', req)\n  })"
    ));
}

#[test]
fn scenario_b_exploded_array_option() {
    let js = generate(QUERY_PARAMS, "search");
    assert!(js.contains(
        "  .addOption(new Option('-t, --tags <tags>', 'Comma-separated list. Tags to filter by').argParser(v => v.split(',')))\n"
    ));
    assert!(js.contains(
        "    if (options['tags'] !== undefined) {\n      for (const v of options['tags']) {\n        req.queryParams.push(['tags', v])\n      }\n    }\n"
    ));
    assert!(js.contains("      req.queryParams.push(['ids', options['ids'].join(',')])\n"));
    assert!(js.contains("    req.headers['X-Request-ID'] = xRequestId\n"));
    assert!(js.contains("      req.cookies['session'] = options['session']\n"));
}

#[test]
fn scenario_c_body_and_content_type() {
    let js = generate(CONTENT_TYPES, "bodies");
    assert!(js.contains("  .addArgument(new Argument('<body>', 'File containing the request body'))\n"));
    assert!(js.contains(
        "  .addOption(new Option('--body-type <type>', 'Content type of the request body (default: application/json)').choices(['application/json', 'application/xml']))\n"
    ));
    assert!(js.contains(
        "      const contentType = options['bodyType'] || 'application/json'\n"
    ));
    assert!(js.contains("      const contentType = 'text/plain'\n"));
    assert!(js.contains("      const contentType = bodyType\n"));
}

#[test]
fn scenario_d_suffixed_command() {
    let js = generate(PETSTORE, "petstore");
    assert!(js.contains("\nprogram.command('health')\n"));
    assert!(js.contains("\nprogram.command('health1')\n"));
}

#[test]
fn transport_headers_not_emitted() {
    let js = generate(PETSTORE, "petstore");
    assert!(!js.contains("req.headers['Accept']"));
    assert!(!js.contains("req.headers['Authorization']"));
    let search = generate(QUERY_PARAMS, "search");
    assert!(!search.contains("req.headers['Content-Type'] = options"));
}

#[test]
fn examples_subcommand() {
    let js = generate(PETSTORE, "petstore");
    assert!(js.contains("const createPet = pets.command('createPet')\n"));
    assert!(js.contains("\ncreatePet.command('examples')\n"));
    assert!(js.contains("printExamples({\"application/json\":[\"{\\n  \\\"name\\\": \\\"doggie\\\""));
    assert!(!js.contains("getPetById.command('examples')"));
}

#[test]
fn group_order_and_metadata() {
    let js = generate(PETSTORE, "petstore");
    let store = js.find("const store = program.command('store')").unwrap();
    let pets = js.find("const pets = program.command('pets')").unwrap();
    let users = js.find("const users = program.command('users')").unwrap();
    assert!(store < pets && pets < users);
    assert!(js.contains("  .summary('Access to orders....')\n"));
    assert!(js.contains(
        "const pets = program.command('pets')\n  .description('Everything about your pets')\n"
    ));
    assert!(js.contains("\nconst defaultServer = 'https://petstore.example.com/v1'\n"));
    assert!(js.contains(".env('PETSTORE_SERVER')"));
    assert!(js.contains("  .summary('*DEPRECATED* Delete a pet')\n") || js.contains("  .description('*DEPRECATED* Delete a pet')\n"));
}

#[test]
fn generation_is_deterministic() {
    for (yaml, name) in [(PETSTORE, "petstore"), (QUERY_PARAMS, "search"), (CONTENT_TYPES, "bodies")] {
        assert_eq!(generate(yaml, name), generate(yaml, name));
    }
}

#[test]
fn untrusted_text_is_escaped() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: Evil
  version: "1"
  description: "it's a \\ test\nsecond line"
servers:
  - url: "https://example.com/'quoted'"
tags:
  - name: "bad */ tag"
paths:
  /x:
    get:
      operationId: evil
      tags: ["bad */ tag"]
      summary: "say 'hi'"
      parameters:
        - name: "it's"
          in: query
          description: "multi\nline"
          schema: {type: string}
"#;
    let js = generate(yaml, "evil */");
    assert!(js.contains("/* evil *\\/: generated by apicmd, do not edit. */"));
    assert!(js.contains("  .name('evil */')\n"));
    assert!(js.contains(".env('EVIL_DEBUG')"));
    assert!(js.contains("const badTag = program.command('badTag')"));
    assert!(js.contains("program.description('it\\'s a \\\\ test\\nsecond line')"));
    assert!(js.contains("const defaultServer = 'https://example.com/\\'quoted\\''"));
    assert!(js.contains(".description('say \\'hi\\'')"));
    assert!(js.contains("new Option('-i, --it-s <it-s>', 'multi\\nline')"));
    assert!(js.contains("req.queryParams.push(['it\\'s', options['itS']])"));
}

#[test]
fn negated_looking_options_are_renamed() {
    let js = generate(
        r#"
openapi: 3.0.3
info: {title: Cache, version: "1"}
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - {name: no-cache, in: query, schema: {type: boolean}}
"#,
        "cache",
    );
    assert!(js.contains("new Option('-p, --param-no-cache <param-no-cache>', '')"));
    assert!(js.contains("if (options['paramNoCache'] !== undefined) {"));
    assert!(js.contains("req.queryParams.push(['no-cache', options['paramNoCache']])"));
    assert!(!js.contains("--no-cache"));
}

#[test]
fn unknown_location_in_model_is_fatal() {
    let mut program = build(QUERY_PARAMS, "search");
    let spec = parse::from_yaml(QUERY_PARAMS).unwrap();
    let search = spec.paths["/pets/search"].get.as_ref().unwrap();
    let apicmd_core::parse::parameter::ParameterOrRef::Parameter(trace) = &search.parameters[5] else {
        panic!("trace should be inline");
    };

    let apicmd_core::model::CommandEntry::Command(cmd) = &mut program.commands[0] else {
        panic!("searchPets should be a root command");
    };
    cmd.arguments[0].mapping = apicmd_core::model::ArgumentMapping::Parameter(trace.clone());

    let err = CommanderGenerator.generate(&program).unwrap_err();
    assert!(matches!(err, GenerateError::Command { .. }));
    assert_eq!(
        err.to_string(),
        "command searchPets (GET /pets/search): parameter 'trace' has an unknown location"
    );
}
