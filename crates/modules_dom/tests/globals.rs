use std::rc::Rc;

use modules_dom::{RuntimeError, ShimRuntime, Surface};
use serde_json::{Value, json};
use shim_core::{Call, FixtureBridge, HostFixture, Operation};

fn page() -> HostFixture {
    HostFixture::default()
        .with_selector("div", [json!(101), json!(102)])
        .with_attribute(json!(101), "class", "active")
}

fn start(fixture: HostFixture, surface: Surface) -> (Rc<FixtureBridge>, ShimRuntime) {
    let bridge = Rc::new(FixtureBridge::new(fixture));
    let runtime = ShimRuntime::new(bridge.clone(), surface).expect("start runtime");
    (bridge, runtime)
}

fn run(runtime: &mut ShimRuntime, source: &str) {
    runtime
        .execute("test.js", source.to_string())
        .expect("script should run");
}

#[test]
fn query_selector_all_returns_nodes_in_host_order() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(
        &mut runtime,
        r#"
        const nodes = document.querySelectorAll("div");
        console.log(nodes.length);
        console.log(nodes.map((n) => n.handle));
        console.log(nodes.every((n) => n instanceof Node));
        "#,
    );

    assert_eq!(bridge.logs(), vec![json!(2), json!([101, 102]), json!(true)]);
}

#[test]
fn missing_selector_yields_empty_array() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(
        &mut runtime,
        r#"console.log(document.querySelectorAll("missing"));"#,
    );

    assert_eq!(bridge.logs(), vec![json!([])]);
    assert_eq!(
        bridge.calls()[0],
        Call::QuerySelectorAll(json!("missing"))
    );
}

#[test]
fn get_attribute_goes_through_the_host() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(
        &mut runtime,
        r#"
        const [first, second] = document.querySelectorAll("div");
        console.log(first.getAttribute("class"));
        console.log(second.getAttribute("class"));
        "#,
    );

    assert_eq!(bridge.logs(), vec![json!("active"), Value::Null]);
    assert_eq!(
        bridge.calls(),
        vec![
            Call::QuerySelectorAll(json!("div")),
            Call::GetAttribute(json!(101), json!("class")),
            Call::Log(json!("active")),
            Call::GetAttribute(json!(102), json!("class")),
            Call::Log(Value::Null),
        ]
    );
}

#[test]
fn non_string_arguments_reach_the_host_unchanged() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(
        &mut runtime,
        r#"
        console.log(document.querySelectorAll(5));
        console.log(new Node(101).getAttribute());
        "#,
    );

    assert_eq!(bridge.logs(), vec![json!([]), Value::Null]);
    assert_eq!(
        bridge.calls(),
        vec![
            Call::QuerySelectorAll(json!(5)),
            Call::Log(json!([])),
            Call::GetAttribute(json!(101), Value::Null),
            Call::Log(Value::Null),
        ]
    );
}

#[test]
fn hand_built_nodes_forward_their_handle() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(
        &mut runtime,
        r#"console.log(new Node(101).getAttribute("class"));"#,
    );

    assert_eq!(bridge.logs(), vec![json!("active")]);
}

#[test]
fn log_passes_structured_values() {
    let (bridge, mut runtime) = start(HostFixture::default(), Surface::Full);
    run(&mut runtime, r#"console.log({ tag: "p", ids: [1, "two"] });"#);

    assert_eq!(bridge.logs(), vec![json!({"tag": "p", "ids": [1, "two"]})]);
}

#[test]
fn query_only_surface_has_no_get_attribute() {
    let (bridge, mut runtime) = start(page(), Surface::QueryOnly);
    assert_eq!(runtime.surface(), Surface::QueryOnly);
    run(
        &mut runtime,
        r#"
        const nodes = document.querySelectorAll("div");
        console.log(nodes.map((n) => n.handle));
        console.log(typeof nodes[0].getAttribute);
        "#,
    );

    assert_eq!(bridge.logs(), vec![json!([101, 102]), json!("undefined")]);
}

#[test]
fn host_errors_reach_script_code() {
    let fixture = page().with_failure(Operation::GetAttribute, "attribute store offline");
    let (bridge, mut runtime) = start(fixture, Surface::Full);
    run(
        &mut runtime,
        r#"
        try {
          document.querySelectorAll("div")[0].getAttribute("class");
        } catch (err) {
          console.log(err.message);
        }
        "#,
    );

    assert_eq!(bridge.logs(), vec![json!("attribute store offline")]);
}

#[test]
fn uncaught_host_errors_fail_the_script() {
    let fixture = page().with_failure(Operation::QuerySelectorAll, "document unloaded");
    let (_bridge, mut runtime) = start(fixture, Surface::Full);

    let err = runtime
        .execute("page.js", r#"document.querySelectorAll("div");"#.to_string())
        .unwrap_err();
    match err {
        RuntimeError::Script { name, message } => {
            assert_eq!(name, "page.js");
            assert!(message.contains("document unloaded"), "got: {}", message);
        }
        other => panic!("expected script error, got: {:?}", other),
    }
}

#[test]
fn globals_persist_across_scripts() {
    let (bridge, mut runtime) = start(page(), Surface::Full);
    run(&mut runtime, r#"globalThis.found = document.querySelectorAll("div");"#);
    run(&mut runtime, r#"console.log(found.length);"#);

    assert_eq!(bridge.logs(), vec![json!(2)]);
}
