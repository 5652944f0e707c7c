use insta::assert_snapshot;
use sort_class_members::diagnostics::Diagnostic;
use sort_class_members::lint::LintSettings;
use sort_class_members::order::RuleOptions;
use sort_class_members::parser::Dialect;
use sort_class_members::{LintEngine, create_default_engine, create_engine};

fn format_diags(diags: &[Diagnostic]) -> String {
    let mut lines: Vec<String> = diags
        .iter()
        .map(|d| {
            format!(
                "{}:{}:{}: {}: {}",
                d.lint.name,
                d.span.start.row,
                d.span.start.column,
                d.level.as_str(),
                d.message
            )
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

fn engine_with(options: &str) -> LintEngine {
    let options = RuleOptions::from_json(options).expect("options should parse");
    create_engine(&options, LintSettings::default()).expect("engine")
}

fn lint(engine: &LintEngine, src: &str) -> String {
    let diags = engine.lint_source(src).expect("linting should succeed");
    format_diags(&diags)
}

const CTOR_LAST_ORDER: &str = r#"{ "order": ["[static-properties]", "[static-methods]", "[properties]", "constructor", "[methods]"] }"#;

#[test]
fn recommended_order_accepts_well_ordered_classes() {
    let engine = create_default_engine().expect("engine");
    for src in [
        "class Foo {}",
        "class Foo { static beforeCtor(){} constructor(){} }",
        "class Foo { static beforeCtor(){} constructor(){} afterCtor(){} }",
        "class Foo { static bar = 1; constructor(){} }",
        "class Foo { bar = 1; constructor(){} }",
        "class Foo { constructor(){} afterCtor(){} }",
        "class Foo { constructor(){} afterCtor(){} other(){} }",
        include_str!("fixtures/well_ordered.ts"),
    ] {
        assert_eq!(lint(&engine, src), "", "unexpected diagnostics for {src}");
    }
}

#[test]
fn static_method_after_constructor() {
    let engine = engine_with(CTOR_LAST_ORDER);
    assert_snapshot!(
        lint(&engine, "class Foo { constructor(){} static beforeCtor(){} }"),
        @"sort_class_members:1:29: warning: Expected static method beforeCtor to come before constructor."
    );
}

#[test]
fn conventional_private_methods_go_last() {
    let engine = create_default_engine().expect("engine");
    assert_snapshot!(
        lint(&engine, "class Foo { constructor(){} _other(){} afterCtor(){} }"),
        @"sort_class_members:1:40: warning: Expected method afterCtor to come before method _other."
    );
    assert_snapshot!(
        lint(&engine, "class Foo { _afterCtor(){} constructor(){} }"),
        @"sort_class_members:1:28: warning: Expected constructor to come before method _afterCtor."
    );
}

#[test]
fn properties_before_constructor() {
    let engine = create_default_engine().expect("engine");
    assert_snapshot!(
        lint(&engine, "class Foo { constructor(){} bar; }"),
        @"sort_class_members:1:29: warning: Expected property bar to come before constructor."
    );
}

#[test]
fn every_out_of_order_pair_is_reported() {
    let engine = engine_with(r#"{ "order": ["a", "b", "c"] }"#);
    assert_snapshot!(
        lint(&engine, "class Foo { b(){} c(){} a(){} }"),
        @r"
    sort_class_members:1:25: warning: Expected method a to come before method b.
    sort_class_members:1:25: warning: Expected method a to come before method c.
    "
    );
}

#[test]
fn stop_after_first_problem_summarizes_the_rest() {
    let engine = engine_with(r#"{ "order": ["a", "b", "c"], "stopAfterFirstProblem": true }"#);
    assert_snapshot!(
        lint(&engine, "class Foo { b(){} c(){} a(){} }"),
        @"sort_class_members:1:25: warning: Expected method a to come before method b. (1 similar problem in this class)"
    );
}

#[test]
fn setter_before_getter_is_flagged() {
    let engine = engine_with(r#"{ "accessorPairPositioning": "getThenSet" }"#);
    assert_snapshot!(
        lint(&engine, "class Temp {\n  set value(v) {}\n  get value() { return 1; }\n}\n"),
        @"sort_class_members:3:3: warning: Expected getter value to come immediately before setter value."
    );
}

#[test]
fn split_accessor_pair_is_flagged() {
    let engine = create_default_engine().expect("engine");
    assert_snapshot!(
        lint(
            &engine,
            "class Temp {\n  get value() { return 1; }\n  reset() {}\n  set value(v) {}\n}\n"
        ),
        @"sort_class_members:4:3: warning: Expected setter value to come immediately after getter value."
    );
}

#[test]
fn alphabetical_group_orders_by_name() {
    let engine = engine_with(
        r#"{
            "order": ["[constructor]", "[methods]"],
            "groups": { "methods": [{ "type": "method", "sort": "alphabetical" }] }
        }"#,
    );
    assert_snapshot!(
        lint(
            &engine,
            "class Foo {\n  constructor() {}\n  b() {}\n  a() {}\n  c() {}\n}\n"
        ),
        @"sort_class_members:4:3: warning: Expected method a to come before method b."
    );
}

#[test]
fn locale_comparison_ignores_case() {
    let src = "class Foo { a(){} B(){} }";

    let codepoint = engine_with(r#"{ "order": [{ "type": "method", "sort": "alphabetical" }] }"#);
    assert_snapshot!(
        lint(&codepoint, src),
        @"sort_class_members:1:19: warning: Expected method B to come before method a."
    );

    let localized = engine_with(
        r#"{ "order": [{ "type": "method", "sort": "alphabetical" }], "locale": "en" }"#,
    );
    assert_snapshot!(lint(&localized, src), @"");
}

#[test]
fn name_patterns_are_anchored() {
    let engine = engine_with(r#"{ "order": ["/_.+/", "[everything-else]"] }"#);
    assert_snapshot!(
        lint(&engine, "class Foo { foo(){} _bar(){} }"),
        @"sort_class_members:1:21: warning: Expected method _bar to come before method foo."
    );

    let engine = engine_with(r#"{ "order": ["zed", "/_.+/"] }"#);
    assert_snapshot!(lint(&engine, "class Foo { x_y(){} zed(){} }"), @"");
}

#[test]
fn arrow_function_properties_have_their_own_group() {
    let engine = engine_with(
        r#"{ "order": ["[arrow-function-properties]", "[methods]", "[properties]"] }"#,
    );
    assert_snapshot!(
        lint(
            &engine,
            "class Foo {\n  count = 0;\n  render() {}\n  onClick = () => {};\n}\n"
        ),
        @r"
    sort_class_members:3:3: warning: Expected method render to come before property count.
    sort_class_members:4:3: warning: Expected property onClick to come before method render.
    sort_class_members:4:3: warning: Expected property onClick to come before property count.
    "
    );
}

#[test]
fn decorated_members_follow_recommended_order() {
    let engine = create_default_engine().expect("engine");
    assert_snapshot!(
        lint(&engine, include_str!("fixtures/decorated_widget.ts")),
        @r"
    sort_class_members:14:3: warning: Expected property changed to come before constructor.
    sort_class_members:14:3: warning: Expected property changed to come before method onClick.
    sort_class_members:14:3: warning: Expected property changed to come before method render.
    sort_class_members:4:3: warning: Expected property label to come before constructor.
    "
    );
}

#[test]
fn decorated_members_can_be_grouped() {
    let engine = engine_with(r#"{ "order": [{ "groupByDecorator": true }, "[everything-else]"] }"#);
    assert_snapshot!(
        lint(&engine, include_str!("fixtures/decorated_widget.ts")),
        @r"
    sort_class_members:14:3: warning: Expected property changed to come before constructor.
    sort_class_members:14:3: warning: Expected property changed to come before method render.
    sort_class_members:4:3: warning: Expected property label to come before constructor.
    sort_class_members:7:3: warning: Expected method onClick to come before constructor.
    "
    );
}

#[test]
fn decorator_names_select_slots() {
    let engine = engine_with(
        r#"{ "order": [{ "groupByDecorator": "Output" }, { "groupByDecorator": "Input" }, "[everything-else]"] }"#,
    );
    assert_snapshot!(
        lint(&engine, include_str!("fixtures/decorated_widget.ts")),
        @r"
    sort_class_members:14:3: warning: Expected property changed to come before constructor.
    sort_class_members:14:3: warning: Expected property changed to come before method onClick.
    sort_class_members:14:3: warning: Expected property changed to come before method render.
    sort_class_members:14:3: warning: Expected property changed to come before property label.
    sort_class_members:4:3: warning: Expected property label to come before constructor.
    "
    );
}

#[test]
fn interfaces_are_sorted_only_when_enabled() {
    let src = "interface Shape {\n  area(): number;\n  name: string;\n}\n";

    let classes_only = engine_with(r#"{ "order": ["[properties]", "[methods]"] }"#);
    assert_snapshot!(lint(&classes_only, src), @"");

    let with_interfaces =
        engine_with(r#"{ "order": ["[properties]", "[methods]"], "sortInterfaces": true }"#);
    assert_snapshot!(
        lint(&with_interfaces, src),
        @"sort_class_members:3:3: warning: Expected property name to come before method area."
    );
}

#[test]
fn tsx_sources_use_the_tsx_grammar() {
    let engine = create_default_engine().expect("engine");
    let diags = engine
        .lint_source_as(include_str!("fixtures/app.tsx"), Dialect::Tsx)
        .expect("linting should succeed");
    assert_snapshot!(
        format_diags(&diags),
        @"sort_class_members:6:3: warning: Expected static property displayName to come before method render."
    );
}

#[test]
fn class_expressions_are_checked() {
    let engine = create_default_engine().expect("engine");
    assert_snapshot!(
        lint(&engine, "const Foo = class { constructor() {} static create() {} };"),
        @"sort_class_members:1:38: warning: Expected static method create to come before constructor."
    );
}

#[test]
fn unknown_group_references_are_ignored() {
    let engine = engine_with(r#"{ "order": ["[no-such-group]", "constructor", "[methods]"] }"#);
    assert_snapshot!(
        lint(&engine, "class Foo { run(){} constructor(){} }"),
        @"sort_class_members:1:21: warning: Expected constructor to come before method run."
    );
}

#[test]
fn group_cycles_are_rejected() {
    let options = RuleOptions::from_json(
        r#"{ "order": ["[a]"], "groups": { "a": ["[b]"], "b": ["[a]"] } }"#,
    )
    .expect("options should parse");
    let err = create_engine(&options, LintSettings::default())
        .err()
        .expect("cyclic groups should fail");
    assert!(format!("{err:#}").contains("references itself"), "{err:#}");
}

#[test]
fn setter_first_positioning() {
    let engine = engine_with(r#"{ "accessorPairPositioning": "setThenGet" }"#);
    assert_snapshot!(
        lint(&engine, "class Temp {\n  get value() { return 1; }\n  set value(v) {}\n}\n"),
        @"sort_class_members:3:3: warning: Expected setter value to come immediately before getter value."
    );
    assert_snapshot!(
        lint(&engine, "class Temp {\n  set value(v) {}\n  get value() { return 1; }\n}\n"),
        @""
    );
}

#[test]
fn together_positioning_only_checks_adjacency() {
    let engine = engine_with(r#"{ "accessorPairPositioning": "together" }"#);
    assert_snapshot!(
        lint(&engine, "class Temp {\n  set value(v) {}\n  get value() { return 1; }\n}\n"),
        @""
    );
    assert_snapshot!(
        lint(
            &engine,
            "class Temp {\n  set value(v) {}\n  reset() {}\n  get value() { return 1; }\n}\n"
        ),
        @"sort_class_members:4:3: warning: Expected getter value to come immediately after setter value."
    );
}

#[test]
fn accessor_kinds_select_slots() {
    let engine = engine_with(
        r#"{ "order": [{ "kind": "nonAccessor" }, { "kind": "accessor" }], "accessorPairPositioning": "any" }"#,
    );
    assert_snapshot!(
        lint(&engine, "class Foo {\n  get size() { return 0; }\n  clear() {}\n}\n"),
        @"sort_class_members:3:3: warning: Expected method clear to come before getter size."
    );
    assert_snapshot!(
        lint(&engine, "class Foo {\n  clear() {}\n  get size() { return 0; }\n}\n"),
        @""
    );
}

#[test]
fn accessibility_selects_slots() {
    let engine = engine_with(
        r#"{ "order": [{ "accessibility": "public" }, { "accessibility": "protected" }, { "accessibility": "private" }] }"#,
    );
    assert_snapshot!(
        lint(
            &engine,
            "class Foo {\n  private secret() {}\n  protected shared() {}\n  open() {}\n}\n"
        ),
        @r"
    sort_class_members:3:3: warning: Expected method shared to come before method secret.
    sort_class_members:4:3: warning: Expected method open to come before method secret.
    sort_class_members:4:3: warning: Expected method open to come before method shared.
    "
    );
}

#[test]
fn abstract_members_select_slots() {
    let engine = engine_with(r#"{ "order": [{ "abstract": false }, { "abstract": true }] }"#);
    assert_snapshot!(
        lint(
            &engine,
            "abstract class Shape {\n  abstract area(): number;\n  describe() { return \"shape\"; }\n}\n"
        ),
        @"sort_class_members:3:3: warning: Expected method describe to come before method area."
    );
}

#[test]
fn override_members_select_slots() {
    let engine = engine_with(r#"{ "order": [{ "override": true }, "[everything-else]"] }"#);
    assert_snapshot!(
        lint(
            &engine,
            "class Child extends Base {\n  helper() {}\n  override render() {}\n}\n"
        ),
        @"sort_class_members:3:3: warning: Expected method render to come before method helper."
    );
}

#[test]
fn readonly_properties_select_slots() {
    let engine = engine_with(
        r#"{ "order": [{ "type": "property", "readonly": true }, { "type": "property" }] }"#,
    );
    assert_snapshot!(
        lint(&engine, "class Point {\n  label = \"p\";\n  readonly x = 0;\n}\n"),
        @"sort_class_members:3:3: warning: Expected property x to come before property label."
    );
}

#[test]
fn private_names_select_slots() {
    let engine = engine_with(r#"{ "order": [{ "private": false }, { "private": true }] }"#);
    assert_snapshot!(
        lint(&engine, "class Counter {\n  #count = 0;\n  increment() {}\n}\n"),
        @"sort_class_members:3:3: warning: Expected method increment to come before property #count."
    );
}

#[test]
fn async_methods_select_slots() {
    let engine = engine_with(r#"{ "order": [{ "async": false }, { "async": true }] }"#);
    assert_snapshot!(
        lint(&engine, "class Loader {\n  async load() {}\n  parse() {}\n}\n"),
        @"sort_class_members:3:3: warning: Expected method parse to come before method load."
    );
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let src = "class Menu {\n  fig() {}\n  éclair() {}\n}\n";

    let codepoint = engine_with(r#"{ "order": [{ "type": "method", "sort": "alphabetical" }] }"#);
    assert_snapshot!(lint(&codepoint, src), @"");

    let localized = engine_with(
        r#"{ "order": [{ "type": "method", "sort": "alphabetical" }], "locale": "en-US" }"#,
    );
    assert_snapshot!(
        lint(&localized, src),
        @"sort_class_members:3:3: warning: Expected method éclair to come before method fig."
    );
}

#[test]
fn malformed_locales_fail_engine_construction() {
    let options = RuleOptions::from_json(r#"{ "order": ["[methods]"], "locale": "not a locale!" }"#)
        .expect("options should parse");
    let err = create_engine(&options, LintSettings::default())
        .err()
        .expect("malformed locale should fail");
    assert!(format!("{err:#}").contains("unsupported locale"), "{err:#}");
}

#[test]
fn jsx_in_javascript_files_is_linted() {
    let engine = create_default_engine().expect("engine");
    let src = "class View {\n  render() { return <div>{this.label}</div>; }\n  label = \"x\";\n}\n";
    let diags = engine
        .lint_source_as(src, Dialect::from_path(std::path::Path::new("view.js")))
        .expect("linting should succeed");
    assert_snapshot!(
        format_diags(&diags),
        @"sort_class_members:3:3: warning: Expected property label to come before method render."
    );
}
