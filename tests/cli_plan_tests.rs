//! CLI YAML plan parsing and building tests

use rowgen::prelude::*;
use rowgen_cli::{parse_yaml_plan, Node, PlanError, SetDef};

#[test]
fn test_parse_plan_with_named_sets() {
    let yaml = r#"
sets:
  browser: { values: ["chrome", "firefox"] }
  size: { rows: [[320, 480], [1280, 800], [1920, 1080]] }
plan:
  op: multiply
  left: { op: set, name: browser }
  right: { op: set, name: size }
"#;

    let doc = parse_yaml_plan(yaml).expect("parse");
    assert_eq!(doc.sets.len(), 2);
    assert!(matches!(doc.sets["browser"], SetDef::Values { .. }));
    assert!(matches!(doc.sets["size"], SetDef::Rows { .. }));
    assert!(matches!(doc.plan, Node::Multiply { .. }));

    let set = doc.build(&GeneratorConfig::default()).expect("build");
    assert_eq!(set.count().unwrap(), 6);
    assert_eq!(
        set.rows().unwrap()[5],
        tuple!("firefox", 1920i64, 1080i64)
    );
}

#[test]
fn test_every_policy_has_a_yaml_form() {
    let yaml = r#"
plan:
  op: unite
  left:
    op: align
    left: { op: values, values: [1, 2, 3] }
    right: { op: values, values: ["a"] }
  right:
    op: intersect
    left: { op: values, values: [[7, "z"], [8, "y"]] }
    right: { op: values, values: [[8, "y"]] }
"#;

    let set = parse_yaml_plan(yaml)
        .and_then(|doc| doc.build(&GeneratorConfig::default()))
        .expect("build");
    let rows = set.rows().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2], tuple!(3i64, "a"));
    assert_eq!(rows[3].arity(), 1);
}

#[test]
fn test_reduce_and_cache_nodes() {
    let yaml = r#"
plan:
  op: cache
  input:
    op: reduce
    ratio: 0.5
    input: { op: values, values: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10] }
"#;

    let set = parse_yaml_plan(yaml)
        .and_then(|doc| doc.build(&GeneratorConfig::default()))
        .expect("build");
    let kept: Vec<i64> = set
        .rows()
        .unwrap()
        .iter()
        .filter_map(|r| r[0].as_i64())
        .collect();
    assert_eq!(kept, vec![2, 4, 6, 8, 10]);
    assert!(set.explain().starts_with("cache"));
}

#[test]
fn test_row_limit_from_plan_config() {
    let yaml = r#"
config: { max_materialized_rows: 3 }
plan:
  op: cache
  input: { op: values, values: [1, 2, 3, 4] }
"#;

    let doc = parse_yaml_plan(yaml).expect("parse");
    let err = doc.build(&doc.generator_config()).expect_err("over limit");
    assert!(matches!(
        err,
        PlanError::Cursor(CursorError::RowLimit { limit: 3 })
    ));
}

#[test]
fn test_zero_row_limit_is_rejected() {
    let doc = parse_yaml_plan("plan: { op: values, values: [1] }").expect("parse");
    let cfg = GeneratorConfig::default().with_max_materialized_rows(0);
    assert!(matches!(doc.build(&cfg), Err(PlanError::Core(_))));
}

#[test]
fn test_malformed_exclusions_rejected() {
    let yaml = r#"
plan: { op: values, values: [1, 2] }
exclude: "4-1"
"#;

    let doc = parse_yaml_plan(yaml).expect("parse");
    assert!(matches!(
        doc.build(&GeneratorConfig::default()),
        Err(PlanError::Core(_))
    ));
}

#[test]
fn test_unknown_op_is_a_parse_error() {
    let yaml = r#"
plan:
  op: shuffle
  input: { op: values, values: [1] }
"#;

    assert!(matches!(parse_yaml_plan(yaml), Err(PlanError::Yaml(_))));
}
