//! Minimal YAML → `ValueSet` builder.
//!
//! Example:
//! ```yaml
//! config: { max_materialized_rows: 10000 }
//! sets:
//!   browser: { values: ["chrome", "firefox", "safari"] }
//!   viewport: { rows: [[320, 480], [1280, 800]] }
//! plan:
//!   op: multiply
//!   left: { op: set, name: browser }
//!   right:
//!     op: reduce
//!     ratio: 0.5
//!     input: { op: set, name: viewport }
//! exclude: "0,3-4"
//! ```
//!
//! Mapping functions are code, so `filter` has no YAML form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rowgen_core::config::GeneratorConfig;
use rowgen_core::excluded::ExcludedIndices;
use rowgen_core::types::{Tuple, Value};
use rowgen_cursor::CursorError;
use rowgen_set::ValueSet;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown set '{0}'")]
    UnknownSet(String),

    #[error(transparent)]
    Core(#[from] rowgen_core::Error),

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDoc {
    #[serde(default)]
    pub config: Option<GeneratorConfig>,
    #[serde(default)]
    pub sets: BTreeMap<String, SetDef>,
    pub plan: Node,
    /// Reason string; presence marks the whole plan not applicable.
    #[serde(default)]
    pub not_applicable: Option<String>,
    /// Compact excluded-row list, e.g. `"0,3-5"`.
    #[serde(default)]
    pub exclude: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetDef {
    /// One column, one row per value.
    Values { values: Vec<Value> },
    /// Explicit rows.
    Rows { rows: Vec<Vec<Value>> },
}

impl SetDef {
    fn to_value_set(&self) -> ValueSet {
        match self {
            SetDef::Values { values } => ValueSet::of(values.iter().cloned()),
            SetDef::Rows { rows } => {
                ValueSet::from_rows(rows.iter().cloned().map(Tuple::new).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Node {
    Set { name: String },
    Values { values: Vec<Value> },
    Multiply { left: Box<Node>, right: Box<Node> },
    Align { left: Box<Node>, right: Box<Node> },
    Unite { left: Box<Node>, right: Box<Node> },
    Intersect { left: Box<Node>, right: Box<Node> },
    Cache { input: Box<Node> },
    Reduce { input: Box<Node>, ratio: f64 },
}

pub fn parse_yaml_plan(yaml: &str) -> Result<PlanDoc, PlanError> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl PlanDoc {
    /// Effective config: environment first, then the plan's `config` block.
    pub fn generator_config(&self) -> GeneratorConfig {
        self.config.clone().unwrap_or_else(GeneratorConfig::from_env)
    }

    /// Build the data set the plan describes. `cache`/`reduce` nodes drain
    /// their input here, so build errors include mapping faults and row limits.
    pub fn build(&self, cfg: &GeneratorConfig) -> Result<ValueSet, PlanError> {
        cfg.validate()?;
        let mut set = self.build_node(&self.plan, cfg)?;
        if let Some(reason) = &self.not_applicable {
            let reason = (!reason.trim().is_empty()).then(|| reason.clone());
            set = set.mark_not_applicable(reason);
        }
        if let Some(exclude) = &self.exclude {
            set = set.mark_excluded(exclude.parse::<ExcludedIndices>()?);
        }
        Ok(set)
    }

    fn build_node(&self, node: &Node, cfg: &GeneratorConfig) -> Result<ValueSet, PlanError> {
        Ok(match node {
            Node::Set { name } => self
                .sets
                .get(name)
                .ok_or_else(|| PlanError::UnknownSet(name.clone()))?
                .to_value_set(),
            Node::Values { values } => ValueSet::of(values.iter().cloned()),
            Node::Multiply { left, right } => self
                .build_node(left, cfg)?
                .multiply(self.build_node(right, cfg)?),
            Node::Align { left, right } => self
                .build_node(left, cfg)?
                .pseudo_multiply(self.build_node(right, cfg)?),
            Node::Unite { left, right } => self
                .build_node(left, cfg)?
                .unite(self.build_node(right, cfg)?),
            Node::Intersect { left, right } => self
                .build_node(left, cfg)?
                .intersect(self.build_node(right, cfg)?),
            Node::Cache { input } => self.build_node(input, cfg)?.create_cache_with(cfg)?,
            Node::Reduce { input, ratio } => {
                self.build_node(input, cfg)?.reduce_to_with(*ratio, cfg)?
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
sets:
  browser: { values: ["chrome", "firefox", "safari"] }
  viewport: { rows: [[320, 480], [1280, 800]] }
plan:
  op: multiply
  left: { op: set, name: browser }
  right: { op: set, name: viewport }
exclude: "1"
"#;

    #[test]
    fn builds_product_with_exclusions() {
        let doc = parse_yaml_plan(PLAN).expect("parse");
        let set = doc.build(&GeneratorConfig::default()).expect("build");
        let rows = set.rows().expect("rows");
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].arity(), 3);
        assert_eq!(rows[0][0], Value::Str("chrome".into()));
        assert_eq!(rows[1][1], Value::I64(1280));
        assert!(set.is_row_excluded(1));
        assert!(set.is_applicable());
    }

    #[test]
    fn unknown_set_is_reported() {
        let doc = parse_yaml_plan("plan: { op: set, name: missing }").expect("parse");
        let err = doc.build(&GeneratorConfig::default()).expect_err("unknown");
        assert!(matches!(err, PlanError::UnknownSet(name) if name == "missing"));
    }

    #[test]
    fn not_applicable_and_bad_ratio() {
        let doc = parse_yaml_plan(
            r#"
plan: { op: values, values: [1, 2, 3] }
not_applicable: "covered elsewhere"
"#,
        )
        .expect("parse");
        let set = doc.build(&GeneratorConfig::default()).expect("build");
        assert_eq!(set.not_applicable_reason(), Some("covered elsewhere"));

        let doc = parse_yaml_plan(
            "plan: { op: reduce, ratio: 1.0, input: { op: values, values: [1, 2] } }",
        )
        .expect("parse");
        let err = doc.build(&GeneratorConfig::default()).expect_err("ratio");
        assert!(matches!(
            err,
            PlanError::Cursor(CursorError::Core(rowgen_core::Error::Ratio(_)))
        ));
    }
}
