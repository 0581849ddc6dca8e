#![forbid(unsafe_code)]
//! rowgen-cli: YAML data-set plans for previewing generated rows.

pub mod plan;

pub use plan::{parse_yaml_plan, Node, PlanDoc, PlanError, SetDef};
