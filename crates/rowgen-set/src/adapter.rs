//! Boundary adapter: plain values and collections into `ValueSet`s.
//!
//! Scalars become one-column rows, `Tuple`s are taken as whole rows, and
//! vectors/arrays of either become one row per element.

use rowgen_core::types::{Tuple, Value};

use crate::value_set::ValueSet;

/// Something that forms one generated row.
pub trait IntoRow {
    fn into_row(self) -> Tuple;
}

/// Something usable as an operand of the `ValueSet` algebra.
pub trait IntoValueSet {
    fn into_value_set(self) -> ValueSet;
}

impl IntoRow for Tuple {
    fn into_row(self) -> Tuple {
        self
    }
}

impl IntoValueSet for Tuple {
    fn into_value_set(self) -> ValueSet {
        ValueSet::from_rows(vec![self])
    }
}

macro_rules! scalar_adapter {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoRow for $ty {
                fn into_row(self) -> Tuple {
                    Tuple::single(self)
                }
            }

            impl IntoValueSet for $ty {
                fn into_value_set(self) -> ValueSet {
                    ValueSet::from_rows(vec![Tuple::single(self)])
                }
            }
        )+
    };
}

scalar_adapter!(Value, bool, i32, i64, f32, f64, usize, String, &str);

impl IntoValueSet for ValueSet {
    fn into_value_set(self) -> ValueSet {
        self
    }
}

impl IntoValueSet for &ValueSet {
    fn into_value_set(self) -> ValueSet {
        self.clone()
    }
}

impl<R: IntoRow> IntoValueSet for Vec<R> {
    fn into_value_set(self) -> ValueSet {
        self.into_iter().collect()
    }
}

impl<R: IntoRow, const N: usize> IntoValueSet for [R; N] {
    fn into_value_set(self) -> ValueSet {
        self.into_iter().collect()
    }
}
