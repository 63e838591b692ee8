//! Formula descriptors.
//!
//! A [`Formula`] binds one output tag to an ordered list of input tags and a numeric
//! function taking exactly that many arguments. The descriptor does the lookups, so
//! the resolver can treat every formula the same way regardless of arity.

use crate::tag::Tag;
use crate::traits::ValueSource;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula `{name}` for {output} lists input {input} more than once")]
    DuplicateInput {
        name: &'static str,
        output: Tag,
        input: Tag,
    },
}

type Invocation = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

#[derive(Clone)]
pub struct Formula {
    name: &'static str,
    output: Tag,
    inputs: Vec<Tag>,
    invoke: Invocation,
}

impl Formula {
    /// Creates a formula computing `output` from `inputs`.
    ///
    /// The function receives its arguments in the order of `inputs`; the array
    /// length ties the declared arity to the function signature.
    pub fn new<const N: usize, F>(
        name: &'static str,
        output: Tag,
        inputs: [Tag; N],
        func: F,
    ) -> Result<Self, FormulaError>
    where
        F: Fn([f64; N]) -> f64 + Send + Sync + 'static,
    {
        for (i, input) in inputs.iter().enumerate() {
            if inputs[..i].contains(input) {
                return Err(FormulaError::DuplicateInput {
                    name,
                    output,
                    input: *input,
                });
            }
        }

        let invoke: Invocation = Arc::new(move |args: &[f64]| {
            let mut packed = [0.0; N];
            packed.copy_from_slice(args);
            func(packed)
        });

        Ok(Self {
            name,
            output,
            inputs: inputs.to_vec(),
            invoke,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn output(&self) -> Tag {
        self.output
    }

    pub fn inputs(&self) -> &[Tag] {
        &self.inputs
    }

    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// First required input not present in `values`, in declared order.
    pub fn missing_input(&self, values: &impl ValueSource) -> Option<Tag> {
        self.inputs.iter().copied().find(|&tag| !values.contains(tag))
    }

    /// True iff every required input is known. Ignores whether the output is known.
    pub fn is_applicable(&self, values: &impl ValueSource) -> bool {
        self.missing_input(values).is_none()
    }

    /// Looks up the inputs in declared order and applies the function.
    ///
    /// # Panics
    ///
    /// Panics if an input is missing. Callers must check [`Formula::is_applicable`]
    /// first; a missing input here is a bug in the caller, not a data condition.
    pub fn evaluate(&self, values: &impl ValueSource) -> f64 {
        let mut args = Vec::with_capacity(self.inputs.len());
        for &tag in &self.inputs {
            match values.lookup(tag) {
                Some(value) => args.push(value),
                None => panic!(
                    "formula `{}` for {} evaluated without required input {}",
                    self.name, self.output, tag
                ),
            }
        }
        (self.invoke)(&args)
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("name", &self.name)
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{EFFECTIVE_CUTTER_TEETH, FEED_PER_TOOTH, SPINDLE_SPEED, TABLE_FEED};
    use crate::working_set::WorkingSet;

    fn feed_per_tooth() -> Formula {
        Formula::new(
            "fz",
            FEED_PER_TOOTH,
            [TABLE_FEED, SPINDLE_SPEED, EFFECTIVE_CUTTER_TEETH],
            |[vf, n, zc]| vf / (n * zc),
        )
        .expect("formula should build")
    }

    #[test]
    fn rejects_duplicate_inputs() {
        let err = Formula::new("bad", FEED_PER_TOOTH, [TABLE_FEED, TABLE_FEED], |[a, b]| a + b)
            .expect_err("duplicate input should fail");
        assert_eq!(
            err,
            FormulaError::DuplicateInput {
                name: "bad",
                output: FEED_PER_TOOTH,
                input: TABLE_FEED,
            }
        );
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn applicability_tracks_inputs_only() {
        let formula = feed_per_tooth();
        let mut set = WorkingSet::from_known([(TABLE_FEED, 400.0), (SPINDLE_SPEED, 3000.0)]);
        assert!(!formula.is_applicable(&set));
        assert_eq!(formula.missing_input(&set), Some(EFFECTIVE_CUTTER_TEETH));

        set.insert(EFFECTIVE_CUTTER_TEETH, 4.0);
        set.insert(FEED_PER_TOOTH, 1.0);
        assert!(formula.is_applicable(&set));
    }

    #[test]
    fn evaluate_passes_inputs_in_declared_order() {
        let formula = feed_per_tooth();
        let set = WorkingSet::from_known([
            (EFFECTIVE_CUTTER_TEETH, 4.0),
            (SPINDLE_SPEED, 3000.0),
            (TABLE_FEED, 400.0),
        ]);
        let fz = formula.evaluate(&set);
        assert!((fz - 400.0 / 12000.0).abs() < 1e-12, "unexpected fz {fz}");
    }

    #[test]
    #[should_panic(expected = "evaluated without required input")]
    fn evaluate_without_inputs_panics() {
        let formula = feed_per_tooth();
        let set = WorkingSet::from_known([(TABLE_FEED, 400.0)]);
        formula.evaluate(&set);
    }

    #[test]
    fn nullary_formula_is_always_applicable() {
        let formula = Formula::new("const", TABLE_FEED, [], |[]| 42.0).expect("formula");
        let set = WorkingSet::new();
        assert_eq!(formula.arity(), 0);
        assert!(formula.is_applicable(&set));
        assert_eq!(formula.evaluate(&set), 42.0);
    }
}
