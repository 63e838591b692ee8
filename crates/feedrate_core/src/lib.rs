pub mod catalog;
pub mod formula;
pub mod limits;
pub mod registry;
pub mod resolver;
pub mod simplex;
pub mod tag;
pub mod tag_names;
/// The `feedrate_core` crate derives unknown machining quantities (spindle speed,
/// table feed, power, torque, ...) from a partial set of known ones.
///
/// Key components:
/// - **Tags**: `Tag` names a quantity kind; `tag_names` renders tags for logs.
/// - **Working set**: `WorkingSet`, the per-call pool of known values.
/// - **Formulas**: `Formula` binds an output tag to input tags and a numeric function;
///   `Registry` is the ordered formula knowledge base and `catalog` the standard set.
/// - **Resolver**: forward chaining over the registry up to a fixed pass bound.
/// - **Tuning**: Nelder–Mead `simplex` minimization driven by resolver outputs,
///   and `limits` for fitting speed and feed to a machine.
pub mod traits;
pub mod tuning;
pub mod working_set;

pub use formula::{Formula, FormulaError};
pub use registry::Registry;
pub use resolver::{solve, solve_with, Resolution, ResolveStats, Resolver, ResolverSettings};
pub use tag::Tag;
pub use working_set::{TaggedValue, WorkingSet};
