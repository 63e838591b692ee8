//! WASM bindings for the feedrate core.
//!
//! Tags cross the boundary as strings: either a catalog name (`"SpindleSpeed"`) or a
//! one to four character mnemonic (`"n"`, `"Dcap"`).

mod machine;
mod solver;
mod tags;

pub use machine::fit_to_machine;
pub use solver::solve;
pub use tags::{tag_mnemonics, tag_name};
