//! Semantic analysis of a loaded model.
//!
//! Runs after registration, in a fixed pass order:
//!
//! 1. type union (classes ⊕ vocabularies ⊕ datatypes)
//! 2. property-range checks and the `used_in` reverse index
//! 3. reference checks (property ranges, individual types)
//! 4. inheritance: topological order, ancestor stacks
//! 5. direct-subclass lists
//! 6. effective properties, with external property restrictions
//!
//! Every pass records problems in the [`Reporter`] and keeps going; the
//! model is complete (possibly partial where inputs were bad) when
//! [`process`] returns.

mod effective;
mod inheritance;
mod ranges;
mod types;

use crate::model::Model;
use crate::report::Reporter;

/// Runs all analysis passes over a freshly loaded model.
pub fn process(model: &mut Model, rep: &mut Reporter) {
    types::build_type_union(model, rep);
    ranges::check_property_ranges(model, rep);
    ranges::check_references(model, rep);

    let inheritance = inheritance::compute(model, rep);
    inheritance.assign_stacks(model);
    inheritance.assign_subclasses(model);

    effective::compute(model, &inheritance, rep);

    tracing::debug!("analysis finished");
}

pub(crate) use inheritance::Inheritance;
