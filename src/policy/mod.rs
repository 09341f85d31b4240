//! Pluggable per-bonus policies.
//!
//! - `Propagator`: where a bonus is visible beyond its attachment node.
//! - `Calculator`: what a bonus is worth in a given query context.
//!
//! Both are closed sets of tagged variants behind one evaluate method;
//! games pick and parameterize them at bonus construction time.

mod calculator;
mod propagator;

pub use calculator::Calculator;
pub use propagator::Propagator;
