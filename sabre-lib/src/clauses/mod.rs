/*!

Clause and literal algebra: equational literals with ordering annotations, clauses with cached
sign counts and properties, insertion-ordered clause sets with attached indexes, clause
positions, literal selection, unit simplification, equality factoring, and relevance analysis.

*/

mod clause;
mod clause_pos;
mod clause_set;
mod eqn;
mod factor;
mod relevance;
mod selection;
mod unit_simplify;

pub use clause::{Clause, ClauseProperties, ClauseProperty};
pub use clause_pos::{iter_maximal_sides, ClausePos, EqnSide};
pub use clause_set::ClauseSet;
pub use eqn::{eqn_compare, Eqn, EqnProperties, EqnProperty};
pub use factor::{clause_equality_factors, compute_equality_factor, equality_factor_partners};
pub use relevance::{relevance_compute, split_conjectures, Relevance};
pub use selection::{find_selection_strategy, select_literals, SelectionStrategy};
pub use unit_simplify::{
  clause_simplify_with_unit_set,
  find_simplifying_unit,
  find_top_simplifying_unit,
  SimplifyRes,
  UnitSimplifyMode,
};
