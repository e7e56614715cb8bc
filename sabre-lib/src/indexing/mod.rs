/*!

Term and clause indexing: the perfect discrimination tree for demodulators, the fingerprint
index for unification/matching candidates, the subterm index driving backward simplification,
and the extensionality index for the higher-order superposition rules.

*/

mod ext_index;
mod fp_index;
mod pdt;
mod subterm_index;

pub use ext_index::{
  collect_ext_sup_from_pos,
  collect_ext_sup_into_pos,
  ext_index_delete_from_clause,
  ext_index_delete_into_clause,
  ext_index_insert_from_clause,
  ext_index_insert_into_clause,
  term_has_ext_eligible_subterm,
  ExtIndex,
};
pub use fp_index::{fingerprint, Fingerprint, FpIndex, FpSample, FP_SIZE};
pub use pdt::{PdTree, PdtEntry, PdtSearch};
pub use subterm_index::{SubtermIndex, SubtermOcc};
