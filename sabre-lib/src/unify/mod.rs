/*!

Matching and unification over shared terms. All primitives extend a caller-provided
[`Substitution`](crate::terms::Substitution) and report failure as an ordinary `false`/`None`
after restoring the substitution to its entry state — a failed attempt never leaks bindings.

*/

mod csu;
mod matching;
mod mgu;

pub use csu::CsuIter;
pub use matching::{compute_match, match_possibly_partial, remaining_args_same};
pub use mgu::compute_mgu;
