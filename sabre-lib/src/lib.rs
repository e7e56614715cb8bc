/*!

Core engine of a saturation-based equational theorem prover.

The crate is organized around a session-owned [`TermBank`](terms::TermBank) holding the signature,
the variable bank, and the perfectly shared term store. Everything else — substitutions, the
LPO/KBO orderings, matching and unification, clauses and their indexes, and the PCL proof-object
protocol — operates on `TermIndex` handles into that bank.

*/

pub mod analysis;
pub mod clauses;
pub mod error;
pub mod eval;
pub mod indexing;
pub mod io;
pub mod learn;
pub mod limits;
pub mod orderings;
pub mod proof;
pub mod terms;
pub mod unify;

mod ids;
mod sysdate;

pub use ids::{ClauseIdent, FunCode, TermIndex, TypeIndex};
pub use sysdate::SysDate;
