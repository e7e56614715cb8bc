/*!

Shared term representation: the signature, hash-consed types, the perfectly shared term store,
variable banks, substitutions, and AC normal forms. The [`TermBank`] owns all of it and is the
single entry point for building terms bottom-up.

*/

mod ac;
mod bank;
mod cell;
mod store;
mod subst;
mod symbol;
mod types;
mod variables;

pub use ac::{ac_equal, AcTerm};
pub use bank::{ProblemType, TermBank};
pub use cell::{TermCell, TermProperties, TermProperty, DEFAULT_FWEIGHT, DEFAULT_VWEIGHT};
pub use store::TermStore;
pub use subst::{DerefPolicy, Substitution};
pub use symbol::{
  Signature,
  Symbol,
  SymbolProperties,
  SymbolProperty,
  FIRST_USER_FUNCODE,
  FUNCODE_APP,
  FUNCODE_EQ,
  FUNCODE_FALSE,
  FUNCODE_LAMBDA,
  FUNCODE_TRUE,
};
pub use types::{TypeBank, TypeShape};
pub use variables::{var_code_is_fresh, VarBank, FRESH_VAR_LIMIT};
