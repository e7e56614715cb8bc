/*!

Reduction orderings used to direct rewriting: the lexicographic path ordering and the
Knuth–Bendix ordering, both driven by an ordering control block bundling symbol precedence and
weights. Comparison outcomes are `Option<Ordering>` — `None` means uncomparable, a first-class
result.

*/

mod kbo;
mod lpo;
mod ocb;

use std::cmp::Ordering;

pub use kbo::{kbo_compare, kbo_greater};
pub use lpo::{lpo_compare, lpo_greater};
pub(crate) use lpo::structurally_equal;
pub use ocb::{Ocb, OrderingKind};

use crate::{
  terms::{DerefPolicy, TermBank},
  TermIndex,
};

/// Tests whether `s` is strictly greater than `t` in the ordering described by the OCB.
pub fn ordering_greater(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  t: TermIndex,
  deref_s: DerefPolicy,
  deref_t: DerefPolicy,
) -> bool {
  match ocb.kind {
    OrderingKind::Lpo | OrderingKind::LpoCopy => lpo_greater(ocb, bank, s, t, deref_s, deref_t),
    OrderingKind::Kbo | OrderingKind::Kbo6 => kbo_greater(ocb, bank, s, t, deref_s, deref_t),
  }
}

/// Compares `s` and `t` in the ordering described by the OCB.
pub fn ordering_compare(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  t: TermIndex,
  deref_s: DerefPolicy,
  deref_t: DerefPolicy,
) -> Option<Ordering> {
  match ocb.kind {
    OrderingKind::Lpo | OrderingKind::LpoCopy => lpo_compare(ocb, bank, s, t, deref_s, deref_t),
    OrderingKind::Kbo | OrderingKind::Kbo6 => kbo_compare(ocb, bank, s, t, deref_s, deref_t),
  }
}
