/*!

The Knuth–Bendix ordering.

Weights come from the OCB's per-symbol weight vector plus the variable weight. The variable
condition is checked first: `s > t` additionally requires every variable to occur at least as
often in `s` as in `t`. On equal weights the comparison falls through to head precedence and then
to the lexicographic extension over the argument lists.

*/

use std::cmp::Ordering;

use sabre_abs::{HashMap, PartialOrdering};

use crate::{
  orderings::ocb::Ocb,
  terms::{DerefPolicy, TermBank},
  FunCode,
  TermIndex,
};

pub fn kbo_greater(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  t: TermIndex,
  deref_s: DerefPolicy,
  deref_t: DerefPolicy,
) -> bool {
  kbo_compare(ocb, bank, s, t, deref_s, deref_t) == PartialOrdering::Greater
}

pub fn kbo_compare(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  t: TermIndex,
  deref_s: DerefPolicy,
  deref_t: DerefPolicy,
) -> Option<Ordering> {
  let s = bank.deref(s, deref_s);
  let t = bank.deref(t, deref_t);
  let deref_s = deref_s.next();
  let deref_t = deref_t.next();

  if s == t {
    return PartialOrdering::Equal;
  }

  if bank.is_variable(s) {
    return if bank.var_occurs(t, s) {
      PartialOrdering::Less
    } else {
      PartialOrdering::Incomparable
    };
  }
  if bank.is_variable(t) {
    return if bank.var_occurs(s, t) {
      PartialOrdering::Greater
    } else {
      PartialOrdering::Incomparable
    };
  }

  // Variable condition, both directions at once.
  let (greater_ok, less_ok) = variable_condition(bank, s, deref_s, t, deref_t);

  let weight_s = ocb_term_weight(ocb, bank, s, deref_s);
  let weight_t = ocb_term_weight(ocb, bank, t, deref_t);

  match weight_s.cmp(&weight_t) {
    Ordering::Greater => {
      return if greater_ok { PartialOrdering::Greater } else { PartialOrdering::Incomparable };
    }
    Ordering::Less => {
      return if less_ok { PartialOrdering::Less } else { PartialOrdering::Incomparable };
    }
    Ordering::Equal => {}
  }

  match ocb.compare_precedence(bank.f_code(s), bank.f_code(t)) {
    Ordering::Greater => {
      if greater_ok { PartialOrdering::Greater } else { PartialOrdering::Incomparable }
    }
    Ordering::Less => {
      if less_ok { PartialOrdering::Less } else { PartialOrdering::Incomparable }
    }
    Ordering::Equal => {
      // Lexicographic tail: the first unequal argument pair decides.
      for (&s_arg, &t_arg) in bank.args(s).iter().zip(bank.args(t).iter()) {
        match kbo_compare(ocb, bank, s_arg, t_arg, deref_s, deref_t) {
          Some(Ordering::Equal) => continue,
          Some(Ordering::Greater) => {
            return if greater_ok { PartialOrdering::Greater } else { PartialOrdering::Incomparable };
          }
          Some(Ordering::Less) => {
            return if less_ok { PartialOrdering::Less } else { PartialOrdering::Incomparable };
          }
          None => return PartialOrdering::Incomparable,
        }
      }
      PartialOrdering::Equal
    }
  }
}

/// The OCB-weighted term weight: Σ symbol weights + variable weight per variable occurrence.
pub fn ocb_term_weight(ocb: &Ocb, bank: &TermBank, term: TermIndex, policy: DerefPolicy) -> i64 {
  let mut weight = 0;
  let mut stack = vec![(term, policy)];

  while let Some((term, policy)) = stack.pop() {
    let term = bank.deref(term, policy);
    let cell = bank.cell(term);
    if cell.is_variable() {
      weight += ocb.var_weight;
    } else {
      weight += ocb.weight(cell.f_code);
      let next = policy.next();
      stack.extend(cell.args.iter().map(|&arg| (arg, next)));
    }
  }
  weight
}

/// Returns `(s ≥ t on variables, t ≥ s on variables)`: whether each side covers the other's
/// variable occurrence counts.
fn variable_condition(
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> (bool, bool) {
  let mut s_counts: HashMap<FunCode, usize> = HashMap::new();
  let mut t_counts: HashMap<FunCode, usize> = HashMap::new();
  bank.var_occurrences(s, deref_s, &mut s_counts);
  bank.var_occurrences(t, deref_t, &mut t_counts);

  let covers = |big: &HashMap<FunCode, usize>, small: &HashMap<FunCode, usize>| {
    small
        .iter()
        .all(|(var, &count)| big.get(var).copied().unwrap_or(0) >= count)
  };

  (covers(&s_counts, &t_counts), covers(&t_counts, &s_counts))
}
