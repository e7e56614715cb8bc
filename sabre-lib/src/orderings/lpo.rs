/*!

The lexicographic path ordering.

`lpo_compare` implements the textbook decision procedure over shared terms, with explicit
dereference policies for both sides. A variable on the left compares uncomparable (unless both
sides are the same variable); a variable on the right compares below exactly when it occurs as a
strict subterm of the left side. The `Copy` ordering kind disables the index-equality shortcut,
for comparisons run while the term graph is being mutated.

*/

use std::cmp::Ordering;

use sabre_abs::PartialOrdering;

use crate::{
  orderings::ocb::{Ocb, OrderingKind},
  terms::{DerefPolicy, TermBank},
  TermIndex,
};

pub fn lpo_greater(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  t: TermIndex,
  deref_s: DerefPolicy,
  deref_t: DerefPolicy,
) -> bool {
  lpo_compare(ocb, bank, s, t, deref_s, deref_t) == PartialOrdering::Greater
}

pub fn lpo_compare(
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

  if terms_equal(ocb, bank, s, deref_s, t, deref_t) {
    return PartialOrdering::Equal;
  }

  if bank.is_variable(s) {
    // `s` equal to `t` was handled above; a left-hand variable is otherwise uncomparable.
    return PartialOrdering::Incomparable;
  }

  if bank.is_variable(t) {
    return if occurs_below(bank, s, deref_s, t) {
      PartialOrdering::Greater
    } else {
      PartialOrdering::Incomparable
    };
  }

  let head_s = bank.f_code(s);
  let head_t = bank.f_code(t);

  match ocb.compare_precedence(head_s, head_t) {
    Ordering::Greater => {
      if all_args_less(ocb, bank, s, deref_s, t, deref_t) {
        PartialOrdering::Greater
      } else if any_arg_geq(ocb, bank, t, deref_t, s, deref_s) {
        PartialOrdering::Less
      } else {
        PartialOrdering::Incomparable
      }
    }
    Ordering::Less => {
      if all_args_less(ocb, bank, t, deref_t, s, deref_s) {
        PartialOrdering::Less
      } else if any_arg_geq(ocb, bank, s, deref_s, t, deref_t) {
        PartialOrdering::Greater
      } else {
        PartialOrdering::Incomparable
      }
    }
    Ordering::Equal => lex_compare(ocb, bank, s, deref_s, t, deref_t),
  }
}

/// Heads are equal in precedence: compare argument lists lexicographically; the side winning the
/// first difference must also dominate the remaining arguments of the other side.
fn lex_compare(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> Option<Ordering> {
  let s_args = bank.args(s);
  let t_args = bank.args(t);

  for (i, (&s_arg, &t_arg)) in s_args.iter().zip(t_args.iter()).enumerate() {
    match lpo_compare(ocb, bank, s_arg, t_arg, deref_s, deref_t) {
      Some(Ordering::Equal) => continue,
      Some(Ordering::Greater) => {
        // `s` wins the lexicographic comparison; it is greater iff it also dominates the
        // remaining arguments of `t`. Failing that, `t` can only win through one of its own
        // remaining arguments.
        return if t_args[i + 1..]
            .iter()
            .all(|&t_rest| lpo_compare(ocb, bank, s, t_rest, deref_s, deref_t) == PartialOrdering::Greater)
        {
          PartialOrdering::Greater
        } else if t_args[i + 1..]
            .iter()
            .any(|&t_rest| geq(lpo_compare(ocb, bank, t_rest, s, deref_t, deref_s)))
        {
          PartialOrdering::Less
        } else {
          PartialOrdering::Incomparable
        };
      }
      Some(Ordering::Less) => {
        return if s_args[i + 1..]
            .iter()
            .all(|&s_rest| lpo_compare(ocb, bank, t, s_rest, deref_t, deref_s) == PartialOrdering::Greater)
        {
          PartialOrdering::Less
        } else if s_args[i + 1..]
            .iter()
            .any(|&s_rest| geq(lpo_compare(ocb, bank, s_rest, t, deref_s, deref_t)))
        {
          PartialOrdering::Greater
        } else {
          PartialOrdering::Incomparable
        };
      }
      None => {
        // Neither side wins the lexicographic comparison; only an argument-dominates-whole win
        // remains possible.
        let s_dominates = any_arg_geq(ocb, bank, s, deref_s, t, deref_t);
        let t_dominates = any_arg_geq(ocb, bank, t, deref_t, s, deref_s);
        debug_assert!(!(s_dominates && t_dominates));
        return if s_dominates {
          PartialOrdering::Greater
        } else if t_dominates {
          PartialOrdering::Less
        } else {
          PartialOrdering::Incomparable
        };
      }
    }
  }

  debug_assert_eq!(s_args.len(), t_args.len(), "equal heads with unequal arities");
  PartialOrdering::Equal
}

/// True if every argument of `t` is strictly below `s` (LPO clause 1).
fn all_args_less(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> bool {
  bank
      .args(t)
      .iter()
      .all(|&t_arg| lpo_compare(ocb, bank, s, t_arg, deref_s, deref_t) == PartialOrdering::Greater)
}

/// True if some argument of `s` is greater than or equal to `t` (LPO clause 2).
fn any_arg_geq(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> bool {
  bank
      .args(s)
      .iter()
      .any(|&s_arg| geq(lpo_compare(ocb, bank, s_arg, t, deref_s, deref_t)))
}

#[inline(always)]
fn geq(result: Option<Ordering>) -> bool {
  result == PartialOrdering::Greater || result == PartialOrdering::Equal
}

/// Structural equality modulo dereferencing. The shared-term index shortcut is disabled for the
/// `Copy` ordering kind.
fn terms_equal(
  ocb: &Ocb,
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> bool {
  if ocb.kind != OrderingKind::LpoCopy && s == t {
    return true;
  }
  structurally_equal(bank, s, deref_s, t, deref_t)
}

pub(crate) fn structurally_equal(
  bank: &TermBank,
  s: TermIndex,
  deref_s: DerefPolicy,
  t: TermIndex,
  deref_t: DerefPolicy,
) -> bool {
  let s = bank.deref(s, deref_s);
  let t = bank.deref(t, deref_t);
  if s == t {
    return true;
  }
  if bank.f_code(s) != bank.f_code(t) || bank.arity(s) != bank.arity(t) {
    return false;
  }

  let deref_s = deref_s.next();
  let deref_t = deref_t.next();
  bank
      .args(s)
      .iter()
      .zip(bank.args(t).iter())
      .all(|(&s_arg, &t_arg)| structurally_equal(bank, s_arg, deref_s, t_arg, deref_t))
}

/// True if the variable `var` occurs strictly below the applied term `s`.
fn occurs_below(bank: &TermBank, s: TermIndex, deref_s: DerefPolicy, var: TermIndex) -> bool {
  bank
      .args(s)
      .iter()
      .any(|&arg| bank.is_subterm(arg, var, deref_s))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::terms::{ProblemType, Substitution};

  struct Fixture {
    bank: TermBank,
    ocb:  Ocb,
  }

  /// Signature f ≻ g ≻ a with unary f, g.
  fn fixture() -> Fixture {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 1);
    let g = bank.mk_symbol("g", 1);
    let a = bank.mk_symbol("a", 0);
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);
    ocb.set_precedence_rank(f, 30);
    ocb.set_precedence_rank(g, 20);
    ocb.set_precedence_rank(a, 10);
    Fixture { bank, ocb }
  }

  fn greater(fx: &Fixture, s: TermIndex, t: TermIndex) -> bool {
    lpo_greater(&fx.ocb, &fx.bank, s, t, DerefPolicy::Never, DerefPolicy::Never)
  }

  #[test]
  fn lexicographic_head_case() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let g = fx.bank.sig.find("g").unwrap();
    let a = fx.bank.mk_constant("a");

    // f ≻ g ≻ a implies f(g(a)) > g(f(a)).
    let ga = fx.bank.apply(g, &[a]);
    let fga = fx.bank.apply(f, &[ga]);
    let fa = fx.bank.apply(f, &[a]);
    let gfa = fx.bank.apply(g, &[fa]);

    assert!(greater(&fx, fga, gfa));
    assert!(!greater(&fx, gfa, fga));
    assert_eq!(
      lpo_compare(&fx.ocb, &fx.bank, gfa, fga, DerefPolicy::Never, DerefPolicy::Never),
      PartialOrdering::Less
    );
  }

  #[test]
  fn subterm_dominates_variable() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let individual = fx.bank.types.individual_type();
    let x = fx.bank.fresh_variable(individual);
    let fx_term = fx.bank.apply(f, &[x]);

    assert!(greater(&fx, fx_term, x));
    // A left-hand variable is uncomparable.
    assert_eq!(
      lpo_compare(&fx.ocb, &fx.bank, x, fx_term, DerefPolicy::Never, DerefPolicy::Never),
      PartialOrdering::Incomparable
    );
    // Distinct variables are uncomparable.
    let y = fx.bank.fresh_variable(individual);
    assert_eq!(
      lpo_compare(&fx.ocb, &fx.bank, x, y, DerefPolicy::Never, DerefPolicy::Never),
      PartialOrdering::Incomparable
    );
  }

  #[test]
  fn greater_is_asymmetric_and_irreflexive() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let g = fx.bank.sig.find("g").unwrap();
    let a = fx.bank.mk_constant("a");

    let terms = {
      let fa = fx.bank.apply(f, &[a]);
      let ga = fx.bank.apply(g, &[a]);
      let fga = fx.bank.apply(f, &[ga]);
      let gfa = fx.bank.apply(g, &[fa]);
      vec![a, fa, ga, fga, gfa]
    };

    for &s in terms.iter() {
      assert!(!greater(&fx, s, s));
      for &t in terms.iter() {
        if greater(&fx, s, t) {
          assert!(!greater(&fx, t, s), "asymmetry violated");
        }
      }
    }
  }

  #[test]
  fn respects_bindings_under_deref() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let individual = fx.bank.types.individual_type();
    let x = fx.bank.fresh_variable(individual);
    let a = fx.bank.mk_constant("a");
    let fa = fx.bank.apply(f, &[a]);
    let fx_term = fx.bank.apply(f, &[x]);

    // Unbound: f(X) ? f(a) is uncomparable; bound X := a they are equal.
    assert_eq!(
      lpo_compare(&fx.ocb, &fx.bank, fx_term, fa, DerefPolicy::Always, DerefPolicy::Always),
      PartialOrdering::Incomparable
    );

    let mut subst = Substitution::new();
    subst.add_binding(&mut fx.bank, x, a);
    assert_eq!(
      lpo_compare(&fx.ocb, &fx.bank, fx_term, fa, DerefPolicy::Always, DerefPolicy::Always),
      PartialOrdering::Equal
    );
    subst.backtrack_all(&mut fx.bank);
  }
}
