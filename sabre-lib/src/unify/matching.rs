/*!

One-shot matching: extend a substitution σ so that σ(pattern) equals the target, instantiating
only pattern variables. The target is never dereferenced. The weight cache gives a fail-fast:
whenever the pattern's weight under the bindings so far exceeds the target's, no match can exist.

The possibly-partial variant serves the lambda-free higher-order build: a pattern variable may
match a prefix of an application, leaving a trailing argument suffix for the caller to compare.

*/

use crate::{
  terms::{ProblemType, Substitution, TermBank, TermProperty, DEFAULT_VWEIGHT},
  TermIndex,
};

/// Tries to extend `subst` so that the instantiated pattern equals `to_match`. Returns true on
/// success (the substitution then needs to be backtracked by the caller); on failure the
/// substitution is restored. Pre-existing bindings of pattern variables are checked by
/// shared-term equality.
pub fn compute_match(
  bank: &mut TermBank,
  subst: &mut Substitution,
  matcher: TermIndex,
  to_match: TermIndex,
) -> bool {
  let mut matcher_weight = bank.weight(matcher);
  let to_match_weight = bank.weight(to_match);

  if matcher_weight > to_match_weight {
    return false;
  }
  if bank.cell(to_match).has_property(TermProperty::PredPos) && bank.is_variable(matcher) {
    return false;
  }

  let backtrack = subst.mark();
  let mut jobs: Vec<(TermIndex, TermIndex)> = vec![(matcher, to_match)];
  let mut result = true;

  while let Some((matcher, to_match)) = jobs.pop() {
    if bank.is_variable(matcher) {
      match bank.cell(matcher).binding {
        Some(binding) => {
          if binding != to_match {
            result = false;
            break;
          }
        }
        None => {
          if bank.cell(matcher).typ != bank.cell(to_match).typ {
            result = false;
            break;
          }
          subst.add_binding(bank, matcher, to_match);
        }
      }
      matcher_weight += bank.weight(to_match) - DEFAULT_VWEIGHT;
      if matcher_weight > to_match_weight {
        result = false;
        break;
      }
    } else {
      if bank.f_code(matcher) != bank.f_code(to_match) || bank.arity(matcher) != bank.arity(to_match) {
        result = false;
        break;
      }
      for i in (0..bank.arity(matcher)).rev() {
        jobs.push((bank.args(matcher)[i], bank.args(to_match)[i]));
      }
    }
  }

  if !result {
    subst.backtrack_to(bank, backtrack);
  }
  result
}

/// Matching where a pattern variable may consume only a prefix of the target application.
/// Returns the number of target arguments left over (0 for a complete match), or `None` if no
/// match exists. In a first-order session this is exactly [`compute_match`].
pub fn match_possibly_partial(
  bank: &mut TermBank,
  subst: &mut Substitution,
  matcher: TermIndex,
  to_match: TermIndex,
) -> Option<usize> {
  if bank.problem_type() == ProblemType::FirstOrder || !bank.is_variable(matcher) {
    return compute_match(bank, subst, matcher, to_match).then_some(0);
  }

  if bank.cell(to_match).has_property(TermProperty::PredPos) {
    return None;
  }

  let var_type = bank.cell(matcher).typ;
  let target_arity = bank.arity(to_match);

  match bank.cell(matcher).binding {
    Some(binding) => {
      // The binding must be the target itself or one of its prefixes.
      for remaining in 0..=target_arity {
        let prefix = bank.insert_prefix(to_match, target_arity - remaining);
        if prefix == binding {
          return Some(remaining);
        }
      }
      None
    }
    None => {
      if var_type == bank.cell(to_match).typ {
        subst.add_binding(bank, matcher, to_match);
        return Some(0);
      }
      // Find the (unique, type-directed) prefix the variable can bind to.
      for remaining in 1..=target_arity {
        let prefix = bank.insert_prefix(to_match, target_arity - remaining);
        if bank.cell(prefix).typ == var_type {
          subst.add_binding(bank, matcher, prefix);
          return Some(remaining);
        }
      }
      None
    }
  }
}

/// True if the last `remaining` arguments of both terms agree pairwise. Suffixes are compared by
/// shared-term identity, which the bank's perfect sharing makes sound.
pub fn remaining_args_same(bank: &TermBank, t1: TermIndex, t2: TermIndex, remaining: usize) -> bool {
  let arity1 = bank.arity(t1);
  let arity2 = bank.arity(t2);
  if remaining > arity1 || remaining > arity2 {
    return false;
  }

  (0..remaining).all(|i| bank.args(t1)[arity1 - remaining + i] == bank.args(t2)[arity2 - remaining + i])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::terms::DerefPolicy;

  #[test]
  fn simple_match_binds_and_backtracks() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let f = bank.mk_symbol("f", 2);

    // f(X,a) matches f(b,a) with X := b.
    let pattern = bank.apply(f, &[x, a]);
    let target = bank.apply(f, &[b, a]);

    let mut subst = Substitution::new();
    assert!(compute_match(&mut bank, &mut subst, pattern, target));
    assert_eq!(bank.cell(x).binding, Some(b));
    assert_eq!(bank.deref(x, DerefPolicy::Once), b);

    subst.backtrack_all(&mut bank);
    assert_eq!(bank.cell(x).binding, None);
  }

  #[test]
  fn identical_terms_match_without_bindings() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let a = bank.mk_constant("a");
    let f = bank.mk_symbol("f", 1);
    let fa = bank.apply(f, &[a]);

    let mut subst = Substitution::new();
    assert!(compute_match(&mut bank, &mut subst, fa, fa));
    assert!(subst.is_empty());
  }

  #[test]
  fn nonlinear_pattern_requires_equal_targets() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let f = bank.mk_symbol("f", 2);

    let pattern = bank.apply(f, &[x, x]);
    let same = bank.apply(f, &[a, a]);
    let different = bank.apply(f, &[a, b]);

    let mut subst = Substitution::new();
    assert!(compute_match(&mut bank, &mut subst, pattern, same));
    subst.backtrack_all(&mut bank);

    assert!(!compute_match(&mut bank, &mut subst, pattern, different));
    assert!(subst.is_empty());
    assert_eq!(bank.cell(x).binding, None);
  }

  #[test]
  fn weight_fail_fast_rejects_heavy_patterns() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let a = bank.mk_constant("a");
    let f = bank.mk_symbol("f", 1);
    let fa = bank.apply(f, &[a]);
    let ffa = bank.apply(f, &[fa]);

    let mut subst = Substitution::new();
    assert!(!compute_match(&mut bank, &mut subst, ffa, fa));
  }

  #[test]
  fn variable_never_matches_predicate_position() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let p = bank.mk_predicate("p", 0);
    let atom = bank.apply(p, &[]);
    bank.cell_mut(atom).set_property(TermProperty::PredPos);

    let mut subst = Substitution::new();
    assert!(!compute_match(&mut bank, &mut subst, x, atom));
  }

  #[test]
  fn partial_match_consumes_a_prefix() {
    let mut bank = TermBank::new(ProblemType::HigherOrder);
    let individual = bank.types.individual_type();

    // f : i × i → i applied as f(a,b); F : i → i can take the prefix f(a).
    let f = bank.mk_symbol("f", 2);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let target = bank.apply(f, &[a, b]);

    let fun_type = bank.types.arrow(&[individual], individual);
    let big_f = bank.fresh_variable(fun_type);

    let mut subst = Substitution::new();
    let remaining = match_possibly_partial(&mut bank, &mut subst, big_f, target);
    assert_eq!(remaining, Some(1));

    let binding = bank.cell(big_f).binding.unwrap();
    assert_eq!(bank.f_code(binding), f);
    assert_eq!(bank.args(binding), &[a]);
    subst.backtrack_all(&mut bank);
  }

  #[test]
  fn remaining_suffixes_compare_by_identity() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 2);
    let g = bank.mk_symbol("g", 2);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");

    let fab = bank.apply(f, &[a, b]);
    let gab = bank.apply(g, &[a, b]);
    let gaa = bank.apply(g, &[a, a]);

    assert!(remaining_args_same(&bank, fab, gab, 2));
    assert!(remaining_args_same(&bank, fab, gaa, 0));
    assert!(!remaining_args_same(&bank, fab, gaa, 1));
  }
}
