//! End-to-end exercises of the core engine: perfect sharing, matching and unification through
//! the shared variable bank, the two orderings, AC equality, and unit simplification against an
//! indexed unit set.

use rand::Rng;

use sabre_lib::clauses::{
  clause_simplify_with_unit_set,
  Clause,
  ClauseSet,
  Eqn,
  UnitSimplifyMode,
};
use sabre_lib::orderings::{kbo_greater, lpo_greater, Ocb, OrderingKind};
use sabre_lib::terms::{
  ac_equal,
  DerefPolicy,
  ProblemType,
  Substitution,
  SymbolProperty,
  TermBank,
};
use sabre_lib::unify::{compute_match, compute_mgu};
use sabre_lib::TermIndex;

#[test]
fn double_insertion_shares_perfectly() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let a = bank.mk_constant("a");
  let b = bank.mk_constant("b");
  let f = bank.mk_symbol("f", 2);

  let before = bank.store().entries();
  let first = bank.apply(f, &[a, b]);
  let second = bank.apply(f, &[a, b]);

  assert_eq!(first, second);
  assert_eq!(bank.store().entries(), before + 1);
}

#[test]
fn match_binds_and_backtracking_restores() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let individual = bank.types.individual_type();
  let x = bank.fresh_variable(individual);
  let a = bank.mk_constant("a");
  let b = bank.mk_constant("b");
  let f = bank.mk_symbol("f", 2);

  let pattern = bank.apply(f, &[x, a]);
  let target = bank.apply(f, &[b, a]);

  let mut subst = Substitution::new();
  assert!(compute_match(&mut bank, &mut subst, pattern, target));
  assert_eq!(bank.cell(x).binding, Some(b));

  subst.backtrack_all(&mut bank);
  assert_eq!(bank.cell(x).binding, None);
}

#[test]
fn mgu_chains_bindings() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let individual = bank.types.individual_type();
  let x = bank.fresh_variable(individual);
  let y = bank.fresh_variable(individual);
  let a = bank.mk_constant("a");
  let g = bank.mk_symbol("g", 2);

  let s = bank.apply(g, &[x, y]);
  let t = bank.apply(g, &[y, a]);

  let mut subst = Substitution::new();
  assert!(compute_mgu(&mut bank, &mut subst, s, t));
  assert_eq!(bank.deref(x, DerefPolicy::Always), a);
  assert_eq!(bank.deref(y, DerefPolicy::Always), a);
  subst.backtrack_all(&mut bank);
}

#[test]
fn lpo_orders_by_head_precedence() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let f = bank.mk_symbol("f", 1);
  let g = bank.mk_symbol("g", 1);
  let a_code = bank.mk_symbol("a", 0);

  let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);
  ocb.set_precedence_rank(f, 30);
  ocb.set_precedence_rank(g, 20);
  ocb.set_precedence_rank(a_code, 10);

  let a = bank.apply(a_code, &[]);
  let ga = bank.apply(g, &[a]);
  let fga = bank.apply(f, &[ga]);
  let fa = bank.apply(f, &[a]);
  let gfa = bank.apply(g, &[fa]);

  assert!(lpo_greater(&ocb, &bank, fga, gfa, DerefPolicy::Never, DerefPolicy::Never));
  assert!(!lpo_greater(&ocb, &bank, gfa, fga, DerefPolicy::Never, DerefPolicy::Never));
}

#[test]
fn kbo_breaks_weight_ties_by_precedence() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let f = bank.mk_symbol("f", 1);
  let g = bank.mk_symbol("g", 1);
  let a_code = bank.mk_symbol("a", 0);

  let mut ocb = Ocb::new(OrderingKind::Kbo, &bank.sig);
  ocb.set_precedence_rank(f, 30);
  ocb.set_precedence_rank(g, 20);
  ocb.set_precedence_rank(a_code, 10);
  for code in [f, g, a_code] {
    ocb.set_weight(code, 1);
  }
  ocb.var_weight = 1;
  assert!(ocb.kbo_admissible(&bank.sig));

  let a = bank.apply(a_code, &[]);
  let fa = bank.apply(f, &[a]);
  let ffa = bank.apply(f, &[fa]);
  let ga = bank.apply(g, &[a]);
  let gga = bank.apply(g, &[ga]);

  assert!(kbo_greater(&ocb, &bank, ffa, gga, DerefPolicy::Never, DerefPolicy::Never));
  assert!(!kbo_greater(&ocb, &bank, gga, ffa, DerefPolicy::Never, DerefPolicy::Never));
}

#[test]
fn ac_equality_ignores_nesting_and_order() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let f = bank.mk_symbol("f", 2);
  bank.sig.set_property(f, SymbolProperty::Associative);
  bank.sig.set_property(f, SymbolProperty::Commutative);
  let a = bank.mk_constant("a");
  let b = bank.mk_constant("b");
  let c = bank.mk_constant("c");

  let fab = bank.apply(f, &[a, b]);
  let left = bank.apply(f, &[fab, c]);
  let fba = bank.apply(f, &[b, a]);
  let right = bank.apply(f, &[c, fba]);
  assert!(ac_equal(&bank, left, right));

  let a_prime = bank.mk_constant("a_prime");
  let fapb = bank.apply(f, &[a_prime, b]);
  let broken = bank.apply(f, &[fapb, c]);
  assert!(!ac_equal(&bank, broken, right));
}

#[test]
fn unit_set_simplifies_derived_clause() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let individual = bank.types.individual_type();
  let x = bank.fresh_variable(individual);
  let f = bank.mk_symbol("f", 1);
  let a = bank.mk_constant("a");
  let b = bank.mk_constant("b");
  let fx = bank.apply(f, &[x]);

  // Units: f(X) = a.
  let mut units = ClauseSet::with_demod_index();
  let unit_eqn = Eqn::new(&mut bank, fx, a, true);
  units.insert(&bank, Clause::new(vec![unit_eqn]));

  // f(b) ≠ a ∨ b = a is cut down to its second literal, then b = a survives.
  let fb = bank.apply(f, &[b]);
  let eqn1 = Eqn::new(&mut bank, fb, a, false);
  let eqn2 = Eqn::new(&mut bank, b, a, true);
  let mut clause = Clause::new(vec![eqn1, eqn2]);

  let kept = clause_simplify_with_unit_set(&mut bank, &mut clause, &mut units, UnitSimplifyMode::FullSimplify);
  assert!(kept);
  assert_eq!(clause.literal_count(), 1);
  assert_eq!(clause.pos_lit_no(), 1);

  // f(b) = a alone is subsumed.
  let eqn = Eqn::new(&mut bank, fb, a, true);
  let mut subsumed = Clause::new(vec![eqn]);
  let kept = clause_simplify_with_unit_set(&mut bank, &mut subsumed, &mut units, UnitSimplifyMode::TopSimplify);
  assert!(!kept);
}

/// Builds a random term over unary-to-ternary symbols and two constants.
fn random_term(bank: &mut TermBank, depth: usize, rng: &mut impl Rng) -> TermIndex {
  if depth == 0 || rng.random_range(0..4) == 0 {
    let name = if rng.random_bool(0.5) { "c0" } else { "c1" };
    return bank.mk_constant(name);
  }
  let arity = rng.random_range(1..=3u32);
  let code = bank.mk_symbol(&format!("h{}", arity), arity);
  let args: Vec<TermIndex> = (0..arity).map(|_| random_term(bank, depth - 1, rng)).collect();
  bank.apply(code, &args)
}

#[test]
fn random_terms_share_and_survive_sweeps() {
  let mut bank = TermBank::new(ProblemType::FirstOrder);
  let mut rng = rand::rng();
  let mut live = Vec::new();

  for round in 0..50 {
    let term = random_term(&mut bank, 4, &mut rng);
    // Re-inserting the instantiated copy of an unbound term is the identity.
    assert_eq!(bank.insert_instantiated(term), term);
    if round % 2 == 0 {
      live.push(term);
    }
  }

  bank.gc_begin();
  for &term in live.iter() {
    bank.gc_mark(term);
  }
  bank.gc_sweep();

  // Every survivor is still findable, bit for bit.
  for &term in live.iter() {
    let cell = bank.cell(term);
    let found = bank.store().find(cell.f_code, cell.typ, &cell.args);
    assert_eq!(found, Some(term));
  }
}
