/*!

The term bank owns the signature, the type bank, the variable bank, and the term store, and is
the single entry point for building terms. Construction is bottom-up: every argument must already
be in the bank, and `insert` is idempotent, so two structurally equal terms always come back as
the same `TermIndex`.

The bank also hosts the operations that create new terms from old ones — applying a
substitution, renaming to a variable-disjoint copy, taking an application prefix — as well as the
mark-and-sweep entry points for reclaiming the term DAG.

*/

use sabre_abs::{HashMap, SmallVec};

use crate::{
  terms::{
    cell::{TermCell, TermProperty, DEFAULT_FWEIGHT},
    store::TermStore,
    subst::DerefPolicy,
    symbol::Signature,
    types::TypeBank,
    variables::VarBank,
  },
  FunCode,
  TermIndex,
  TypeIndex,
};

/// Whether the session is a first-order problem or a (lambda-free) higher-order one. Decides
/// whether partial applied-variable matching is available.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProblemType {
  FirstOrder,
  HigherOrder,
}

pub struct TermBank {
  pub sig:   Signature,
  pub types: TypeBank,
  pub vars:  VarBank,
  store:     TermStore,

  problem_type: ProblemType,

  true_term:  TermIndex,
  false_term: TermIndex,
}

impl TermBank {
  pub fn new(problem_type: ProblemType) -> Self {
    let mut types = TypeBank::new();
    let sig = Signature::new(&mut types);
    let mut store = TermStore::new();

    let bool_type = types.bool_type();
    let true_term = store.insert(TermCell::applied(
      crate::terms::symbol::FUNCODE_TRUE,
      bool_type,
      SmallVec::new(),
      DEFAULT_FWEIGHT,
    ));
    let false_term = store.insert(TermCell::applied(
      crate::terms::symbol::FUNCODE_FALSE,
      bool_type,
      SmallVec::new(),
      DEFAULT_FWEIGHT,
    ));

    TermBank {
      sig,
      types,
      vars: VarBank::new(),
      store,
      problem_type,
      true_term,
      false_term,
    }
  }

  #[inline(always)]
  pub fn problem_type(&self) -> ProblemType {
    self.problem_type
  }

  #[inline(always)]
  pub fn true_term(&self) -> TermIndex {
    self.true_term
  }

  #[inline(always)]
  pub fn false_term(&self) -> TermIndex {
    self.false_term
  }

  // region Cell access

  #[inline(always)]
  pub fn cell(&self, term: TermIndex) -> &TermCell {
    self.store.cell(term)
  }

  #[inline(always)]
  pub fn cell_mut(&mut self, term: TermIndex) -> &mut TermCell {
    self.store.cell_mut(term)
  }

  #[inline(always)]
  pub fn f_code(&self, term: TermIndex) -> FunCode {
    self.cell(term).f_code
  }

  #[inline(always)]
  pub fn is_variable(&self, term: TermIndex) -> bool {
    self.cell(term).is_variable()
  }

  #[inline(always)]
  pub fn arity(&self, term: TermIndex) -> usize {
    self.cell(term).arity()
  }

  #[inline(always)]
  pub fn args(&self, term: TermIndex) -> &[TermIndex] {
    &self.cell(term).args
  }

  /// Cached standard weight of the (uninstantiated) term.
  #[inline(always)]
  pub fn weight(&self, term: TermIndex) -> i64 {
    self.cell(term).weight
  }

  #[inline(always)]
  pub fn store(&self) -> &TermStore {
    &self.store
  }

  // endregion

  // region Construction

  /// Inserts an applied term bottom-up. Idempotent: a structurally equal term already present is
  /// returned unchanged. The weight cache and ground flag are established on first insertion.
  pub fn insert(&mut self, f_code: FunCode, typ: TypeIndex, args: &[TermIndex]) -> TermIndex {
    debug_assert!(f_code.is_function());

    if let Some(existing) = self.store.find(f_code, typ, args) {
      return existing;
    }

    let mut weight = DEFAULT_FWEIGHT;
    let mut ground = true;
    for &arg in args {
      let cell = self.store.cell(arg);
      weight += cell.weight;
      ground &= cell.has_property(TermProperty::IsGround) && !cell.is_variable();
    }

    let arg_vec: SmallVec<[TermIndex; 2]> = args.into();
    let index = self.store.insert(TermCell::applied(f_code, typ, arg_vec, weight));
    if ground {
      self.store.cell_mut(index).set_property(TermProperty::IsGround);
    }
    index
  }

  /// Inserts an application of `f_code`, computing the result type from the symbol's type.
  pub fn apply(&mut self, f_code: FunCode, args: &[TermIndex]) -> TermIndex {
    let symbol_type = self.sig.symbol(f_code).typ;
    let typ = self
        .types
        .applied(symbol_type, args.len())
        .unwrap_or(symbol_type);
    self.insert(f_code, typ, args)
  }

  /// Interns a first-order function symbol (all-individual type) and returns its code.
  pub fn mk_symbol(&mut self, name: &str, arity: u32) -> FunCode {
    let individual = self.types.individual_type();
    let domain = vec![individual; arity as usize];
    let typ = self.types.arrow(&domain, individual);
    self.sig.insert(name, arity, typ)
  }

  /// Interns a first-order predicate symbol (boolean range) and returns its code.
  pub fn mk_predicate(&mut self, name: &str, arity: u32) -> FunCode {
    let individual = self.types.individual_type();
    let bool_type = self.types.bool_type();
    let domain = vec![individual; arity as usize];
    let typ = self.types.arrow(&domain, bool_type);
    let code = self.sig.insert(name, arity, typ);
    self.sig.set_property(code, crate::terms::SymbolProperty::Predicate);
    code
  }

  /// Convenience: a nullary symbol applied to nothing.
  pub fn mk_constant(&mut self, name: &str) -> TermIndex {
    let code = self.mk_symbol(name, 0);
    self.apply(code, &[])
  }

  pub fn variable(&mut self, f_code: FunCode, typ: TypeIndex) -> TermIndex {
    self.vars.get_or_alloc(&mut self.store, f_code, typ)
  }

  pub fn fresh_variable(&mut self, typ: TypeIndex) -> TermIndex {
    self.vars.fresh_var(&mut self.store, typ)
  }

  pub fn ext_variable(&mut self, name: &str) -> TermIndex {
    let individual = self.types.individual_type();
    self.vars.ext_name_or_alloc(&mut self.store, name, individual)
  }

  /// Sets the given property on every variable in the bank.
  pub fn variables_set_property(&mut self, property: TermProperty) {
    self.vars.set_property_all(&mut self.store, property);
  }

  /// Clears the given property on every variable in the bank.
  pub fn variables_clear_property(&mut self, property: TermProperty) {
    self.vars.clear_property_all(&mut self.store, property);
  }

  // endregion

  // region Dereferencing and queries

  /// Follows variable bindings according to the policy.
  pub fn deref(&self, mut term: TermIndex, policy: DerefPolicy) -> TermIndex {
    match policy {
      DerefPolicy::Never => term,
      DerefPolicy::Once => {
        let cell = self.cell(term);
        if cell.is_variable() {
          if let Some(binding) = cell.binding {
            return binding;
          }
        }
        term
      }
      DerefPolicy::Always => loop {
        let cell = self.cell(term);
        match cell.binding {
          Some(binding) if cell.is_variable() => term = binding,
          _ => return term,
        }
      },
    }
  }

  /// True if `var` occurs in `superterm` after dereferencing all bindings.
  pub fn var_occurs(&self, superterm: TermIndex, var: TermIndex) -> bool {
    debug_assert!(self.is_variable(var));
    let mut stack = vec![superterm];

    while let Some(term) = stack.pop() {
      let term = self.deref(term, DerefPolicy::Always);
      if term == var {
        return true;
      }
      stack.extend_from_slice(self.args(term));
    }
    false
  }

  /// True if `sub` is a subterm of `superterm` (not necessarily proper), under the given policy.
  pub fn is_subterm(&self, superterm: TermIndex, sub: TermIndex, policy: DerefPolicy) -> bool {
    let mut stack = vec![(superterm, policy)];

    while let Some((term, policy)) = stack.pop() {
      let term = self.deref(term, policy);
      if term == sub {
        return true;
      }
      let next = policy.next();
      stack.extend(self.args(term).iter().map(|&arg| (arg, next)));
    }
    false
  }

  /// Counts how often each variable occurs in `term`, following bindings per the policy.
  pub fn var_occurrences(&self, term: TermIndex, policy: DerefPolicy, counts: &mut HashMap<FunCode, usize>) {
    let mut stack = vec![(term, policy)];

    while let Some((term, policy)) = stack.pop() {
      let term = self.deref(term, policy);
      let cell = self.cell(term);
      if cell.is_variable() {
        *counts.entry(cell.f_code).or_insert(0) += 1;
      } else {
        let next = policy.next();
        stack.extend(cell.args.iter().map(|&arg| (arg, next)));
      }
    }
  }

  /// Collects the distinct variables of `term` (no dereferencing) into `out`, preorder, each
  /// once.
  pub fn collect_variables(&self, term: TermIndex, out: &mut Vec<TermIndex>) {
    let mut stack = vec![term];
    while let Some(term) = stack.pop() {
      let cell = self.cell(term);
      if cell.is_variable() {
        if !out.contains(&term) {
          out.push(term);
        }
      } else {
        stack.extend(cell.args.iter().rev().copied());
      }
    }
  }

  // endregion

  // region Derived construction

  /// Rebuilds `term` with all current bindings applied, inserting the result. Unbound variables
  /// stay themselves; if nothing is bound the original index comes back.
  pub fn insert_instantiated(&mut self, term: TermIndex) -> TermIndex {
    let term = self.deref(term, DerefPolicy::Always);
    let cell = self.cell(term);
    if cell.is_variable() {
      return term;
    }
    if cell.has_property(TermProperty::IsGround) {
      return term;
    }

    let f_code = cell.f_code;
    let typ = cell.typ;
    let args: SmallVec<[TermIndex; 2]> = cell.args.clone();

    let mut new_args: SmallVec<[TermIndex; 2]> = SmallVec::with_capacity(args.len());
    let mut changed = false;
    for &arg in args.iter() {
      let new_arg = self.insert_instantiated(arg);
      changed |= new_arg != arg;
      new_args.push(new_arg);
    }

    if changed {
      self.insert(f_code, typ, &new_args)
    } else {
      term
    }
  }

  /// Copies `term` replacing every (even-coded) variable by its odd-coded twin, yielding a term
  /// guaranteed variable-disjoint from any term over dispensed variables.
  pub fn insert_renamed_disjoint(&mut self, term: TermIndex) -> TermIndex {
    let cell = self.cell(term);
    if cell.is_variable() {
      let f_code = cell.f_code;
      let typ = cell.typ;
      debug_assert!(f_code.0 % 2 == 0, "renaming an already-renamed variable");
      return self.variable(FunCode(f_code.0 - 1), typ);
    }

    let f_code = cell.f_code;
    let typ = cell.typ;
    let args: SmallVec<[TermIndex; 2]> = cell.args.clone();

    let mut new_args: SmallVec<[TermIndex; 2]> = SmallVec::with_capacity(args.len());
    for &arg in args.iter() {
      new_args.push(self.insert_renamed_disjoint(arg));
    }
    self.insert(f_code, typ, &new_args)
  }

  /// The prefix of an application keeping the first `keep` arguments. The prefix's type extends
  /// the original result type by the dropped argument types. Used by partial higher-order
  /// matching.
  pub fn insert_prefix(&mut self, term: TermIndex, keep: usize) -> TermIndex {
    let cell = self.cell(term);
    debug_assert!(!cell.is_variable());
    debug_assert!(keep <= cell.arity());
    if keep == cell.arity() {
      return term;
    }

    let f_code = cell.f_code;
    let full_type = cell.typ;
    let args: SmallVec<[TermIndex; 2]> = cell.args.clone();

    let dropped: Vec<TypeIndex> = args[keep..].iter().map(|&arg| self.cell(arg).typ).collect();
    let typ = self.types.arrow(&dropped, full_type);
    self.insert(f_code, typ, &args[..keep])
  }

  // endregion

  // region Garbage collection

  /// Flags every shared cell as garbage; a marking traversal then rescues the reachable ones.
  /// The built-in atoms are rescued immediately.
  pub fn gc_begin(&mut self) {
    self.store.set_property_all(TermProperty::GarbageFlag);
    let true_term = self.true_term;
    let false_term = self.false_term;
    self.gc_mark(true_term);
    self.gc_mark(false_term);
  }

  /// Rescues `term` and all its subterms from the pending sweep.
  pub fn gc_mark(&mut self, term: TermIndex) {
    let mut stack = vec![term];
    while let Some(term) = stack.pop() {
      let cell = self.store.cell_mut(term);
      if cell.has_property(TermProperty::GarbageFlag) {
        cell.clear_property(TermProperty::GarbageFlag);
        stack.extend_from_slice(&cell.args);
      }
    }
  }

  /// Reclaims all cells still flagged, returning the number recovered.
  pub fn gc_sweep(&mut self) -> usize {
    self.store.sweep()
  }

  // endregion

  // region Printing

  /// Renders a term in prefix form, `f(a,X2)`, dereferencing per the policy.
  pub fn term_str(&self, term: TermIndex, policy: DerefPolicy) -> String {
    let mut out = String::new();
    self.write_term(&mut out, term, policy);
    out
  }

  fn write_term(&self, out: &mut String, term: TermIndex, policy: DerefPolicy) {
    let term = self.deref(term, policy);
    let cell = self.cell(term);

    if cell.is_variable() {
      out.push('X');
      out.push_str(&(-cell.f_code.0).to_string());
      return;
    }

    out.push_str(self.sig.name(cell.f_code));
    if !cell.args.is_empty() {
      let next = policy.next();
      out.push('(');
      for (i, &arg) in cell.args.iter().enumerate() {
        if i > 0 {
          out.push(',');
        }
        self.write_term(out, arg, next);
      }
      out.push(')');
    }
  }

  // endregion
}
