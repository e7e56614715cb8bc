/*!

Management of shared variables.

A variable bank holds two indices: one associating external (source-language) names with variable
cells, used during parsing and possibly incomplete, and one associating `(f_code, type)` pairs
with cells, which is complete. Variables are shared at most once per `(f_code, type)` pair.

The fresh-variable dispenser only hands out even negative codes; odd codes are reserved for
building rename-to-disjoint copies of clauses. Codes at or beyond [`FRESH_VAR_LIMIT`] in magnitude
denote prover-created variables that must never be confused with source-language variables.

*/

use sabre_abs::{HashMap, IString};

use crate::{
  terms::{
    cell::TermCell,
    store::TermStore,
    TermProperty,
  },
  FunCode,
  TermIndex,
  TypeIndex,
};

/// Variable codes with magnitude at or above this limit are reserved for fresh variables.
pub const FRESH_VAR_LIMIT: i64 = 1024;

#[derive(Clone, Debug, Default)]
pub struct VarBank {
  /// `(f_code, type)` → cell. Complete: every variable the bank ever created is here.
  code_index: HashMap<(FunCode, TypeIndex), TermIndex>,
  /// External name → cell. Only covers parsed variables; reset between input units.
  ext_index: HashMap<IString, TermIndex>,

  /// Counter driving [`fresh_var`](VarBank::fresh_var); the next fresh code is
  /// `-(v_count + 2)`.
  v_count: i64,
  /// Largest code magnitude ever dispensed.
  max_var: i64,
}

impl VarBank {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn find(&self, f_code: FunCode, typ: TypeIndex) -> Option<TermIndex> {
    debug_assert!(f_code.is_variable());
    self.code_index.get(&(f_code, typ)).copied()
  }

  /// Returns the variable with the given code and type, creating it if it does not exist.
  pub fn get_or_alloc(&mut self, store: &mut TermStore, f_code: FunCode, typ: TypeIndex) -> TermIndex {
    debug_assert!(f_code.is_variable());
    if let Some(var) = self.find(f_code, typ) {
      return var;
    }

    let var = store.alloc_unshared(TermCell::variable(f_code, typ));
    self.code_index.insert((f_code, typ), var);
    self.max_var = self.max_var.max(-f_code.0);
    var
  }

  /// Returns the next fresh variable of the given type. Only even codes are dispensed; freshness
  /// is only guaranteed if explicit `get_or_alloc` calls are not mixed in with larger even codes.
  pub fn fresh_var(&mut self, store: &mut TermStore, typ: TypeIndex) -> TermIndex {
    self.v_count += 2;
    self.get_or_alloc(store, FunCode(-self.v_count), typ)
  }

  #[inline(always)]
  pub fn find_by_ext_name(&self, name: &str) -> Option<TermIndex> {
    self.ext_index.get(&IString::from(name)).copied()
  }

  /// Returns the variable with the given external name, allocating a fresh one if none exists.
  pub fn ext_name_or_alloc(&mut self, store: &mut TermStore, name: &str, typ: TypeIndex) -> TermIndex {
    if let Some(var) = self.find_by_ext_name(name) {
      return var;
    }
    let var = self.fresh_var(store, typ);
    self.ext_index.insert(IString::from(name), var);
    var
  }

  /// Resets the external-name association and the fresh-variable counter.
  pub fn clear_ext_names(&mut self) {
    self.clear_ext_names_no_reset();
    self.v_count = 0;
  }

  /// Resets the external-name association but keeps the counter running.
  pub fn clear_ext_names_no_reset(&mut self) {
    self.ext_index.clear();
  }

  pub fn set_property_all(&self, store: &mut TermStore, property: TermProperty) {
    for &var in self.code_index.values() {
      store.cell_mut(var).set_property(property);
    }
  }

  pub fn clear_property_all(&self, store: &mut TermStore, property: TermProperty) {
    for &var in self.code_index.values() {
      store.cell_mut(var).clear_property(property);
    }
  }

  /// Number of existing variables.
  #[inline(always)]
  pub fn cardinality(&self) -> usize {
    self.code_index.len()
  }

  #[inline(always)]
  pub fn max_var(&self) -> i64 {
    self.max_var
  }

  #[inline(always)]
  pub fn v_count(&self) -> i64 {
    self.v_count
  }

  pub fn set_v_count(&mut self, count: i64) {
    debug_assert!(count >= 0 && count % 2 == 0);
    self.v_count = self.v_count.max(count);
  }

  pub fn iter(&self) -> impl Iterator<Item = TermIndex> + '_ {
    self.code_index.values().copied()
  }
}

/// True for codes reserved for prover-created ("fresh") variables.
#[inline(always)]
pub fn var_code_is_fresh(f_code: FunCode) -> bool {
  f_code.0 <= -FRESH_VAR_LIMIT
}
