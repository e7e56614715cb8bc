/*!

The term store implements perfect sharing of applied term cells. Two cells with the same
`(f_code, type, children…)` are the same cell; property bits are part of neither equality nor
identity. Any mapping with near-constant lookup satisfies the contract, so the store keys an
exact structural map rather than bucketed comparison trees; entry and argument counts are kept
for diagnostics.

Variables are allocated in the same arena but are owned by the variable bank and never appear in
the sharing map, so a sweep cannot reclaim them.

*/

use sabre_abs::{HashMap, SmallVec};

use crate::{
  terms::cell::{TermCell, TermProperty},
  FunCode,
  TermIndex,
  TypeIndex,
};

type StructuralKey = (FunCode, TypeIndex, SmallVec<[TermIndex; 2]>);

#[derive(Clone, Debug, Default)]
pub struct TermStore {
  cells: Vec<TermCell>,
  free:  Vec<TermIndex>,
  cons:  HashMap<StructuralKey, TermIndex>,

  entries:   usize,
  arg_count: usize,
}

impl TermStore {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn cell(&self, index: TermIndex) -> &TermCell {
    &self.cells[index.idx()]
  }

  #[inline(always)]
  pub fn cell_mut(&mut self, index: TermIndex) -> &mut TermCell {
    &mut self.cells[index.idx()]
  }

  /// Allocates a cell outside the sharing map. Used by the variable bank, which shares variables
  /// by `(f_code, type)` on its own.
  pub fn alloc_unshared(&mut self, cell: TermCell) -> TermIndex {
    self.place(cell)
  }

  /// Finds the shared cell for the given structural key.
  pub fn find(&self, f_code: FunCode, typ: TypeIndex, args: &[TermIndex]) -> Option<TermIndex> {
    let key: StructuralKey = (f_code, typ, args.into());
    self.cons.get(&key).copied()
  }

  /// Insert-or-find: a structurally equal cell already present is returned unchanged. All child
  /// indexes must already be in the store (bottom-up construction).
  pub fn insert(&mut self, cell: TermCell) -> TermIndex {
    debug_assert!(cell.f_code.is_function(), "variables are not hash-consed here");
    debug_assert!(cell.args.iter().all(|arg| arg.idx() < self.cells.len()));

    let key: StructuralKey = (cell.f_code, cell.typ, cell.args.clone());
    if let Some(&existing) = self.cons.get(&key) {
      return existing;
    }

    let arity = cell.arity();
    let index = self.place(cell);
    self.cons.insert(key, index);
    self.entries += 1;
    self.arg_count += arity;
    index
  }

  /// Removes a cell from the sharing map and frees its slot. Returns false if the cell was not
  /// a shared applied cell.
  pub fn extract(&mut self, index: TermIndex) -> bool {
    let cell = &self.cells[index.idx()];
    if cell.is_variable() {
      return false;
    }
    let key: StructuralKey = (cell.f_code, cell.typ, cell.args.clone());
    if self.cons.remove(&key).is_none() {
      return false;
    }
    self.entries -= 1;
    self.arg_count -= self.cells[index.idx()].arity();
    self.free.push(index);
    true
  }

  /// Sets the given property on every shared cell.
  pub fn set_property_all(&mut self, property: TermProperty) {
    for &index in self.cons.values() {
      self.cells[index.idx()].set_property(property);
    }
  }

  /// Clears the given property on every shared cell.
  pub fn clear_property_all(&mut self, property: TermProperty) {
    for &index in self.cons.values() {
      self.cells[index.idx()].clear_property(property);
    }
  }

  /// Reclaims every shared cell still carrying the garbage flag and returns the number of cells
  /// recovered. Collection of flagged cells is separated from deletion so the sharing map is
  /// never reorganized mid-walk.
  pub fn sweep(&mut self) -> usize {
    let doomed: Vec<TermIndex> = self
        .cons
        .values()
        .copied()
        .filter(|&index| self.cells[index.idx()].has_property(TermProperty::GarbageFlag))
        .collect();

    for &index in doomed.iter() {
      let removed = self.extract(index);
      debug_assert!(removed);
    }
    doomed.len()
  }

  /// Number of shared applied cells.
  #[inline(always)]
  pub fn entries(&self) -> usize {
    self.entries
  }

  /// Total argument count over all shared cells.
  #[inline(always)]
  pub fn arg_count(&self) -> usize {
    self.arg_count
  }

  pub fn iter_shared(&self) -> impl Iterator<Item = TermIndex> + '_ {
    self.cons.values().copied()
  }

  fn place(&mut self, cell: TermCell) -> TermIndex {
    match self.free.pop() {
      Some(index) => {
        self.cells[index.idx()] = cell;
        index
      }
      None => {
        let index = TermIndex::from_usize(self.cells.len());
        self.cells.push(cell);
        index
      }
    }
  }
}
