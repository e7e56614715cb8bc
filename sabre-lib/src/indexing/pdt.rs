/*!

Perfect discrimination trees.

Tree paths spell the preorder symbol string of the indexed patterns; variables label their own
arcs (patterns over the perfectly shared variable bank need no renaming, hence "perfect").
Terminal nodes carry the entries whose pattern ends there. Retrieval walks the query term in
lockstep with the tree, binding pattern variables into a caller-provided substitution, and is
iterator-shaped: [`PdtSearch::next_match`] yields one candidate at a time and backtracks the
substitution between alternatives, so the outer loop can stop at any yield.

The main client indexes demodulators (unit rewrite rules) by their left-hand sides; entries
carry a date so retrieval can be restricted to rules a term's normal form has not seen yet.

*/

use sabre_abs::HashMap;

use crate::{
  terms::{Substitution, TermBank},
  FunCode,
  SysDate,
  TermIndex,
};

#[derive(Clone, Debug)]
pub struct PdtEntry<P> {
  pub pattern: TermIndex,
  pub date:    SysDate,
  pub payload: P,
}

#[derive(Clone, Debug)]
struct PdtNode<P> {
  f_arcs:   HashMap<FunCode, usize>,
  var_arcs: HashMap<TermIndex, usize>,
  entries:  Vec<PdtEntry<P>>,
}

impl<P> PdtNode<P> {
  fn new() -> Self {
    PdtNode {
      f_arcs:   HashMap::new(),
      var_arcs: HashMap::new(),
      entries:  Vec::new(),
    }
  }
}

#[derive(Clone, Debug)]
pub struct PdTree<P> {
  nodes:       Vec<PdtNode<P>>,
  entry_count: usize,
}

impl<P: Clone> PdTree<P> {
  pub fn new() -> Self {
    PdTree {
      nodes:       vec![PdtNode::new()],
      entry_count: 0,
    }
  }

  #[inline(always)]
  pub fn entry_count(&self) -> usize {
    self.entry_count
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.entry_count == 0
  }

  pub fn insert(&mut self, bank: &TermBank, pattern: TermIndex, payload: P) {
    self.insert_dated(bank, pattern, SysDate::creation(), payload);
  }

  /// Inserts `payload` under the preorder path of `pattern`.
  pub fn insert_dated(&mut self, bank: &TermBank, pattern: TermIndex, date: SysDate, payload: P) {
    let node = self.walk_path(bank, pattern, true).expect("path creation cannot fail");
    self.nodes[node].entries.push(PdtEntry { pattern, date, payload });
    self.entry_count += 1;
  }

  /// Removes all entries for `pattern` whose payload satisfies the predicate; returns how many
  /// were removed. Interior nodes are left in place.
  pub fn delete(&mut self, bank: &TermBank, pattern: TermIndex, predicate: impl Fn(&P) -> bool) -> usize {
    let Some(node) = self.walk_path(bank, pattern, false) else {
      return 0;
    };
    let entries = &mut self.nodes[node].entries;
    let before = entries.len();
    entries.retain(|entry| entry.pattern != pattern || !predicate(&entry.payload));
    let removed = before - entries.len();
    self.entry_count -= removed;
    removed
  }

  /// Follows (optionally creating) the arc path spelled by `pattern`; returns the final node.
  fn walk_path(&mut self, bank: &TermBank, pattern: TermIndex, create: bool) -> Option<usize> {
    let mut node = 0;
    let mut stack = vec![pattern];

    while let Some(term) = stack.pop() {
      let cell = bank.cell(term);
      let next = if cell.is_variable() {
        match self.nodes[node].var_arcs.get(&term) {
          Some(&child) => Some(child),
          None if create => {
            let child = self.alloc_node();
            self.nodes[node].var_arcs.insert(term, child);
            Some(child)
          }
          None => None,
        }
      } else {
        for &arg in cell.args.iter().rev() {
          stack.push(arg);
        }
        match self.nodes[node].f_arcs.get(&cell.f_code) {
          Some(&child) => Some(child),
          None if create => {
            let child = self.alloc_node();
            self.nodes[node].f_arcs.insert(cell.f_code, child);
            Some(child)
          }
          None => None,
        }
      };
      node = next?;
    }
    Some(node)
  }

  fn alloc_node(&mut self) -> usize {
    self.nodes.push(PdtNode::new());
    self.nodes.len() - 1
  }
}

impl<P: Clone> Default for PdTree<P> {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Copy, Clone, Debug)]
enum Alt {
  /// Follow the function arc matching the query head.
  Fun(usize),
  /// Bind (or check) the pattern variable against the query head.
  Var(TermIndex, usize),
}

struct SearchFrame {
  node:  usize,
  /// Remaining query subterms, top of stack last.
  terms: Vec<TermIndex>,
  alts:     Vec<Alt>,
  next_alt: usize,
  entry_cursor: usize,
  /// Substitution mark taken when this frame was entered.
  mark: usize,
}

/// Backtracking retrieval of all indexed patterns that match onto the query term. Candidates are
/// offered in arbitrary order.
pub struct PdtSearch {
  frames: Vec<SearchFrame>,
  /// When set, only entries strictly newer than this date are returned.
  date_limit: Option<SysDate>,
  /// Substitution mark at search start; abort and exhaustion restore to here.
  base_mark: usize,
}

impl PdtSearch {
  pub fn new<P: Clone>(tree: &PdTree<P>, bank: &TermBank, subst: &Substitution, query: TermIndex) -> Self {
    Self::with_date_limit(tree, bank, subst, query, None)
  }

  pub fn with_date_limit<P: Clone>(
    tree: &PdTree<P>,
    bank: &TermBank,
    subst: &Substitution,
    query: TermIndex,
    date_limit: Option<SysDate>,
  ) -> Self {
    let terms = vec![query];
    let alts = compute_alts(tree, 0, &terms, bank);
    let base_mark = subst.mark();
    PdtSearch {
      frames: vec![SearchFrame {
        node: 0,
        terms,
        alts,
        next_alt: 0,
        entry_cursor: 0,
        mark: base_mark,
      }],
      date_limit,
      base_mark,
    }
  }

  /// Yields the next matching entry, extending `subst` with the pattern's bindings. The bindings
  /// stay in place until the next call (or [`PdtSearch::abort`]), so the caller can build the
  /// rewritten term first.
  pub fn next_match<P: Clone>(
    &mut self,
    tree: &PdTree<P>,
    bank: &mut TermBank,
    subst: &mut Substitution,
  ) -> Option<(TermIndex, P)> {
    loop {
      let Some(frame) = self.frames.last_mut() else {
        return None;
      };

      if frame.terms.is_empty() {
        // A complete pattern ends here; serve its entries.
        let node = &tree.nodes[frame.node];
        while frame.entry_cursor < node.entries.len() {
          let entry = &node.entries[frame.entry_cursor];
          frame.entry_cursor += 1;
          match self.date_limit {
            Some(limit) if entry.date <= limit => continue,
            _ => return Some((entry.pattern, entry.payload.clone())),
          }
        }
        let finished = self.frames.pop().expect("frame stack cannot be empty here");
        subst.backtrack_to(bank, finished.mark);
        continue;
      }

      if frame.next_alt >= frame.alts.len() {
        let finished = self.frames.pop().expect("frame stack cannot be empty here");
        subst.backtrack_to(bank, finished.mark);
        continue;
      }

      let alt = frame.alts[frame.next_alt];
      frame.next_alt += 1;
      let head = *frame.terms.last().expect("terms checked non-empty");
      let parent_terms = frame.terms.clone();

      let (child, terms, mark) = match alt {
        Alt::Fun(child) => {
          let mark = subst.mark();
          let mut terms = parent_terms;
          terms.pop();
          for &arg in bank.args(head).iter().rev() {
            terms.push(arg);
          }
          (child, terms, mark)
        }
        Alt::Var(var, child) => {
          let mark = subst.mark();
          let cell = bank.cell(var);
          match cell.binding {
            Some(binding) => {
              if binding != head {
                continue;
              }
            }
            None => {
              if cell.typ != bank.cell(head).typ {
                continue;
              }
              subst.add_binding(bank, var, head);
            }
          }
          let mut terms = parent_terms;
          terms.pop();
          (child, terms, mark)
        }
      };

      let alts = compute_alts(tree, child, &terms, bank);
      self.frames.push(SearchFrame {
        node: child,
        terms,
        alts,
        next_alt: 0,
        entry_cursor: 0,
        mark,
      });
    }
  }

  /// Ends the search, undoing any bindings still in place.
  pub fn abort(&mut self, bank: &mut TermBank, subst: &mut Substitution) {
    subst.backtrack_to(bank, self.base_mark);
    self.frames.clear();
  }
}

fn compute_alts<P: Clone>(tree: &PdTree<P>, node: usize, terms: &[TermIndex], bank: &TermBank) -> Vec<Alt> {
  let Some(&head) = terms.last() else {
    return Vec::new();
  };
  let node = &tree.nodes[node];
  let mut alts = Vec::with_capacity(node.var_arcs.len() + 1);

  if !bank.is_variable(head) {
    if let Some(&child) = node.f_arcs.get(&bank.f_code(head)) {
      alts.push(Alt::Fun(child));
    }
  }
  for (&var, &child) in node.var_arcs.iter() {
    alts.push(Alt::Var(var, child));
  }
  alts
}
