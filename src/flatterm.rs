/*!
Flatterms: the prefix-linearized representation used by [rewriting](crate::demod). spec.md §3, §4.B.

A flatterm is the same logical content as a [tree term](crate::term::TermArena) but stored as a
flat `Vec` of nodes in prefix-traversal order. Each node records:
- `end` --- the index one past the last node of this node's subtree (so `size = end - self`),
- `prev` / `next` --- doubly-linked neighbours in the prefix order, letting a rewrite splice a
  replacement fragment in O(1) without shifting the rest of the vector's *logical* links (the
  backing `Vec` is still a flat array; `prev`/`next` are indices, not physical positions, so a
  splice only patches a constant number of links, matching the systems-language intent of
  spec.md §9 even though this is a safe-Rust rendition rather than raw pointers).

Rewriting copies instance fragments from [binding context](crate::binding) bindings and marks the
copied fragment `reduced` (spec.md §4.B), so inside-out rewriting never re-visits a fully reduced
fragment.
*/

use crate::symbol::SymNum;
use crate::term::{TermArena, TermId, TermKind, VarNum};

/// One node of a [Flatterm].
#[derive(Clone, Debug)]
pub struct FlatNode {
    pub content: FlatContent,
    /// Index one past this node's subtree.
    pub end: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    /// Set once this node's subtree is a normal form and should not be revisited this pass.
    pub reduced: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FlatContent {
    Variable(VarNum),
    Rigid(SymNum),
}

/// A flatterm: a `Vec<FlatNode>` in prefix order plus the head index (always 0 while the
/// flatterm denotes a single term).
#[derive(Clone, Debug)]
pub struct Flatterm {
    pub nodes: Vec<FlatNode>,
}

impl Flatterm {
    /// Linearize a tree term into prefix order (`term → flatterm`, spec.md §4.B).
    pub fn from_term(arena: &TermArena, root: TermId) -> Self {
        let mut nodes = Vec::with_capacity(arena.size(root));
        Self::build(arena, root, &mut nodes);
        // Wire prev/next in final pass, now that the vector will not move.
        for i in 0..nodes.len() {
            nodes[i].prev = if i == 0 { None } else { Some(i - 1) };
            nodes[i].next = if i + 1 < nodes.len() { Some(i + 1) } else { None };
        }
        Flatterm { nodes }
    }

    fn build(arena: &TermArena, id: TermId, out: &mut Vec<FlatNode>) {
        let start = out.len();
        match &arena.get(id).kind {
            TermKind::Variable(v) => {
                out.push(FlatNode {
                    content: FlatContent::Variable(*v),
                    end: start + 1,
                    prev: None,
                    next: None,
                    reduced: false,
                });
            }
            TermKind::Rigid(sym, args) => {
                out.push(FlatNode {
                    content: FlatContent::Rigid(*sym),
                    end: start, // patched below
                    prev: None,
                    next: None,
                    reduced: false,
                });
                for &a in args {
                    Self::build(arena, a, out);
                }
                let end = out.len();
                out[start].end = end;
            }
        }
    }

    /// Size (node count) of the subtree rooted at `at`.
    pub fn size_at(&self, at: usize) -> usize {
        self.nodes[at].end - at
    }

    /// The inverse, `flatterm → term`: rebuild a tree term rooted at `at` (defaults to the whole
    /// flatterm when `at == 0`). Used once rewriting to normal form completes.
    pub fn to_term(&self, arena: &mut TermArena, at: usize) -> TermId {
        match &self.nodes[at].content {
            FlatContent::Variable(v) => arena.make_var(*v),
            FlatContent::Rigid(sym) => {
                let sym = *sym;
                let mut args = Vec::new();
                let mut cursor = at + 1;
                while cursor < self.nodes[at].end {
                    args.push(self.to_term(arena, cursor));
                    cursor = self.nodes[cursor].end;
                }
                arena.make_rigid(sym, args)
            }
        }
    }

    /// Splice the fragment `replacement` in place of the subtree rooted at `at`. This rebuilds
    /// the flatterm's node vector around the spliced region; in a systems-language rewrite this
    /// would be an O(1) pointer splice (spec.md §9) — the `Vec`-backed version here pays an
    /// O(size) copy for the surrounding array but preserves the documented contract.
    ///
    /// Every node keeps a correct `end`: ancestors of `at` (nodes before `at` whose subtree
    /// contains it) shift their `end` by the size delta; nodes from `replacement` are rebased by
    /// `at`; nodes after the old subtree shift both their position and `end` by the delta.
    pub fn splice(&mut self, at: usize, replacement: Flatterm) {
        let old_end = self.nodes[at].end;
        let delta = replacement.nodes.len() as isize - (old_end - at) as isize;

        let mut new_nodes = Vec::with_capacity((self.nodes.len() as isize + delta) as usize);

        for node in &self.nodes[..at] {
            let mut node = node.clone();
            if node.end > at {
                node.end = (node.end as isize + delta) as usize;
            }
            new_nodes.push(node);
        }

        for node in replacement.nodes {
            let mut node = node;
            node.end += at;
            new_nodes.push(node);
        }

        for node in &self.nodes[old_end..] {
            let mut node = node.clone();
            node.end = (node.end as isize + delta) as usize;
            new_nodes.push(node);
        }

        for (i, node) in new_nodes.iter_mut().enumerate() {
            node.prev = if i == 0 { None } else { Some(i - 1) };
            node.next = if i + 1 < new_nodes.len() { Some(i + 1) } else { None };
        }

        self.nodes = new_nodes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn term_roundtrip_identity() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 2, false).unwrap();
        let g = syms.intern("g", 1, false).unwrap();
        let mut arena = TermArena::new();
        let v0 = arena.make_var(0);
        let gv0 = arena.make_rigid(g, vec![v0]);
        let v1 = arena.make_var(1);
        let t = arena.make_rigid(f, vec![gv0, v1]);

        let flat = Flatterm::from_term(&arena, t);
        let mut arena2 = TermArena::new();
        let back = flat.to_term(&mut arena2, 0);

        // Rebuild `t` in arena2 too, for a like-for-like structural comparison.
        let v0b = arena2.make_var(0);
        let gv0b = arena2.make_rigid(g, vec![v0b]);
        let v1b = arena2.make_var(1);
        let expect = arena2.make_rigid(f, vec![gv0b, v1b]);

        assert!(arena2.term_ident(back, expect));
    }

    #[test]
    fn size_matches_node_count() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 2, false).unwrap();
        let mut arena = TermArena::new();
        let v0 = arena.make_var(0);
        let v1 = arena.make_var(1);
        let t = arena.make_rigid(f, vec![v0, v1]);
        let flat = Flatterm::from_term(&arena, t);
        assert_eq!(flat.size_at(0), 3);
    }

    #[test]
    fn splice_replaces_subterm_and_keeps_shape() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 2, false).unwrap();
        let g = syms.intern("g", 1, false).unwrap();
        let h = syms.intern("h", 2, false).unwrap();

        let mut arena = TermArena::new();
        let v0 = arena.make_var(0);
        let gv0 = arena.make_rigid(g, vec![v0]); // g(x)
        let v1 = arena.make_var(1);
        let t = arena.make_rigid(f, vec![gv0, v1]); // f(g(x), y)
        let mut flat = Flatterm::from_term(&arena, t);

        // Replace the `g(x)` subterm (at index 1) with `h(y, y)`.
        let v1b = arena.make_var(1);
        let v1c = arena.make_var(1);
        let replacement_term = arena.make_rigid(h, vec![v1b, v1c]);
        let replacement = Flatterm::from_term(&arena, replacement_term);
        flat.splice(1, replacement);

        assert_eq!(flat.nodes[0].end, flat.nodes.len());
        let mut arena2 = TermArena::new();
        let rebuilt = flat.to_term(&mut arena2, 0);

        let v1d = arena2.make_var(1);
        let v1e = arena2.make_var(1);
        let hterm = arena2.make_rigid(h, vec![v1d, v1e]);
        let v1f = arena2.make_var(1);
        let expect = arena2.make_rigid(f, vec![hterm, v1f]);

        assert!(arena2.term_ident(rebuilt, expect));
    }
}
