/*!
Wild discrimination tree indexing. spec.md §4.E, grounded in `discrim.c`/`discrim_wild.c`.

A wild discrimination tree collapses every variable to a single wildcard edge `*`: siblings at a
node are ordered by symnum with the wildcard edge always first (spec.md §3: "siblings ordered by
symnum with variable nodes always first"). Only [GENERALIZATION](crate::index::QueryType::Generalization)
queries are supported — retrieval walks the query term's flatterm against the tree, at each
rigid-query-node either following the matching symbol edge or the wildcard edge (which consumes
the query's whole subtree, since the indexed term's variable there may stand for anything), and
collects the object lists at every leaf reached. Matches returned by [retrieve] still require a
real one-way [match](crate::unify::matching::match_term) — the tree only narrows candidates to
those whose *skeleton* is compatible (spec.md §4.E: "All matches delivered by a wild discrim still
require a subsequent unification/match step performed by the caller").
*/

use std::collections::BTreeMap;

use crate::flatterm::{FlatContent, Flatterm};
use crate::symbol::SymNum;

/// A wild-tree edge label: the wildcard, or a specific symbol. Ordered so the wildcard always
/// sorts first, matching the sibling order spec.md §3 requires.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Edge {
    Wild,
    Sym(SymNum),
}

struct Node<T> {
    children: BTreeMap<Edge, Node<T>>,
    leaf: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            children: BTreeMap::new(),
            leaf: Vec::new(),
        }
    }
}

/// A wild discrimination tree over objects of type `T`.
pub struct DiscrimWild<T> {
    root: Node<T>,
}

impl<T: Clone> Default for DiscrimWild<T> {
    fn default() -> Self {
        DiscrimWild { root: Node::default() }
    }
}

impl<T: Clone> DiscrimWild<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `term` (already linearized) at the path its flatterm describes, treating every
    /// variable node as the wildcard edge.
    pub fn insert(&mut self, term: &Flatterm, object: T) {
        let mut node = &mut self.root;
        let mut i = 0;
        while i < term.nodes.len() {
            let edge = match &term.nodes[i].content {
                FlatContent::Variable(_) => Edge::Wild,
                FlatContent::Rigid(sym) => Edge::Sym(*sym),
            };
            node = node.children.entry(edge).or_default();
            i += 1;
        }
        node.leaf.push(object);
    }

    pub fn remove(&mut self, term: &Flatterm, matches: impl Fn(&T) -> bool) {
        let mut node = &mut self.root;
        for n in &term.nodes {
            let edge = match &n.content {
                FlatContent::Variable(_) => Edge::Wild,
                FlatContent::Rigid(sym) => Edge::Sym(*sym),
            };
            match node.children.get_mut(&edge) {
                Some(next) => node = next,
                None => return,
            }
        }
        node.leaf.retain(|o| !matches(o));
    }

    /// Collect every object whose skeleton generalizes `query` (i.e. could be the pattern in a
    /// one-way match against `query` as subject): walk the query term, at each node either follow
    /// the exact symbol edge or the wildcard edge (skipping the query's entire subtree there,
    /// since a wildcard there can stand for it).
    pub fn retrieve(&self, query: &Flatterm) -> Vec<T> {
        let mut out = Vec::new();
        Self::walk(&self.root, query, 0, &mut out);
        out
    }

    fn walk(node: &Node<T>, query: &Flatterm, at: usize, out: &mut Vec<T>) {
        if at == query.nodes.len() {
            out.extend(node.leaf.iter().cloned());
            return;
        }

        if let Some(sym_edge) = match &query.nodes[at].content {
            FlatContent::Rigid(sym) => Some(Edge::Sym(*sym)),
            FlatContent::Variable(_) => None,
        } {
            if let Some(next) = node.children.get(&sym_edge) {
                Self::walk(next, query, at + 1, out);
            }
        }

        if let Some(wild) = node.children.get(&Edge::Wild) {
            let skip_to = query.nodes[at].end;
            Self::walk(wild, query, skip_to, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;
    use crate::term::TermArena;

    #[test]
    fn variable_skeleton_generalizes_any_subject() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let pattern = arena.make_rigid(f, vec![x]); // f(x)
        let flat_pattern = Flatterm::from_term(&arena, pattern);

        let mut tree: DiscrimWild<&str> = DiscrimWild::new();
        tree.insert(&flat_pattern, "f-of-anything");

        let ta = arena.make_rigid(a, vec![]);
        let subject = arena.make_rigid(f, vec![ta]); // f(a)
        let flat_subject = Flatterm::from_term(&arena, subject);

        assert_eq!(tree.retrieve(&flat_subject), vec!["f-of-anything"]);
    }

    #[test]
    fn mismatched_root_symbol_finds_nothing() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let g = syms.intern("g", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let pattern = arena.make_rigid(f, vec![ta]);
        let flat_pattern = Flatterm::from_term(&arena, pattern);

        let mut tree: DiscrimWild<&str> = DiscrimWild::new();
        tree.insert(&flat_pattern, "f-of-a");

        let ta2 = arena.make_rigid(a, vec![]);
        let subject = arena.make_rigid(g, vec![ta2]);
        let flat_subject = Flatterm::from_term(&arena, subject);

        assert!(tree.retrieve(&flat_subject).is_empty());
    }
}
