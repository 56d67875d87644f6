/*!
Bind discrimination tree indexing. spec.md §4.E, grounded in `discrim_bind.c`.

Unlike [the wild tree](crate::index::discrim_wild), a bind tree keeps variables as first-class
edges carrying their variable number, and retrieval *binds* them against the query's corresponding
subterm through a caller-supplied [BindingContext] instead of treating them as an opaque wildcard.
This makes a bind tree strictly more selective than a wild tree (a variable edge only matches
subjects consistent with any earlier binding of the same variable number) but it does not support
AC operators (spec.md §4.E).
*/

use std::collections::BTreeMap;

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::flatterm::{FlatContent, Flatterm};
use crate::symbol::SymNum;
use crate::term::{TermArena, VarNum};
use crate::unify::matching::terms_equal_under;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Edge {
    Var(VarNum),
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

/// A bind discrimination tree over objects of type `T`.
pub struct DiscrimBind<T> {
    root: Node<T>,
}

impl<T: Clone> Default for DiscrimBind<T> {
    fn default() -> Self {
        DiscrimBind { root: Node::default() }
    }
}

impl<T: Clone> DiscrimBind<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: &Flatterm, object: T) {
        let mut node = &mut self.root;
        for n in &term.nodes {
            let edge = match &n.content {
                FlatContent::Variable(v) => Edge::Var(*v),
                FlatContent::Rigid(sym) => Edge::Sym(*sym),
            };
            node = node.children.entry(edge).or_default();
        }
        node.leaf.push(object);
    }

    pub fn remove(&mut self, term: &Flatterm, matches: impl Fn(&T) -> bool) {
        let mut node = &mut self.root;
        for n in &term.nodes {
            let edge = match &n.content {
                FlatContent::Variable(v) => Edge::Var(*v),
                FlatContent::Rigid(sym) => Edge::Sym(*sym),
            };
            match node.children.get_mut(&edge) {
                Some(next) => node = next,
                None => return,
            }
        }
        node.leaf.retain(|o| !matches(o));
    }

    /// Retrieve every object whose skeleton generalizes `query`, binding each pattern variable
    /// (under `pattern_ctx`) to the query subtree it aligns with as the walk proceeds; a variable
    /// edge seen a second time must bind to a subject identical (under substitution) to its first
    /// binding. Every binding made during the walk is rolled back before `retrieve` returns, so
    /// repeated calls never leak state between candidates.
    pub fn retrieve(
        &self,
        arena: &mut TermArena,
        contexts: &mut [BindingContext],
        trail: &mut Trail,
        pattern_ctx: Multiplier,
        query: &Flatterm,
        query_ctx: Multiplier,
    ) -> Vec<T> {
        let mut out = Vec::new();
        let mark = trail.mark();
        Self::walk(&self.root, arena, contexts, trail, pattern_ctx, query, 0, query_ctx, &mut out);
        trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        node: &Node<T>,
        arena: &mut TermArena,
        contexts: &mut [BindingContext],
        trail: &mut Trail,
        pattern_ctx: Multiplier,
        query: &Flatterm,
        at: usize,
        query_ctx: Multiplier,
        out: &mut Vec<T>,
    ) {
        if at == query.nodes.len() {
            out.extend(node.leaf.iter().cloned());
            return;
        }

        if let FlatContent::Rigid(sym) = &query.nodes[at].content {
            if let Some(next) = node.children.get(&Edge::Sym(*sym)) {
                Self::walk(next, arena, contexts, trail, pattern_ctx, query, at + 1, query_ctx, out);
            }
        }

        let end = query.nodes[at].end;

        for (&edge, child) in node.children.iter() {
            let Edge::Var(v) = edge else { continue };
            let mark = trail.mark();
            let subject = query.to_term(arena, at);

            let consistent = match contexts[pattern_ctx.0 as usize].binding(v) {
                Some(existing) => terms_equal_under(arena, contexts, existing.term, existing.context, subject, query_ctx),
                None => {
                    trail.bind(&mut contexts[pattern_ctx.0 as usize], v, subject, query_ctx);
                    true
                }
            };

            if consistent {
                Self::walk(child, arena, contexts, trail, pattern_ctx, query, end, query_ctx, out);
            }
            trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
        }
    }
}
