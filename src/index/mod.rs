/*!
Term indexing. spec.md §4.E, grounded in `index.c` (the common `Mindex` interface) plus
[fpa], [discrim_wild], and [discrim_bind] (the three indexed backends) and [fpa_list] (the FPA
posting-list data structure).

[Mindex] is the one interface the rest of the engine (clause generation, forward/backward
simplification) talks to; it hides which of `LINEAR` (an unindexed scan — always correct, used as
the default and as the specification against which the indexed backends are checked), `FPA`,
`DISCRIM_WILD`, or `DISCRIM_BIND` is actually doing the work (spec.md §3: "abstract handle
`Mindex` wrapping one of {LINEAR, FPA, DISCRIM_WILD, DISCRIM_BIND}").

Every backend narrows to a *candidate* set (by skeleton/path compatibility); [Mindex::first] and
[Mindex::next] are responsible for the final, authoritative check — a real call into
[unify](crate::unify) or [matching](crate::unify::matching) — so an index can never report a false
positive no matter how approximate its narrowing is (spec.md §9's "index completeness" invariant,
§4.E's "still require a subsequent unification/match step").
*/

pub mod discrim_bind;
pub mod discrim_wild;
pub mod fpa;
pub mod fpa_list;

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::flatterm::Flatterm;
use crate::symbol::SymbolTable;
use crate::term::{TermArena, TermId};
use crate::types::err::{ErrorKind, IndexError};
use crate::unify::matching::match_term;
use crate::unify::{deref, unify};
use discrim_bind::DiscrimBind;
use discrim_wild::DiscrimWild;
use fpa::FpaIndex;
use fpa_list::FpaId;

/// Which relationship a query asks an index to find (spec.md §4.E).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryType {
    /// The stored term and the query unify (possibly instantiating both).
    Unify,
    /// The stored term is an instance of the query (query generalizes it).
    Instance,
    /// The stored term generalizes the query (the common case: forward demodulation, subsumption).
    Generalization,
    /// The stored term and the query are identical up to variable renaming.
    Variant,
    /// The stored term and the query are syntactically identical (no renaming).
    Identical,
}

/// One entry stored in an index: the term it was inserted under, its owning context, and the
/// caller's opaque object (typically a clause or literal id).
#[derive(Clone)]
struct Entry<T> {
    term: TermId,
    ctx: Multiplier,
    object: T,
}

enum Backend<T> {
    Linear(Vec<Entry<T>>),
    Fpa {
        index: FpaIndex<(TermId, Multiplier, T)>,
        ids: Vec<(FpaId, Entry<T>)>,
    },
    DiscrimWild(DiscrimWild<Entry<T>>),
    DiscrimBind(DiscrimBind<Entry<T>>),
}

/// Which backend a freshly constructed [Mindex] should use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Linear,
    Fpa { depth: usize },
    DiscrimWild,
    DiscrimBind,
}

/// An abstract term index: [insert](Mindex::insert)/[remove](Mindex::remove) objects keyed by
/// term, then retrieve candidates for a [QueryType] via [first](Mindex::first)/[next](Mindex::next).
pub struct Mindex<T> {
    backend: Backend<T>,
}

/// A live retrieval cursor returned by [Mindex::first]. Must be advanced with [Mindex::next] until
/// it is exhausted, or explicitly dropped with [Mindex::cancel] — spec.md §4.E lists `cancel` as
/// "mandatory when the caller stops before `end`" so index-internal bookkeeping (here: just the
/// candidate buffer) is always released deterministically.
pub struct Position<T> {
    candidates: Vec<Entry<T>>,
    next: usize,
}

impl<T: Clone> Mindex<T> {
    pub fn new(kind: IndexKind) -> Self {
        let backend = match kind {
            IndexKind::Linear => Backend::Linear(Vec::new()),
            IndexKind::Fpa { depth } => Backend::Fpa {
                index: FpaIndex::new(depth),
                ids: Vec::new(),
            },
            IndexKind::DiscrimWild => Backend::DiscrimWild(DiscrimWild::new()),
            IndexKind::DiscrimBind => Backend::DiscrimBind(DiscrimBind::new()),
        };
        Mindex { backend }
    }

    pub fn insert(&mut self, arena: &TermArena, term: TermId, ctx: Multiplier, object: T) {
        let entry = Entry { term, ctx, object };
        match &mut self.backend {
            Backend::Linear(v) => v.push(entry),
            Backend::Fpa { index, ids } => {
                let id = index.insert(arena, term, (entry.term, entry.ctx, entry.object.clone()));
                ids.push((id, entry));
            }
            Backend::DiscrimWild(tree) => {
                let flat = Flatterm::from_term(arena, term);
                tree.insert(&flat, entry);
            }
            Backend::DiscrimBind(tree) => {
                let flat = Flatterm::from_term(arena, term);
                tree.insert(&flat, entry);
            }
        }
    }

    /// Remove every entry inserted at `term` for which `matches` returns true (spec.md §4.E:
    /// `remove(idx, term, object)`).
    pub fn remove(&mut self, arena: &TermArena, term: TermId, matches: impl Fn(&T) -> bool) {
        match &mut self.backend {
            Backend::Linear(v) => v.retain(|e| !matches(&e.object)),
            Backend::Fpa { index, ids } => {
                ids.retain(|(id, e)| {
                    if matches(&e.object) {
                        index.remove(arena, e.term, *id);
                        false
                    } else {
                        true
                    }
                });
            }
            Backend::DiscrimWild(tree) => {
                let flat = Flatterm::from_term(arena, term);
                tree.remove(&flat, |e| matches(&e.object));
            }
            Backend::DiscrimBind(tree) => {
                let flat = Flatterm::from_term(arena, term);
                tree.remove(&flat, |e| matches(&e.object));
            }
        }
    }

    /// Begin a retrieval for `query_type` against `query` (under `query_ctx`). Bindings made while
    /// narrowing are interpreted under `found_ctx` for whichever side the index's entries occupy.
    pub fn first(
        &self,
        syms: &SymbolTable,
        arena: &mut TermArena,
        contexts: &mut [BindingContext],
        trail: &mut Trail,
        query: TermId,
        query_ctx: Multiplier,
        query_type: QueryType,
        found_ctx: Multiplier,
    ) -> Result<Option<(Position<T>, T)>, ErrorKind> {
        let candidates = match &self.backend {
            Backend::Linear(v) => v.clone(),
            Backend::Fpa { index, .. } => index
                .candidates(arena, query)
                .into_iter()
                .map(|(_id, (term, ctx, object)): (FpaId, (TermId, Multiplier, T))| Entry { term, ctx, object })
                .collect(),
            Backend::DiscrimWild(tree) => {
                if !matches!(query_type, QueryType::Generalization) {
                    return Err(IndexError::UnsupportedQuery.into());
                }
                let flat = Flatterm::from_term(arena, query);
                tree.retrieve(&flat)
            }
            Backend::DiscrimBind(tree) => {
                if !matches!(query_type, QueryType::Generalization) {
                    return Err(IndexError::UnsupportedQuery.into());
                }
                let flat = Flatterm::from_term(arena, query);
                tree.retrieve(arena, contexts, trail, found_ctx, &flat, query_ctx)
            }
        };

        let mut position = Position { candidates, next: 0 };
        match self.advance(syms, arena, contexts, trail, query, query_ctx, query_type, found_ctx, &mut position)? {
            Some(object) => Ok(Some((position, object))),
            None => Ok(None),
        }
    }

    /// Continue a retrieval started by [first](Mindex::first).
    pub fn next(
        &self,
        syms: &SymbolTable,
        arena: &mut TermArena,
        contexts: &mut [BindingContext],
        trail: &mut Trail,
        query: TermId,
        query_ctx: Multiplier,
        query_type: QueryType,
        found_ctx: Multiplier,
        position: &mut Position<T>,
    ) -> Result<Option<T>, ErrorKind> {
        self.advance(syms, arena, contexts, trail, query, query_ctx, query_type, found_ctx, position)
    }

    /// Release a retrieval cursor before it is exhausted. A no-op here (the only resource a
    /// [Position] holds is its candidate buffer), but kept as an explicit call so callers follow
    /// the mandatory cancel discipline spec.md §4.E describes.
    pub fn cancel(&self, _position: Position<T>) {}

    #[allow(clippy::too_many_arguments)]
    fn advance(
        &self,
        syms: &SymbolTable,
        arena: &mut TermArena,
        contexts: &mut [BindingContext],
        trail: &mut Trail,
        query: TermId,
        query_ctx: Multiplier,
        query_type: QueryType,
        found_ctx: Multiplier,
        position: &mut Position<T>,
    ) -> Result<Option<T>, ErrorKind> {
        let _ = syms;
        while position.next < position.candidates.len() {
            let entry = position.candidates[position.next].clone();
            position.next += 1;

            let mark = trail.mark();
            let ok = match query_type {
                QueryType::Unify => unify(arena, contexts, trail, query, query_ctx, entry.term, entry.ctx).is_ok(),
                QueryType::Generalization => {
                    match_term(arena, contexts, trail, entry.term, entry.ctx, query, query_ctx).is_ok()
                }
                QueryType::Instance => match_term(arena, contexts, trail, query, query_ctx, entry.term, entry.ctx).is_ok(),
                QueryType::Variant => {
                    match_term(arena, contexts, trail, query, query_ctx, entry.term, entry.ctx).is_ok()
                        && match_term(arena, contexts, trail, entry.term, entry.ctx, query, query_ctx).is_ok()
                }
                QueryType::Identical => {
                    let (q, qc) = deref(arena, contexts, query, query_ctx);
                    let (e, ec) = deref(arena, contexts, entry.term, entry.ctx);
                    qc == ec && arena.term_ident(q, e)
                }
            };

            if !ok {
                trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
                continue;
            }
            let _ = found_ctx;
            return Ok(Some(entry.object));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn linear_unify_finds_a_unifiable_entry() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let stored = arena.make_rigid(f, vec![x]);
        let ta = arena.make_rigid(a, vec![]);
        let query = arena.make_rigid(f, vec![ta]);

        let mut index: Mindex<&str> = Mindex::new(IndexKind::Linear);
        index.insert(&arena, stored, Multiplier(0), "stored-fx");

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        let found = index
            .first(&syms, &mut arena, &mut contexts, &mut trail, query, Multiplier(1), QueryType::Unify, Multiplier(0))
            .unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn discrim_wild_supports_only_generalization() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let query = arena.make_rigid(f, vec![ta]);

        let index: Mindex<&str> = Mindex::new(IndexKind::DiscrimWild);
        let mut contexts = vec![BindingContext::new(Multiplier(0))];
        let mut trail = Trail::new();

        let err = index.first(&syms, &mut arena, &mut contexts, &mut trail, query, Multiplier(0), QueryType::Unify, Multiplier(0));
        assert!(matches!(err, Err(ErrorKind::Index(IndexError::UnsupportedQuery))));
    }

    #[test]
    fn fpa_generalization_round_trips_through_index() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let stored = arena.make_rigid(f, vec![x]);
        let ta = arena.make_rigid(a, vec![]);
        let query = arena.make_rigid(f, vec![ta]);

        let mut index: Mindex<&str> = Mindex::new(IndexKind::Fpa { depth: 4 });
        index.insert(&arena, stored, Multiplier(0), "stored-fx");

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        let found = index
            .first(
                &syms,
                &mut arena,
                &mut contexts,
                &mut trail,
                query,
                Multiplier(1),
                QueryType::Generalization,
                Multiplier(0),
            )
            .unwrap();
        assert_eq!(found.map(|(_, o)| o), Some("stored-fx"));
    }
}
