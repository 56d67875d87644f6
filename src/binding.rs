/*!
Binding contexts and the trail. spec.md §3, §4.C.

This is the "Context" of spec.md, renamed [BindingContext] to avoid colliding with the
engine-level [Context](crate::context::Context) --- exactly the distinction the teacher crate
already draws between `GenericContext` and `Context` (see `otter_sat::context`).

A [BindingContext] is a fixed-size array `terms[i]` indexed by variable number, each slot either
unbound or bound to `(term, context)`: "variable `v` is bound to term `t` interpreted under
context `c'`". Contexts never own terms; they reference them. Each context carries a unique
[Multiplier] so that applying it to a term renders uninstantiated variable `v` as
`var(multiplier * MAX_VARS + v)`, guaranteeing disjoint variable ranges between two contexts
without a renaming pass (spec.md §4.C).

The [Trail] is a singly-linked (here: `Vec`-backed, equivalently append-only) stack of
`(varnum, context)` pairs recording every binding, so that [Trail::undo_to] a saved mark clears
exactly the bindings made since that mark --- O(1) per binding, not per term.
*/

use crate::term::{TermId, VarNum};
use crate::types::err::{ErrorKind, PoolKind};

/// The maximum number of distinct variables a single clause/equation may use. Chosen to be
/// "large enough that a clause's variables fit in a single context and small enough that a
/// context is a fixed-size array" (spec.md §3).
pub const MAX_VARS: u32 = 256;

/// A unique per-context multiplier, allocated from a bounded pool (spec.md §3, §9).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Multiplier(pub u32);

/// A single binding: variable `v` ↦ term `t` interpreted under context `c'`.
#[derive(Clone, Copy, Debug)]
pub struct Binding {
    pub term: TermId,
    pub context: Multiplier,
}

/// A fixed-size substitution table indexed by variable number.
#[derive(Clone, Debug)]
pub struct BindingContext {
    pub multiplier: Multiplier,
    terms: Vec<Option<Binding>>,
    /// At most one live partial-AC-match residue (spec.md §9 Open Question #1: a context owns at
    /// most one `partial_term` at a time, cleared on iterator advance).
    partial_term: Option<TermId>,
}

impl BindingContext {
    pub fn new(multiplier: Multiplier) -> Self {
        BindingContext {
            multiplier,
            terms: vec![None; MAX_VARS as usize],
            partial_term: None,
        }
    }

    pub fn is_bound(&self, v: VarNum) -> bool {
        self.terms[v as usize].is_some()
    }

    pub fn binding(&self, v: VarNum) -> Option<Binding> {
        self.terms[v as usize]
    }

    fn set(&mut self, v: VarNum, binding: Option<Binding>) {
        self.terms[v as usize] = binding;
    }

    /// The residue left behind by a `partial` AC match (spec.md §4.D): the subject arguments a
    /// basis row did not have to cover.
    pub fn partial_term(&self) -> Option<TermId> {
        self.partial_term
    }

    pub fn set_partial_term(&mut self, term: Option<TermId>) {
        self.partial_term = term;
    }

    pub fn clear_partial_term(&mut self) {
        self.partial_term = None;
    }
}

/// One entry of the [Trail]: which context, which variable, was bound.
#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    context_multiplier: Multiplier,
    var: VarNum,
}

/// A marker into the trail, returned by [Trail::mark] and consumed by [Trail::undo_to].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrailMark(usize);

/// An append-only log of bindings, shared by every live [BindingContext] in a unification or
/// matching call (spec.md §4.C, §9's "trail as a transaction log" design note).
#[derive(Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// A savepoint: `undo_to` this mark clears exactly the bindings made since this call.
    pub fn mark(&self) -> TrailMark {
        TrailMark(self.entries.len())
    }

    /// Bind `v` in `ctx` to `(t, under)`. Requires `ctx.terms[v] == None` (spec.md §4.C); violating
    /// this is a logic error, since re-binding a bound variable would silently lose the trail
    /// entry needed to undo the earlier binding.
    pub fn bind(&mut self, ctx: &mut BindingContext, v: VarNum, t: TermId, under: Multiplier) {
        debug_assert!(!ctx.is_bound(v), "rebinding an already-bound variable");
        ctx.set(v, Some(Binding { term: t, context: under }));
        self.entries.push(TrailEntry {
            context_multiplier: ctx.multiplier,
            var: v,
        });
    }

    /// Roll every context named on the trail back to `mark`, by variable number. The trail itself
    /// does not own contexts --- it only records *which* `(context, var)` pairs were touched, so
    /// callers pass a lookup from [Multiplier] to the live context (e.g. a small `Vec` indexed by
    /// multiplier, as used in [crate::unify]).
    pub fn undo_to(&mut self, mark: TrailMark, mut contexts: impl FnMut(Multiplier) -> Option<&mut BindingContext>) {
        while self.entries.len() > mark.0 {
            let entry = self.entries.pop().expect("checked non-empty above");
            if let Some(ctx) = contexts(entry.context_multiplier) {
                ctx.set(entry.var, None);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A bounded pool of [Multiplier]s (spec.md §3, §9's "context multipliers as a bounded pool"
/// design note): a guard type hands out a fresh multiplier on entry to a unification frame and
/// reclaims it on exit; exhausting the pool signals (likely) infinite recursion and is fatal
/// (spec.md §7).
pub struct MultiplierPool {
    capacity: u32,
    in_use: Vec<bool>,
}

/// A multiplier leased from a [MultiplierPool]. Freeing a guard whose context still holds
/// bindings is a contract violation the caller must avoid by rolling the trail back first
/// (spec.md §3: "A context freed while holding any binding is a fatal error").
pub struct MultiplierGuard {
    multiplier: Multiplier,
}

impl MultiplierGuard {
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }
}

impl MultiplierPool {
    pub fn new(capacity: u32) -> Self {
        MultiplierPool {
            capacity,
            in_use: vec![false; capacity as usize],
        }
    }

    pub fn lease(&mut self) -> Result<MultiplierGuard, ErrorKind> {
        for i in 0..self.capacity {
            if !self.in_use[i as usize] {
                self.in_use[i as usize] = true;
                return Ok(MultiplierGuard {
                    multiplier: Multiplier(i),
                });
            }
        }
        Err(ErrorKind::PoolExhausted(PoolKind::ContextMultiplier))
    }

    /// Release a multiplier. The caller must guarantee the corresponding context's bindings were
    /// already rolled back via the trail; this pool does not itself hold contexts to check.
    pub fn release(&mut self, guard: MultiplierGuard) {
        self.in_use[guard.multiplier.0 as usize] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_rollback_is_exact() {
        let mut contexts = vec![
            BindingContext::new(Multiplier(0)),
            BindingContext::new(Multiplier(1)),
        ];
        let mut trail = Trail::new();

        let mark = trail.mark();
        {
            let (a, b) = contexts.split_at_mut(1);
            trail.bind(&mut a[0], 0, TermId(10), Multiplier(1));
            trail.bind(&mut b[0], 2, TermId(20), Multiplier(0));
        }
        assert!(contexts[0].is_bound(0));
        assert!(contexts[1].is_bound(2));

        trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));

        assert!(!contexts[0].is_bound(0));
        assert!(!contexts[1].is_bound(2));
    }

    #[test]
    fn multiplier_pool_is_bounded() {
        let mut pool = MultiplierPool::new(2);
        let g1 = pool.lease().unwrap();
        let _g2 = pool.lease().unwrap();
        assert!(pool.lease().is_err());
        pool.release(g1);
        assert!(pool.lease().is_ok());
    }
}
