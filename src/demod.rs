/*!
Demodulation: rewriting a term to normal form against the active set of oriented equalities.
spec.md §4.H, grounded in `demod.c`.

[DemodIndex] holds the active demodulators, each already oriented (or marked non-oriented, in
which case [orient check](crate::order::Order::term_order) gates every individual rewrite step
rather than the rule as a whole). [demodulate] walks a term bottom-up — literally: it demodulates
every argument before attempting a rewrite at the node itself — and keeps rewriting a node until no
demodulator applies or the caller's step budget is exhausted (spec.md §4.H: "Rewriting consumes a
`step_budget`... and respects a `size_increase_budget`"). Every successful step is appended to a
[RewriteTrace] the caller folds into the clause's [justification](crate::justify) once the whole
clause has been simplified.

This module indexes demodulators with a direct linear scan (the semantic equivalent of querying
[index::Mindex] configured with the `GENERALIZATION` query type over the demodulator set) rather
than wiring through the generic multi-context `Mindex` plumbing — a simplification recorded in
DESIGN.md; the production engine in [crate::context] is expected to back [DemodIndex] with an
[FPA](crate::index::fpa::FpaIndex) or [discrimination tree](crate::index::discrim_wild) once clause
volumes make a linear scan the bottleneck.
*/

use crate::ac_canon::ac_canonical;
use crate::binding::{BindingContext, Multiplier, Trail};
use crate::order::{Comparison, Order};
use crate::symbol::SymbolTable;
use crate::term::{TermArena, TermId, TermKind};
use crate::types::err::{DemodError, ErrorKind};
use crate::unify::instantiate;
use crate::unify::matching::match_term;

/// An active demodulator: `lhs → rhs`, optionally guarded by a condition atom (spec.md §4.H's
/// `cond → (α=β)` conditional demodulators) that must rewrite to the truth constant under the
/// same substitution before the step is accepted.
#[derive(Clone)]
pub struct DemodRule {
    pub id: u64,
    pub lhs: TermId,
    pub rhs: TermId,
    /// The context every occurrence of this rule's variables is interpreted under. Stable for
    /// the life of the rule (spec.md §4.C's context-multiplier scheme).
    pub multiplier: Multiplier,
    /// `true` if `lhs ≻ rhs` held at orientation time, so every instance may rewrite
    /// unconditionally; `false` demands `u ≻ βσ` be re-checked at each application site.
    pub oriented: bool,
    pub cond: Option<TermId>,
}

/// The active demodulator set. A direct linear scan over [DemodRule]s (see module docs).
#[derive(Default)]
pub struct DemodIndex {
    rules: Vec<DemodRule>,
}

impl DemodIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: DemodRule) {
        self.rules.push(rule);
    }

    pub fn remove(&mut self, id: u64) {
        self.rules.retain(|r| r.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DemodRule> {
        self.rules.iter()
    }

    /// Every rule whose left-hand side could rewrite an occurrence of `term` (used by backward
    /// demodulation, spec.md §4.H: "a dedicated back-demod index is queried with its left side as
    /// a pattern over all indexed term occurrences").
    pub fn rules_matching_lhs_of(&self, arena: &TermArena, contexts: &mut [BindingContext], trail: &mut Trail, term: TermId, term_ctx: Multiplier) -> Vec<u64> {
        let mut hits = Vec::new();
        for rule in &self.rules {
            let mark = trail.mark();
            if match_term(arena, contexts, trail, rule.lhs, rule.multiplier, term, term_ctx).is_ok() {
                hits.push(rule.id);
            }
            trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
        }
        hits
    }
}

/// One successful rewrite step, recorded in visitation order (spec.md §4.H: "`(demodulator_id,
/// pre_step_position, direction)`"). `position` is the bottom-up visitation index at the moment
/// of the rewrite, making the trace replayable independent of the final term's shape.
#[derive(Clone, Copy, Debug)]
pub struct RewriteStep {
    pub demodulator_id: u64,
    pub position: usize,
}

pub type RewriteTrace = Vec<RewriteStep>;

/// Budgets threaded through a single [demodulate] call.
pub struct DemodBudget {
    pub steps_remaining: u32,
    pub size_increase_remaining: i64,
}

/// Demodulate `term` to normal form against `index`, under `query_ctx` (the multiplier `term`'s
/// own variables are interpreted under — distinct from every rule's multiplier). Returns the
/// normal form and appends every successful step to `trace`. Fails with
/// [DemodError::StepBudget]/[DemodError::SizeBudget] exactly when the corresponding budget is
/// exhausted mid-rewrite (spec.md §4.H: "the caller is notified via a sentinel so upstream logic
/// can drop the clause").
#[allow(clippy::too_many_arguments)]
pub fn demodulate(
    syms: &SymbolTable,
    arena: &mut TermArena,
    contexts: &mut [BindingContext],
    trail: &mut Trail,
    order: &Order,
    index: &DemodIndex,
    term: TermId,
    query_ctx: Multiplier,
    budget: &mut DemodBudget,
    initial_size: usize,
    trace: &mut RewriteTrace,
    visit: &mut usize,
) -> Result<TermId, ErrorKind> {
    let rebuilt = match arena.get(term).kind.clone() {
        TermKind::Variable(_) => term,
        TermKind::Rigid(sym, args) => {
            let mut new_args = Vec::with_capacity(args.len());
            for a in args {
                let a = demodulate(syms, arena, contexts, trail, order, index, a, query_ctx, budget, initial_size, trace, visit)?;
                new_args.push(a);
            }
            arena.make_rigid(sym, new_args)
        }
    };
    let rebuilt = ac_canonical(syms, arena, rebuilt, None);
    *visit += 1;
    let position = *visit;

    let mut current = rebuilt;
    loop {
        if budget.steps_remaining == 0 {
            return Err(DemodError::StepBudget.into());
        }
        match top_rewrite(syms, arena, contexts, trail, order, index, current, query_ctx)? {
            Some((next, rule_id)) => {
                let next = ac_canonical(syms, arena, next, None);
                let size = arena.size(next) as i64;
                if size > initial_size as i64 + budget.size_increase_remaining {
                    return Err(DemodError::SizeBudget.into());
                }
                budget.steps_remaining -= 1;
                trace.push(RewriteStep { demodulator_id: rule_id, position });
                current = next;
            }
            None => break,
        }
    }

    Ok(current)
}

fn top_rewrite(
    syms: &SymbolTable,
    arena: &mut TermArena,
    contexts: &mut [BindingContext],
    trail: &mut Trail,
    order: &Order,
    index: &DemodIndex,
    term: TermId,
    term_ctx: Multiplier,
) -> Result<Option<(TermId, u64)>, ErrorKind> {
    for rule in index.iter() {
        let mark = trail.mark();
        if match_term(arena, contexts, trail, rule.lhs, rule.multiplier, term, term_ctx).is_err() {
            trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
            continue;
        }

        let beta_sigma = instantiate(arena, contexts, rule.rhs, rule.multiplier, crate::binding::MAX_VARS);

        if !rule.oriented && !matches!(order.term_order(syms, arena, term, beta_sigma), Comparison::Gt) {
            trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
            continue;
        }

        if let Some(cond) = rule.cond {
            let cond_sigma = instantiate(arena, contexts, cond, rule.multiplier, crate::binding::MAX_VARS);
            let mut sub_budget = DemodBudget {
                steps_remaining: 10_000,
                size_increase_remaining: i64::MAX / 2,
            };
            let mut sub_trace = Vec::new();
            let mut visit = 0usize;
            let fresh_ctx = term_ctx;
            let cond_size = arena.size(cond_sigma);
            let evaluated = demodulate(syms, arena, contexts, trail, order, index, cond_sigma, fresh_ctx, &mut sub_budget, cond_size, &mut sub_trace, &mut visit)?;
            let is_true = syms.truth.is_some_and(|t| arena.symbol(evaluated) == Some(t));
            if !is_true {
                trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
                continue;
            }
        }

        trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
        // Re-apply the accepted match to leave the caller's bindings in place for `beta_sigma`
        // (already instantiated above, so it stands alone regardless of trail state).
        return Ok(Some((beta_sigma, rule.id)));
    }
    Ok(None)
}
