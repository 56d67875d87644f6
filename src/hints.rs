/*!
Hint subsumption. spec.md §4.J, grounded in `hints.c`.

A [HintStore] is a second subsumption index over user-supplied clauses. A newly generated clause
that a hint subsumes (note the direction: the *hint* is `c`, the candidate is `d` in
[subsume::subsumes](crate::subsume::subsumes)'s terms) has its passive-queue weight overridden by
the hint's `bsub_wt` attribute, and inherits the hint's labels (spec.md: "labels on the matching
hint propagate onto the new clause"). Matching is a direct linear scan over stored hints, the same
simplification already applied to [the demodulator set](crate::demod::DemodIndex) and recorded in
DESIGN.md.
*/

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::db::clause::Literal;
use crate::subsume::subsumes;
use crate::term::TermArena;
use crate::types::ClauseId;

pub struct Hint {
    pub id: ClauseId,
    pub literals: Vec<Literal>,
    pub multiplier: Multiplier,
    pub bsub_weight: Option<i64>,
    pub labels: Vec<String>,
}

/// What matching a hint contributes to the clause it subsumed.
pub struct HintMatch {
    pub hint_id: ClauseId,
    pub weight_override: Option<i64>,
    pub labels: Vec<String>,
}

#[derive(Default)]
pub struct HintStore {
    hints: Vec<Hint>,
}

impl HintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hint: Hint) {
        self.hints.push(hint);
    }

    /// The first hint (in insertion order) that subsumes `candidate`, if any.
    pub fn check(&self, arena: &mut TermArena, contexts: &mut [BindingContext], trail: &mut Trail, candidate: &[Literal], candidate_ctx: Multiplier) -> Option<HintMatch> {
        for hint in &self.hints {
            let mark = trail.mark();
            let hit = subsumes(arena, contexts, trail, &hint.literals, hint.multiplier, candidate, candidate_ctx);
            trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
            if hit {
                return Some(HintMatch {
                    hint_id: hint.id,
                    weight_override: hint.bsub_weight,
                    labels: hint.labels.clone(),
                });
            }
        }
        None
    }
}
