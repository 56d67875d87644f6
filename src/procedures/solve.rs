/*!
The given-clause loop. spec.md §4.L:

```text
loop:
    if passive is empty: return Exhausted
    given := pop_lightest(passive)
    simplify(given)
    if redundant(given, active): continue
    integrate(given)
    if given is an oriented unit equality: back_simplify(given, active)
    for each generating rule:
        new := rule(given, active)
        cheap_normalize(new)
        schedule(passive, new)
    if given is the empty clause: return Proof(given)
```

[run] drives this to completion or to one of the limits spec.md §6 names (`MAX_KEPT`, `MAX_GIVEN`,
`MAX_SECONDS`); [schedule] applies a freshly derived clause's [hint](crate::hints) weight override
before it enters `passive`; [pop_lightest] is the passive-queue selection spec.md's pseudocode
names directly.
*/

use std::time::Instant;

use crate::context::Context;
use crate::db::clist::ListName;
use crate::misc::log::targets;
use crate::procedures::{generate, integrate, simplify};
use crate::reports::Report;
use crate::types::err::ErrorKind;
use crate::types::ClauseId;

/// The passive-queue weight of `id`: a hint's `bsub_wt` override, or the clause's own weight.
fn ordering_weight(ctx: &Context, id: ClauseId) -> i64 {
    let clause = ctx.clauses.get(id).expect("id is a live clause");
    clause.bsub_weight().unwrap_or(clause.weight)
}

/// Pop the passive-list member with the lowest `(weight, id)`, breaking ties on ID for
/// determinism (spec.md §4.L's `pop_lightest(passive)`).
pub fn pop_lightest(ctx: &mut Context) -> Option<ClauseId> {
    let lightest = ctx
        .clauses
        .list(ListName::Passive)?
        .iter()
        .min_by_key(|&id| (ordering_weight(ctx, id), id.0))?;
    ctx.clauses.remove_from_list(lightest, ListName::Passive).ok()?;
    Some(lightest)
}

/// Schedule a freshly derived (and already [cheap_normalize](simplify::cheap_normalize)d) clause
/// into `passive`, applying a matching hint's weight override and labels first (spec.md §4.J).
pub fn schedule(ctx: &mut Context, id: ClauseId) -> Result<(), ErrorKind> {
    let literals = ctx.clauses.get(id)?.literals.clone();
    let qm = ctx.query_ctx();
    if let Some(hit) = ctx.hints.check(&mut ctx.arena, &mut ctx.contexts, &mut ctx.trail, &literals, qm) {
        let clause = ctx.clauses.get_mut(id)?;
        if ctx.config.hint_weight_override.value {
            if let Some(w) = hit.weight_override {
                clause.attributes.push(crate::db::clause::Attribute::BsubWeight(w));
            }
        }
        for label in hit.labels {
            clause.attributes.push(crate::db::clause::Attribute::Label(label));
        }
    }
    ctx.clauses.add_to_list(id, ListName::Passive)?;
    Ok(())
}

fn time_exceeded(ctx: &Context, started: Instant) -> bool {
    match ctx.config.time_limit.value {
        Some(limit) => started.elapsed() >= limit,
        None => false,
    }
}

/// Run the saturation loop to completion or to a configured limit (spec.md §4.L/§6).
pub fn run(ctx: &mut Context) -> Report {
    let started = Instant::now();

    let sos: Vec<ClauseId> = ctx.clauses.list(ListName::Sos).map(|l| l.iter().collect()).unwrap_or_default();
    for id in sos {
        if schedule(ctx, id).is_err() {
            return Report::MaxKept;
        }
    }

    loop {
        if time_exceeded(ctx, started) {
            return Report::MaxSeconds;
        }
        if let Some(max) = ctx.config.max_given.value {
            if ctx.counters.given_clauses >= max {
                return Report::MaxGiven;
            }
        }
        if let Some(max) = ctx.config.max_kept.value {
            if ctx.counters.clauses_retained >= max {
                return Report::MaxKept;
            }
        }

        let Some(given) = pop_lightest(ctx) else {
            return Report::Exhausted;
        };
        ctx.counters.given_clauses += 1;
        log::debug!(target: targets::GIVEN_CLAUSE, "selected {given:?}, weight {}", ordering_weight(ctx, given));

        let usable: Vec<ClauseId> = match ctx.clauses.list(ListName::Usable) {
            Some(list) => list.iter().collect(),
            None => Vec::new(),
        };

        if simplify::forward_simplify(ctx, given, &usable).is_err() {
            ctx.clauses.remove_from_all_lists(given).ok();
            ctx.clauses.drop_if_orphaned(given);
            ctx.counters.clauses_retained = ctx.counters.clauses_retained.saturating_sub(1);
            continue;
        }

        let literals = match ctx.clauses.get(given) {
            Ok(c) => c.literals.clone(),
            Err(_) => continue,
        };
        match simplify::is_redundant(ctx, &literals, &usable) {
            Ok(true) => {
                ctx.clauses.remove_from_all_lists(given).ok();
                ctx.clauses.drop_if_orphaned(given);
                ctx.counters.clauses_retained = ctx.counters.clauses_retained.saturating_sub(1);
                continue;
            }
            Err(_) => {
                ctx.clauses.remove_from_all_lists(given).ok();
                ctx.clauses.drop_if_orphaned(given);
                ctx.counters.clauses_retained = ctx.counters.clauses_retained.saturating_sub(1);
                continue;
            }
            Ok(false) => {}
        }

        if ctx.clauses.get(given).map(|c| c.is_empty_clause()).unwrap_or(false) {
            return Report::Proof(given);
        }

        if integrate::integrate(ctx, given).is_err() {
            continue;
        }

        let is_oriented_unit_eq = ctx
            .clauses
            .get(given)
            .map(|c| c.literals.len() == 1 && c.literals[0].positive && c.literals[0].oriented)
            .unwrap_or(false);
        if is_oriented_unit_eq {
            let usable: Vec<ClauseId> = ctx.clauses.list(ListName::Usable).map(|l| l.iter().collect()).unwrap_or_default();
            log::debug!(target: targets::BACK_SIMPLIFY, "back-simplifying against {} active clauses after {given:?}", usable.len());
            if simplify::back_simplify(ctx, given, &usable).is_err() {
                return Report::MaxKept;
            }
        }

        let usable: Vec<ClauseId> = ctx.clauses.list(ListName::Usable).map(|l| l.iter().collect()).unwrap_or_default();
        let generated = match generate::generate_from_given(ctx, given, &usable) {
            Ok(ids) => ids,
            Err(_) => continue,
        };
        ctx.counters.clauses_generated += generated.len() as u64;

        for id in generated {
            if ctx.clauses.get(id).map(|c| c.is_empty_clause()).unwrap_or(false) {
                return Report::Proof(id);
            }
            let literals = match ctx.clauses.get(id) {
                Ok(c) => c.literals.clone(),
                Err(_) => continue,
            };
            let normalized = match simplify::cheap_normalize(ctx, literals) {
                Ok(lits) => lits,
                Err(_) => continue,
            };
            if let Ok(clause) = ctx.clauses.get_mut(id) {
                clause.literals = normalized;
            }
            if ctx.clauses.get(id).map(|c| c.is_empty_clause()).unwrap_or(false) {
                return Report::Proof(id);
            }
            if schedule(ctx, id).is_err() {
                return Report::MaxKept;
            }
        }
    }
}
