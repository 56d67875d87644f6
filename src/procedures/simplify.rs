/*!
Forward and backward simplification. spec.md §4.L: `simplify(given)` reduces the popped clause to
normal form before the redundancy check; `redundant(given, active)` tests tautology/AC-redundancy/
forward subsumption; a successfully integrated oriented unit equality triggers back-demodulation
and back-subsumption over the active set.

[cheap_normalize] is the cheaper pass applied to every freshly *generated* clause before it is
scheduled to passive (xx-resolution plus duplicate-literal merging); [forward_simplify] is the full
pass applied to the clause popped as `given` (demodulation to normal form, unit deletion, then
xx-resolution/merging again, since demodulation can itself produce a self-inequality or a
duplicate literal that nothing upstream of it would catch).
*/

use crate::binding::MAX_VARS;
use crate::context::Context;
use crate::db::clause::Literal;
use crate::demod::{demodulate, DemodBudget};
use crate::justify::{DemodStep, Direction, Primary, Secondary};
use crate::subsume::subsumes;
use crate::types::err::ErrorKind;
use crate::types::ClauseId;
use crate::unify::matching::match_term;
use crate::unify::unify;

/// `true` if `literals` is a tautology: two literals of opposite sign share the same atom.
pub fn is_tautology(ctx: &Context, literals: &[Literal]) -> bool {
    for i in 0..literals.len() {
        for j in (i + 1)..literals.len() {
            if literals[i].positive != literals[j].positive && ctx.arena.term_ident(literals[i].atom, literals[j].atom) {
                return true;
            }
        }
    }
    false
}

/// `true` if `literals` is redundant against the active set: a tautology, AC-redundant, or
/// subsumed by some clause already in `active` (spec.md §4.L's `redundant(given, active)`).
pub fn is_redundant(ctx: &mut Context, literals: &[Literal], active: &[ClauseId]) -> Result<bool, ErrorKind> {
    if is_tautology(ctx, literals) {
        return Ok(true);
    }
    if ctx.config.ac_redundancy.value && crate::ac_redundancy::is_ac_redundant(&ctx.symbols, &mut ctx.arena, literals) {
        return Ok(true);
    }
    if !ctx.config.subsumption.value {
        return Ok(false);
    }

    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let qm = ctx.query_ctx();
    let mut redundant = false;
    for &other in active {
        let other_lits = ctx.clauses.get(other)?.literals.clone();
        let mark = ctx.trail.mark();
        let hit = subsumes(&mut ctx.arena, &mut ctx.contexts, &mut ctx.trail, &other_lits, m, literals, qm);
        ctx.rollback(mark);
        if hit {
            redundant = true;
            break;
        }
    }
    ctx.release_multiplier(guard);
    Ok(redundant)
}

/// xx-resolution: a negative equality literal whose two sides unify is always false, so it (and
/// the unifier applied to the rest of the clause) can be dropped. Runs one substitution-finding
/// pass at a time, looping to a fixpoint. Returns the dropped literal's index alongside the
/// rebuilt clause, for callers that attach a [Secondary::Xx] cell.
fn xx_resolve_once(ctx: &mut Context, literals: &[Literal]) -> Result<Option<(u32, Vec<Literal>)>, ErrorKind> {
    let Some(eq) = ctx.symbols.equality else {
        return Ok(None);
    };
    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let mut result = None;
    for (idx, lit) in literals.iter().enumerate() {
        if lit.positive || ctx.arena.symbol(lit.atom) != Some(eq) {
            continue;
        }
        let args = ctx.arena.args(lit.atom).to_vec();
        if args.len() != 2 {
            continue;
        }
        let mark = ctx.trail.mark();
        if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, args[0], m, args[1], m).is_ok() {
            let mut next = Vec::with_capacity(literals.len() - 1);
            for (i, l) in literals.iter().enumerate() {
                if i == idx {
                    continue;
                }
                let atom = crate::unify::instantiate(&mut ctx.arena, &ctx.contexts, l.atom, m, MAX_VARS);
                next.push(Literal::new(l.positive, atom));
            }
            ctx.rollback(mark);
            result = Some((idx as u32, next));
            break;
        }
        ctx.rollback(mark);
    }
    ctx.release_multiplier(guard);
    Ok(result)
}

/// xx-resolution as its own generating step over an already-integrated clause, recorded with its
/// own [Primary::XxRes] cell --- distinct from the inline pass [cheap_normalize] runs over a
/// clause still being assembled (which has no clause identity yet to attach a justification to).
pub fn xx_resolve(ctx: &mut Context, parent: ClauseId) -> Result<Option<ClauseId>, ErrorKind> {
    let Some(eq) = ctx.symbols.equality else {
        return Ok(None);
    };
    let literals = ctx.clauses.get(parent)?.literals.clone();
    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let mut derived = None;
    for (idx, lit) in literals.iter().enumerate() {
        if lit.positive || ctx.arena.symbol(lit.atom) != Some(eq) {
            continue;
        }
        let args = ctx.arena.args(lit.atom).to_vec();
        if args.len() != 2 {
            continue;
        }
        let mark = ctx.trail.mark();
        let unifies = unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, args[0], m, args[1], m).is_ok();
        if unifies {
            let mut rest = Vec::with_capacity(literals.len() - 1);
            for (i, l) in literals.iter().enumerate() {
                if i == idx {
                    continue;
                }
                let atom = crate::unify::instantiate(&mut ctx.arena, &ctx.contexts, l.atom, m, MAX_VARS);
                rest.push(Literal::new(l.positive, atom));
            }
            ctx.rollback(mark);
            derived = Some((idx as u32, rest));
            break;
        }
        ctx.rollback(mark);
    }
    ctx.release_multiplier(guard);

    match derived {
        Some((lit, literals)) => Ok(Some(ctx.add_clause(literals, Primary::XxRes { parent, lit })?)),
        None => Ok(None),
    }
}

/// Merge literals with the same sign and identical atom.
fn dedup_literals(ctx: &Context, literals: Vec<Literal>) -> Vec<Literal> {
    let mut out: Vec<Literal> = Vec::with_capacity(literals.len());
    for lit in literals {
        let dup = out.iter().any(|kept: &Literal| kept.positive == lit.positive && ctx.arena.term_ident(kept.atom, lit.atom));
        if !dup {
            out.push(lit);
        }
    }
    out
}

/// As [dedup_literals], but records a [Secondary::Merge] cell (positions in `literals`, the
/// pre-merge clause) for each literal dropped as a duplicate of an earlier one.
fn dedup_literals_recording(ctx: &Context, literals: Vec<Literal>, record: &mut Vec<Secondary>) -> Vec<Literal> {
    let mut out: Vec<(u32, Literal)> = Vec::with_capacity(literals.len());
    for (i, lit) in literals.into_iter().enumerate() {
        let kept = out.iter().find(|(_, kept): &&(u32, Literal)| kept.positive == lit.positive && ctx.arena.term_ident(kept.atom, lit.atom));
        match kept {
            Some((kept_idx, _)) => record.push(Secondary::Merge { kept: *kept_idx, dropped: i as u32 }),
            None => out.push((i as u32, lit)),
        }
    }
    out.into_iter().map(|(_, lit)| lit).collect()
}

/// The cheap normalization applied to every freshly generated clause before scheduling
/// (spec.md §4.L): xx-resolution to a fixpoint, then duplicate-literal merging.
pub fn cheap_normalize(ctx: &mut Context, mut literals: Vec<Literal>) -> Result<Vec<Literal>, ErrorKind> {
    while let Some((_idx, next)) = xx_resolve_once(ctx, &literals)? {
        literals = next;
    }
    Ok(dedup_literals(ctx, literals))
}

/// Unit clause deletion: drop any literal of `literals` whose complement is an instance of some
/// unit clause in `usable` (spec.md §4.L/§4.J). Deletions are recorded on `record` as
/// [Secondary::UnitDel] cells.
fn unit_delete(ctx: &mut Context, literals: Vec<Literal>, usable: &[ClauseId], record: &mut Vec<Secondary>) -> Result<Vec<Literal>, ErrorKind> {
    let guard = ctx.lease_multiplier()?;
    let pm = guard.multiplier();
    let qm = ctx.query_ctx();
    let mut out = Vec::with_capacity(literals.len());
    for (i, lit) in literals.into_iter().enumerate() {
        let mut deleted = None;
        for &u in usable {
            let unit_lits = ctx.clauses.get(u)?.literals.clone();
            if unit_lits.len() != 1 || unit_lits[0].positive == lit.positive {
                continue;
            }
            let mark = ctx.trail.mark();
            let hit = match_term(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, unit_lits[0].atom, pm, lit.atom, qm).is_ok();
            ctx.rollback(mark);
            if hit {
                deleted = Some(u);
                break;
            }
        }
        match deleted {
            Some(u) => record.push(Secondary::UnitDel { lit: i as u32, unit: u }),
            None => out.push(lit),
        }
    }
    ctx.release_multiplier(guard);
    Ok(out)
}

/// Reduce `given` to normal form: demodulate every literal against the active demodulator set,
/// delete literals subsumed by unit clauses in `usable`, then xx-resolve and merge duplicates to a
/// fixpoint (spec.md §4.L's `simplify(given)`). The xx-resolution pass matters here as much as on
/// freshly generated clauses: demodulation alone can rewrite a literal into a self-inequality, and
/// nothing else in this pipeline would ever reduce that clause to empty.
pub fn forward_simplify(ctx: &mut Context, given: ClauseId, usable: &[ClauseId]) -> Result<(), ErrorKind> {
    let mut literals = ctx.clauses.get(given)?.literals.clone();
    let mut record = Vec::new();

    for (i, lit) in literals.iter_mut().enumerate() {
        let mut budget = DemodBudget {
            steps_remaining: ctx.config.demod_step_budget.value,
            size_increase_remaining: ctx.config.demod_size_budget.value,
        };
        let initial_size = ctx.arena.size(lit.atom);
        let mut trace = Vec::new();
        let mut visit = 0usize;
        let normal = demodulate(
            &ctx.symbols,
            &mut ctx.arena,
            &mut ctx.contexts,
            &mut ctx.trail,
            &ctx.order,
            &ctx.demodulators,
            lit.atom,
            ctx.query_ctx(),
            &mut budget,
            initial_size,
            &mut trace,
            &mut visit,
        )?;
        if !trace.is_empty() {
            let steps: Vec<DemodStep> = trace
                .iter()
                .map(|s| DemodStep { id: ClauseId(s.demodulator_id), sequence: s.position as u32, direction: Direction::L })
                .collect();
            record.push(Secondary::Rewrite { lit: i as u32, steps });
        }
        lit.atom = normal;
    }

    literals = unit_delete(ctx, literals, usable, &mut record)?;

    while let Some((idx, next)) = xx_resolve_once(ctx, &literals)? {
        record.push(Secondary::Xx { lit: idx });
        literals = next;
    }
    literals = dedup_literals_recording(ctx, literals, &mut record);

    let clause = ctx.clauses.get_mut(given)?;
    clause.literals = literals;
    for cell in record {
        clause.justification.push_secondary(cell);
    }
    Ok(())
}

/// Back-demodulation: re-run [forward_simplify]'s rewrite step over every clause of `usable`
/// against the (now updated) active demodulator set, since a newly integrated oriented unit
/// equality may rewrite literals that were already in normal form before it arrived. A clause a
/// rewrite step actually touches keeps its `ClauseId` but its provenance is replaced wholesale with
/// [Primary::BackRewrite] --- LADR records back-rewriting as the clause's origin, not as a secondary
/// cell layered atop whatever justified it before --- with xx-resolution/merge cells from the same
/// pass recorded as usual on top of that. The clause's weight, `active_literals` entries, and
/// `pair_scheduler` bucket are all refreshed to match its new literal set.
pub fn back_demod(ctx: &mut Context, usable: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    let mut touched = Vec::new();
    for &id in usable {
        let literals = ctx.clauses.get(id)?.literals.clone();
        let mut rewritten = Vec::with_capacity(literals.len());
        let mut changed = false;
        let mut steps: Vec<DemodStep> = Vec::new();

        for lit in literals.iter() {
            let mut budget = DemodBudget {
                steps_remaining: ctx.config.demod_step_budget.value,
                size_increase_remaining: ctx.config.demod_size_budget.value,
            };
            let initial_size = ctx.arena.size(lit.atom);
            let mut trace = Vec::new();
            let mut visit = 0usize;
            let normal = demodulate(
                &ctx.symbols,
                &mut ctx.arena,
                &mut ctx.contexts,
                &mut ctx.trail,
                &ctx.order,
                &ctx.demodulators,
                lit.atom,
                ctx.query_ctx(),
                &mut budget,
                initial_size,
                &mut trace,
                &mut visit,
            )?;
            if !trace.is_empty() {
                changed = true;
                steps.extend(trace.iter().map(|s| DemodStep { id: ClauseId(s.demodulator_id), sequence: s.position as u32, direction: Direction::L }));
            }
            rewritten.push(Literal::new(lit.positive, normal));
        }

        if changed {
            let old_weight = ctx.clauses.get(id)?.weight;
            ctx.deindex_active_clause(id, &literals);

            let mut new_literals = rewritten;
            let mut record = Vec::new();
            while let Some((idx, next)) = xx_resolve_once(ctx, &new_literals)? {
                record.push(Secondary::Xx { lit: idx });
                new_literals = next;
            }
            new_literals = dedup_literals_recording(ctx, new_literals, &mut record);
            let new_weight: i64 = new_literals.iter().map(|l| ctx.arena.size(l.atom) as i64).sum();

            let clause = ctx.clauses.get_mut(id)?;
            clause.literals = new_literals;
            clause.weight = new_weight;
            clause.justification.primary = Primary::BackRewrite { parent: id, steps };
            clause.justification.secondary.clear();
            for cell in record {
                clause.justification.push_secondary(cell);
            }

            ctx.clauses.pair_scheduler_mut().remove(id, old_weight);
            ctx.clauses.pair_scheduler_mut().insert(id, new_weight);
            ctx.index_active_clause(id)?;

            touched.push(id);
        }
    }
    Ok(touched)
}

/// Back-subsumption: drop every clause of `usable`/`sos` that `new_clause` subsumes.
pub fn back_subsume(ctx: &mut Context, new_clause: ClauseId, candidates: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    if !ctx.config.subsumption.value {
        return Ok(Vec::new());
    }
    let new_lits = ctx.clauses.get(new_clause)?.literals.clone();
    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let qm = ctx.query_ctx();
    let mut removed = Vec::new();
    for &other in candidates {
        if other == new_clause {
            continue;
        }
        let other_lits = ctx.clauses.get(other)?.literals.clone();
        let mark = ctx.trail.mark();
        let hit = subsumes(&mut ctx.arena, &mut ctx.contexts, &mut ctx.trail, &new_lits, m, &other_lits, qm);
        ctx.rollback(mark);
        if hit {
            let other_weight = ctx.clauses.get(other)?.weight;
            ctx.deindex_active_clause(other, &other_lits);
            ctx.clauses.pair_scheduler_mut().remove(other, other_weight);
            ctx.clauses.remove_from_all_lists(other)?;
            ctx.clauses.drop_if_orphaned(other);
            removed.push(other);
        }
    }
    ctx.release_multiplier(guard);
    Ok(removed)
}

/// Run back-demodulation then back-subsumption for a newly integrated clause
/// (spec.md §4.L: an oriented unit equality triggers both passes over the active set).
pub fn back_simplify(ctx: &mut Context, new_clause: ClauseId, usable: &[ClauseId]) -> Result<(), ErrorKind> {
    back_demod(ctx, usable)?;
    back_subsume(ctx, new_clause, usable)?;
    Ok(())
}

/// Retire a demodulator rule: drop it from both demodulator indexes and release the multiplier
/// its own variable namespace was leased from (spec.md §3/§9's bounded multiplier pool --- a rule
/// whose guard is never released permanently consumes one of the pool's 64 slots).
pub fn retire_demodulator(ctx: &mut Context, rule_id: ClauseId) {
    ctx.demodulators.remove(rule_id.0);
    ctx.back_demodulators.remove(rule_id.0);
    if let Some(guard) = ctx.demod_multipliers.remove(&rule_id) {
        ctx.release_multiplier(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::justify::Primary;

    fn fresh() -> Context {
        Context::new(Config::default())
    }

    #[test]
    fn xx_resolution_drops_a_self_unifying_negative_equality() {
        let mut ctx = fresh();
        let eq = ctx.symbols.intern_equality();
        let p = ctx.fresh_symbol("p", 0, true).unwrap();

        let x = ctx.arena.make_var(0);
        let y = ctx.arena.make_var(1);
        let neq = ctx.make_term(eq, vec![x, y]);
        let pp = ctx.make_term(p, vec![]);
        let literals = vec![Literal::new(false, neq), Literal::new(true, pp)];

        let normalized = cheap_normalize(&mut ctx, literals).unwrap();
        assert_eq!(normalized.len(), 1);
        assert!(normalized[0].positive);
    }

    #[test]
    fn duplicate_literals_are_merged() {
        let mut ctx = fresh();
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let pp1 = ctx.make_term(p, vec![]);
        let pp2 = ctx.make_term(p, vec![]);
        let literals = vec![Literal::new(true, pp1), Literal::new(true, pp2)];

        let normalized = cheap_normalize(&mut ctx, literals).unwrap();
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn tautology_is_detected() {
        let mut ctx = fresh();
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let pp1 = ctx.make_term(p, vec![]);
        let pp2 = ctx.make_term(p, vec![]);
        let literals = vec![Literal::new(true, pp1), Literal::new(false, pp2)];
        assert!(is_redundant(&mut ctx, &literals, &[]).unwrap());
    }

    #[test]
    fn forward_simplify_deletes_a_literal_covered_by_a_unit_clause() {
        let mut ctx = fresh();
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let q = ctx.fresh_symbol("q", 0, true).unwrap();

        let neg_p = ctx.make_term(p, vec![]);
        let unit = ctx.add_clause(vec![Literal::new(true, neg_p)], Primary::Input).unwrap();

        let pp = ctx.make_term(p, vec![]);
        let qq = ctx.make_term(q, vec![]);
        let given = ctx.add_clause(vec![Literal::new(false, pp), Literal::new(true, qq)], Primary::Input).unwrap();

        forward_simplify(&mut ctx, given, &[unit]).unwrap();
        let clause = ctx.clauses.get(given).unwrap();
        assert_eq!(clause.literals.len(), 1);
        assert!(clause.literals[0].positive);
    }

    #[test]
    fn forward_simplify_empties_a_clause_demodulated_into_a_self_inequality() {
        let mut ctx = fresh();
        let eq = ctx.symbols.intern_equality();
        let a = ctx.fresh_symbol("a", 0, false).unwrap();
        let b = ctx.fresh_symbol("b", 0, false).unwrap();
        ctx.symbols.set_precedence(a, 1);
        ctx.symbols.set_precedence(b, 0);

        let ta = ctx.make_term(a, vec![]);
        let tb = ctx.make_term(b, vec![]);
        ctx.demodulators.insert(crate::demod::DemodRule {
            id: 1,
            lhs: ta,
            rhs: tb,
            multiplier: crate::binding::Multiplier(0),
            oriented: true,
            cond: None,
        });

        let lhs = ctx.make_term(a, vec![]);
        let rhs = ctx.make_term(b, vec![]);
        let atom = ctx.make_term(eq, vec![lhs, rhs]);
        let given = ctx.add_clause(vec![Literal::new(false, atom)], Primary::Input).unwrap();

        forward_simplify(&mut ctx, given, &[]).unwrap();
        let clause = ctx.clauses.get(given).unwrap();
        assert!(clause.literals.is_empty());
    }
}
