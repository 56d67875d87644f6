/*!
Generating inferences. spec.md §4.L names binary resolution, factoring, equality factoring,
paramodulation, hyperresolution, and UR-resolution without giving per-rule pseudocode; each rule
here follows the standard resolution/paramodulation calculus, built on the already-established
[unify], [instantiate](crate::unify::instantiate), and context-multiplier machinery
(spec.md §4.C/§4.D).

Every rule follows the same shape: lease one [MultiplierGuard](crate::binding::MultiplierGuard)
per clause involved, unify/match under those multipliers, instantiate the surviving literals into
standalone terms, then roll the trail back and release the guards before the operation returns ---
multipliers are never held beyond the one operation that leased them (contrast
[DemodRule](crate::demod::DemodRule), whose multiplier persists for the rule's lifetime).
[finalize] renumbers every literal of a freshly built clause against one shared dense variable
prefix, so two literals that share a variable still share it after renumbering.
*/

use crate::binding::MAX_VARS;
use crate::context::Context;
use crate::db::clause::Literal;
use crate::index::QueryType;
use crate::justify::{ParaVariant, Position, Primary};
use crate::misc::log::targets;
use crate::term::{TermArena, TermId};
use crate::types::err::ErrorKind;
use crate::types::ClauseId;
use crate::unify::{instantiate, unify};

/// Renumber every literal atom of a freshly built clause against one shared dense variable
/// prefix (spec.md §3's "variables renumbered to a dense prefix after each rewrite", applied here
/// clause-wide rather than literal-by-literal so shared variables across literals stay shared).
fn finalize(arena: &mut TermArena, literals: Vec<Literal>) -> Vec<Literal> {
    let atoms: Vec<TermId> = literals.iter().map(|l| l.atom).collect();
    let renumbered = arena.renumber_dense_many(&atoms);
    literals
        .into_iter()
        .zip(renumbered)
        .map(|(l, atom)| Literal::new(l.positive, atom))
        .collect()
}

/// Binary resolution: literal `lit1` of `p1` against literal `lit2` of `p2`, requiring opposite
/// signs and a successful unifier. Returns `None` (not an error) when the literals don't resolve.
pub fn resolve(ctx: &mut Context, p1: ClauseId, lit1: u32, p2: ClauseId, lit2: u32) -> Result<Option<ClauseId>, ErrorKind> {
    let c1 = ctx.clauses.get(p1)?.literals.clone();
    let c2 = ctx.clauses.get(p2)?.literals.clone();
    let l1 = c1[lit1 as usize];
    let l2 = c2[lit2 as usize];
    if l1.positive == l2.positive {
        return Ok(None);
    }

    let g1 = ctx.lease_multiplier()?;
    let g2 = ctx.lease_multiplier()?;
    let m1 = g1.multiplier();
    let m2 = g2.multiplier();
    let mark = ctx.trail.mark();

    if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, l1.atom, m1, l2.atom, m2).is_err() {
        ctx.rollback(mark);
        ctx.release_multiplier(g1);
        ctx.release_multiplier(g2);
        return Ok(None);
    }

    let mut literals = Vec::with_capacity(c1.len() + c2.len() - 2);
    for (i, lit) in c1.iter().enumerate() {
        if i as u32 == lit1 {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, m1, MAX_VARS);
        literals.push(Literal::new(lit.positive, atom));
    }
    for (i, lit) in c2.iter().enumerate() {
        if i as u32 == lit2 {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, m2, MAX_VARS);
        literals.push(Literal::new(lit.positive, atom));
    }

    ctx.rollback(mark);
    ctx.release_multiplier(g1);
    ctx.release_multiplier(g2);

    let literals = finalize(&mut ctx.arena, literals);
    let id = ctx.add_clause(literals, Primary::Resolve { p1, lit1, p2, lit2 })?;
    log::trace!(target: targets::GENERATE, "resolve({p1:?}.{lit1}, {p2:?}.{lit2}) -> {id:?}");
    Ok(Some(id))
}

/// Ordinary factoring: two same-sign literals of one clause unify and merge into one.
pub fn factor(ctx: &mut Context, parent: ClauseId, lit_a: u32, lit_b: u32) -> Result<Option<ClauseId>, ErrorKind> {
    let literals = ctx.clauses.get(parent)?.literals.clone();
    let la = literals[lit_a as usize];
    let lb = literals[lit_b as usize];
    if la.positive != lb.positive {
        return Ok(None);
    }

    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let mark = ctx.trail.mark();

    if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, la.atom, m, lb.atom, m).is_err() {
        ctx.rollback(mark);
        ctx.release_multiplier(guard);
        return Ok(None);
    }

    let mut out = Vec::with_capacity(literals.len() - 1);
    for (i, lit) in literals.iter().enumerate() {
        if i as u32 == lit_b {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, m, MAX_VARS);
        out.push(Literal::new(lit.positive, atom));
    }

    ctx.rollback(mark);
    ctx.release_multiplier(guard);

    let out = finalize(&mut ctx.arena, out);
    ctx.add_clause(out, Primary::Factor { parent, lit_a, lit_b }).map(Some)
}

/// Equality factoring: from `C ∨ s≈t ∨ u≈v` with `s` and `u` unifiable, derive `Cσ ∨ t≉v ∨ u≈v`.
/// Reuses [Primary::Factor] --- the justification vocabulary has no dedicated cell for this rule.
pub fn equality_factor(ctx: &mut Context, parent: ClauseId, lit_a: u32, lit_b: u32) -> Result<Option<ClauseId>, ErrorKind> {
    let Some(eq) = ctx.symbols.equality else {
        return Ok(None);
    };
    let literals = ctx.clauses.get(parent)?.literals.clone();
    let la = literals[lit_a as usize];
    let lb = literals[lit_b as usize];
    if !la.positive || !lb.positive {
        return Ok(None);
    }
    if ctx.arena.symbol(la.atom) != Some(eq) || ctx.arena.symbol(lb.atom) != Some(eq) {
        return Ok(None);
    }
    let la_args = ctx.arena.args(la.atom).to_vec();
    let lb_args = ctx.arena.args(lb.atom).to_vec();
    if la_args.len() != 2 || lb_args.len() != 2 {
        return Ok(None);
    }
    let (s, t) = (la_args[0], la_args[1]);
    let (u, v) = (lb_args[0], lb_args[1]);

    let guard = ctx.lease_multiplier()?;
    let m = guard.multiplier();
    let mark = ctx.trail.mark();

    if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, s, m, u, m).is_err() {
        ctx.rollback(mark);
        ctx.release_multiplier(guard);
        return Ok(None);
    }

    let t_i = instantiate(&mut ctx.arena, &ctx.contexts, t, m, MAX_VARS);
    let v_i = instantiate(&mut ctx.arena, &ctx.contexts, v, m, MAX_VARS);
    let v_i2 = instantiate(&mut ctx.arena, &ctx.contexts, v, m, MAX_VARS);
    let u_i = instantiate(&mut ctx.arena, &ctx.contexts, u, m, MAX_VARS);
    let tv_atom = ctx.arena.make_rigid(eq, vec![t_i, v_i]);
    let uv_atom = ctx.arena.make_rigid(eq, vec![u_i, v_i2]);

    let mut out = vec![Literal::new(false, tv_atom), Literal::new(true, uv_atom)];
    for (i, lit) in literals.iter().enumerate() {
        if i as u32 == lit_a || i as u32 == lit_b {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, m, MAX_VARS);
        out.push(Literal::new(lit.positive, atom));
    }

    ctx.rollback(mark);
    ctx.release_multiplier(guard);

    let out = finalize(&mut ctx.arena, out);
    ctx.add_clause(out, Primary::Factor { parent, lit_a, lit_b }).map(Some)
}

/// Every non-variable subterm of `term`, pre-order, paired with its position (spec.md's
/// `Position`: a path read left to right from the atom).
fn subterms(arena: &TermArena, term: TermId, path: &mut Vec<u32>, out: &mut Vec<(Position, TermId)>) {
    if arena.is_variable(term).is_some() {
        return;
    }
    out.push((path.clone(), term));
    for (i, &a) in arena.args(term).to_vec().iter().enumerate() {
        path.push(i as u32);
        subterms(arena, a, path, out);
        path.pop();
    }
}

fn walk_to_position(arena: &TermArena, term: TermId, path: &[u32]) -> Option<TermId> {
    let mut current = term;
    for &idx in path {
        current = *arena.args(current).get(idx as usize)?;
    }
    Some(current)
}

/// Rebuild `term`, replacing the subterm at `path` with `replacement`.
fn replace_at(arena: &mut TermArena, term: TermId, path: &[u32], replacement: TermId) -> TermId {
    let Some((&idx, rest)) = path.split_first() else {
        return replacement;
    };
    let sym = arena.symbol(term).expect("a non-empty path never points into a variable");
    let mut args = arena.args(term).to_vec();
    args[idx as usize] = replace_at(arena, args[idx as usize], rest, replacement);
    arena.make_rigid(sym, args)
}

/// Paramodulate the equation at `from`'s literal `from_lit` (`s ≈ t`) into `into`'s literal
/// `into_lit` at `position`, replacing the matched subterm with `t`.
pub fn paramodulate(ctx: &mut Context, from: ClauseId, from_lit: u32, into: ClauseId, into_lit: u32, position: &Position) -> Result<Option<ClauseId>, ErrorKind> {
    let Some(eq) = ctx.symbols.equality else {
        return Ok(None);
    };
    let from_lits = ctx.clauses.get(from)?.literals.clone();
    let into_lits = ctx.clauses.get(into)?.literals.clone();
    let fl = from_lits[from_lit as usize];
    let il = into_lits[into_lit as usize];
    if !fl.positive || ctx.arena.symbol(fl.atom) != Some(eq) {
        return Ok(None);
    }
    let args = ctx.arena.args(fl.atom).to_vec();
    if args.len() != 2 {
        return Ok(None);
    }
    let (s, t) = (args[0], args[1]);

    let Some(target) = walk_to_position(&ctx.arena, il.atom, position) else {
        return Ok(None);
    };
    if ctx.arena.is_variable(target).is_some() {
        return Ok(None);
    }

    let gf = ctx.lease_multiplier()?;
    let gi = ctx.lease_multiplier()?;
    let mf = gf.multiplier();
    let mi = gi.multiplier();
    let mark = ctx.trail.mark();

    if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, s, mf, target, mi).is_err() {
        ctx.rollback(mark);
        ctx.release_multiplier(gf);
        ctx.release_multiplier(gi);
        return Ok(None);
    }

    let t_i = instantiate(&mut ctx.arena, &ctx.contexts, t, mf, MAX_VARS);
    let into_atom_i = instantiate(&mut ctx.arena, &ctx.contexts, il.atom, mi, MAX_VARS);
    // `position` indexes the pre-instantiation atom; instantiate preserves shape one-for-one, so
    // the same path still addresses the rewritten subterm in the instantiated copy.
    let rewritten = replace_at(&mut ctx.arena, into_atom_i, position, t_i);

    let mut out = vec![Literal::new(il.positive, rewritten)];
    for (i, lit) in into_lits.iter().enumerate() {
        if i as u32 == into_lit {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, mi, MAX_VARS);
        out.push(Literal::new(lit.positive, atom));
    }
    for (i, lit) in from_lits.iter().enumerate() {
        if i as u32 == from_lit {
            continue;
        }
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, mf, MAX_VARS);
        out.push(Literal::new(lit.positive, atom));
    }

    ctx.rollback(mark);
    ctx.release_multiplier(gf);
    ctx.release_multiplier(gi);

    let out = finalize(&mut ctx.arena, out);
    let primary = Primary::Para {
        from,
        from_lit,
        into,
        into_lit,
        position: position.clone(),
        variant: ParaVariant::Plain,
    };
    ctx.add_clause(out, primary).map(Some)
}

/// Every paramodulation between `given` and each clause of `active`, in both directions.
pub fn paramodulate_all(ctx: &mut Context, given: ClauseId, active: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    let mut out = Vec::new();
    for &other in active {
        out.extend(paramodulate_pair(ctx, given, other)?);
        out.extend(paramodulate_pair(ctx, other, given)?);
    }
    out.extend(paramodulate_pair(ctx, given, given)?);
    Ok(out)
}

fn paramodulate_pair(ctx: &mut Context, from: ClauseId, into: ClauseId) -> Result<Vec<ClauseId>, ErrorKind> {
    let Some(eq) = ctx.symbols.equality else {
        return Ok(Vec::new());
    };
    let from_lits = ctx.clauses.get(from)?.literals.clone();
    let into_lits = ctx.clauses.get(into)?.literals.clone();
    let mut out = Vec::new();
    for (fi, fl) in from_lits.iter().enumerate() {
        if !fl.positive || ctx.arena.symbol(fl.atom) != Some(eq) {
            continue;
        }
        for (ii, il) in into_lits.iter().enumerate() {
            if from == into && fi == ii {
                continue;
            }
            let mut path = Vec::new();
            let mut positions = Vec::new();
            subterms(&ctx.arena, il.atom, &mut path, &mut positions);
            for (pos, _) in positions {
                if let Some(id) = paramodulate(ctx, from, fi as u32, into, ii as u32, &pos)? {
                    out.push(id);
                }
            }
        }
    }
    Ok(out)
}

/// Hyperresolution: `nucleus`'s negative literals, in index order, each resolved against the
/// corresponding unit positive clause of `satellites` in one combined unification; the surviving
/// clause is `nucleus`'s positive literals, instantiated.
pub fn hyperresolve(ctx: &mut Context, nucleus: ClauseId, satellites: &[ClauseId]) -> Result<Option<ClauseId>, ErrorKind> {
    let nucleus_lits = ctx.clauses.get(nucleus)?.literals.clone();
    let neg_indices: Vec<u32> = nucleus_lits.iter().enumerate().filter(|(_, l)| !l.positive).map(|(i, _)| i as u32).collect();
    if neg_indices.len() != satellites.len() {
        return Ok(None);
    }

    let nucleus_guard = ctx.lease_multiplier()?;
    let nm = nucleus_guard.multiplier();
    let mut sat_guards = Vec::with_capacity(satellites.len());
    for _ in satellites {
        sat_guards.push(ctx.lease_multiplier()?);
    }
    let sat_ms: Vec<_> = sat_guards.iter().map(|g| g.multiplier()).collect();

    let mark = ctx.trail.mark();
    let mut ok = true;
    for (k, &neg_idx) in neg_indices.iter().enumerate() {
        let sat_lits = ctx.clauses.get(satellites[k])?.literals.clone();
        if sat_lits.len() != 1 || !sat_lits[0].positive {
            ok = false;
            break;
        }
        if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, nucleus_lits[neg_idx as usize].atom, nm, sat_lits[0].atom, sat_ms[k]).is_err() {
            ok = false;
            break;
        }
    }

    if !ok {
        ctx.rollback(mark);
        ctx.release_multiplier(nucleus_guard);
        for g in sat_guards {
            ctx.release_multiplier(g);
        }
        return Ok(None);
    }

    let mut out = Vec::new();
    for lit in nucleus_lits.iter().filter(|l| l.positive) {
        let atom = instantiate(&mut ctx.arena, &ctx.contexts, lit.atom, nm, MAX_VARS);
        out.push(Literal::new(true, atom));
    }

    ctx.rollback(mark);
    ctx.release_multiplier(nucleus_guard);
    for g in sat_guards {
        ctx.release_multiplier(g);
    }

    let out = finalize(&mut ctx.arena, out);
    ctx.add_clause(out, Primary::Hyper { nucleus, satellites: satellites.to_vec() }).map(Some)
}

/// UR-resolution: every literal of `nucleus` except `resolvent_index` is resolved away against
/// the corresponding unit clause of `satellites`, leaving the one designated literal as a unit
/// resolvent.
pub fn ur_resolve(ctx: &mut Context, nucleus: ClauseId, resolvent_index: u32, satellites: &[ClauseId]) -> Result<Option<ClauseId>, ErrorKind> {
    let nucleus_lits = ctx.clauses.get(nucleus)?.literals.clone();
    let electrons: Vec<u32> = (0..nucleus_lits.len() as u32).filter(|&i| i != resolvent_index).collect();
    if electrons.len() != satellites.len() {
        return Ok(None);
    }

    let nucleus_guard = ctx.lease_multiplier()?;
    let nm = nucleus_guard.multiplier();
    let mut sat_guards = Vec::with_capacity(satellites.len());
    for _ in satellites {
        sat_guards.push(ctx.lease_multiplier()?);
    }
    let sat_ms: Vec<_> = sat_guards.iter().map(|g| g.multiplier()).collect();

    let mark = ctx.trail.mark();
    let mut ok = true;
    for (k, &lit_idx) in electrons.iter().enumerate() {
        let sat_lits = ctx.clauses.get(satellites[k])?.literals.clone();
        if sat_lits.len() != 1 || sat_lits[0].positive == nucleus_lits[lit_idx as usize].positive {
            ok = false;
            break;
        }
        if unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, nucleus_lits[lit_idx as usize].atom, nm, sat_lits[0].atom, sat_ms[k]).is_err() {
            ok = false;
            break;
        }
    }

    if !ok {
        ctx.rollback(mark);
        ctx.release_multiplier(nucleus_guard);
        for g in sat_guards {
            ctx.release_multiplier(g);
        }
        return Ok(None);
    }

    let resolvent = nucleus_lits[resolvent_index as usize];
    let atom = instantiate(&mut ctx.arena, &ctx.contexts, resolvent.atom, nm, MAX_VARS);
    let out = vec![Literal::new(resolvent.positive, atom)];

    ctx.rollback(mark);
    ctx.release_multiplier(nucleus_guard);
    for g in sat_guards {
        ctx.release_multiplier(g);
    }

    let out = finalize(&mut ctx.arena, out);
    ctx.add_clause(out, Primary::Ur { nucleus, satellites: satellites.to_vec() }).map(Some)
}

/// For each of `targets` (literal indices of `nucleus`), greedily pick the first unit clause in
/// `pool` of the opposite sign whose atom unifies with it under a pair of scratch multipliers ---
/// a documented simplification over searching every combination of satellite assignments.
fn greedy_satellites(ctx: &mut Context, nucleus: ClauseId, targets: &[u32], pool: &[ClauseId]) -> Result<Option<Vec<ClauseId>>, ErrorKind> {
    let nucleus_lits = ctx.clauses.get(nucleus)?.literals.clone();
    let scout_a = ctx.lease_multiplier()?;
    let scout_b = ctx.lease_multiplier()?;
    let ma = scout_a.multiplier();
    let mb = scout_b.multiplier();

    let mut chosen: Vec<ClauseId> = Vec::with_capacity(targets.len());
    let mut failed = false;
    for &idx in targets {
        let target_lit = nucleus_lits[idx as usize];
        let mut found = None;
        for &cand in pool {
            if cand == nucleus || chosen.contains(&cand) {
                continue;
            }
            let cand_lits = ctx.clauses.get(cand)?.literals.clone();
            if cand_lits.len() != 1 || cand_lits[0].positive == target_lit.positive {
                continue;
            }
            let mark = ctx.trail.mark();
            let hit = unify(&ctx.arena, &mut ctx.contexts, &mut ctx.trail, target_lit.atom, ma, cand_lits[0].atom, mb).is_ok();
            ctx.rollback(mark);
            if hit {
                found = Some(cand);
                break;
            }
        }
        match found {
            Some(cand) => chosen.push(cand),
            None => {
                failed = true;
                break;
            }
        }
    }

    ctx.release_multiplier(scout_a);
    ctx.release_multiplier(scout_b);

    Ok(if failed { None } else { Some(chosen) })
}

fn try_as_nucleus(ctx: &mut Context, nucleus: ClauseId, pool: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    let mut out = Vec::new();
    let literals = ctx.clauses.get(nucleus)?.literals.clone();
    if literals.len() < 2 {
        return Ok(out);
    }

    let neg_indices: Vec<u32> = literals.iter().enumerate().filter(|(_, l)| !l.positive).map(|(i, _)| i as u32).collect();
    if !neg_indices.is_empty() {
        if let Some(satellites) = greedy_satellites(ctx, nucleus, &neg_indices, pool)? {
            if let Some(id) = hyperresolve(ctx, nucleus, &satellites)? {
                out.push(id);
            }
        }
    }

    for resolvent_index in 0..literals.len() as u32 {
        let electrons: Vec<u32> = (0..literals.len() as u32).filter(|&i| i != resolvent_index).collect();
        if let Some(satellites) = greedy_satellites(ctx, nucleus, &electrons, pool)? {
            if let Some(id) = ur_resolve(ctx, nucleus, resolvent_index, &satellites)? {
                out.push(id);
            }
        }
    }

    Ok(out)
}

/// Every hyperresolution/UR-resolution reachable from `given`, either as the nucleus (against
/// `usable` as the satellite pool) or, if `given` is itself a unit clause, as a satellite feeding
/// each clause of `usable` as nucleus.
pub fn hyper_and_ur_from_given(ctx: &mut Context, given: ClauseId, usable: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    let mut out = try_as_nucleus(ctx, given, usable)?;
    if ctx.clauses.get(given)?.literals.len() == 1 {
        for &other in usable {
            out.extend(try_as_nucleus(ctx, other, &[given])?);
        }
    }
    Ok(out)
}

/// Candidate resolution partners for `atom`: every `(clause, literal)` pair `active_literals`
/// reports as unifiable with it (spec.md §4.E), returned sorted into the pair-scheduler's bucket
/// order so resolution walks the active set in the §5 `(i+j, i, j)` order rather than clause
/// insertion order. The query is leased its own fresh multiplier and every match --- hit or miss
/// --- is rolled back before the next candidate is tried, so that entries from unrelated clauses
/// (all indexed under the same reserved query context) never leave bindings live across each
/// other; `resolve` redoes the unifier itself under two freshly leased multipliers, so a
/// conservative (over-approximate) candidate set here costs nothing downstream.
fn resolution_candidates(ctx: &mut Context, atom: TermId) -> Result<Vec<(ClauseId, u32)>, ErrorKind> {
    let guard = ctx.lease_multiplier()?;
    let qm = guard.multiplier();
    let mut hits: Vec<(ClauseId, u32)> = Vec::new();

    let mark = ctx.trail.mark();
    let found = ctx.active_literals.first(&ctx.symbols, &mut ctx.arena, &mut ctx.contexts, &mut ctx.trail, atom, qm, QueryType::Unify, qm)?;
    ctx.rollback(mark);

    if let Some((mut position, hit)) = found {
        hits.push(hit);
        loop {
            let mark = ctx.trail.mark();
            let next = ctx.active_literals.next(&ctx.symbols, &mut ctx.arena, &mut ctx.contexts, &mut ctx.trail, atom, qm, QueryType::Unify, qm, &mut position)?;
            ctx.rollback(mark);
            match next {
                Some(hit) => hits.push(hit),
                None => break,
            }
        }
        ctx.active_literals.cancel(position);
    }
    ctx.release_multiplier(guard);

    hits.sort_by(|&(a, ai), &(b, bi)| {
        let wa = ctx.clauses.get(a).map(|c| c.weight).unwrap_or(0);
        let wb = ctx.clauses.get(b).map(|c| c.weight).unwrap_or(0);
        let ba = ctx.clauses.pair_scheduler().bucket_index(wa);
        let bb = ctx.clauses.pair_scheduler().bucket_index(wb);
        (ba, a.0, ai).cmp(&(bb, b.0, bi))
    });

    Ok(hits)
}

/// Every generating inference between `given` and the active (`usable`) clause set: binary
/// resolution, factoring, equality factoring, paramodulation, hyperresolution, and UR-resolution
/// (spec.md §4.L's `rule(given, active)`). Resolution partners are discovered through the
/// `active_literals` index and walked in pair-scheduler order (see [resolution_candidates]);
/// factoring, paramodulation, hyperresolution, and UR-resolution still scan `usable` directly.
pub fn generate_from_given(ctx: &mut Context, given: ClauseId, usable: &[ClauseId]) -> Result<Vec<ClauseId>, ErrorKind> {
    let mut out = Vec::new();

    let given_lits = ctx.clauses.get(given)?.literals.clone();

    for gi in 0..given_lits.len() as u32 {
        let candidates = resolution_candidates(ctx, given_lits[gi as usize].atom)?;
        for (other, oi) in candidates {
            if let Some(id) = resolve(ctx, given, gi, other, oi)? {
                out.push(id);
            }
        }
    }

    for a in 0..given_lits.len() as u32 {
        for b in (a + 1)..given_lits.len() as u32 {
            if let Some(id) = factor(ctx, given, a, b)? {
                out.push(id);
            }
            if let Some(id) = equality_factor(ctx, given, a, b)? {
                out.push(id);
            }
        }
    }

    out.extend(paramodulate_all(ctx, given, usable)?);
    out.extend(hyper_and_ur_from_given(ctx, given, usable)?);

    log::debug!(target: targets::GENERATE, "given {given:?} produced {} clauses against {} active", out.len(), usable.len());
    Ok(out)
}
