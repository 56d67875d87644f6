/*!
Programmatic problem loading. spec.md §6 names a textual input format (`formulas(sos)`,
`formulas(goals)`, `formulas(hints)`, …) consumed by an external parser and handed to the core as
parsed terms/clauses; that parser is a Non-goal. This module is the boundary the parser would call
across: it takes already-parsed clauses (as [Literal] vectors built via
[Context::make_term](crate::context::Context)) and performs the input-loading bookkeeping spec.md
describes without caring where the clauses came from.

Order of operations mirrors the teacher's own builder: axioms and denial clauses join `sos` first
so [definitions::scan](crate::definitions::scan) sees the full input set, then equational
definitions are folded (spec.md §4.J), then the recorded (un-negated) goal and any hints are
loaded.
*/

use crate::context::Context;
use crate::db::clause::Literal;
use crate::definitions::{self, Resolution};
use crate::hints::Hint;
use crate::justify::Primary;
use crate::types::err::ErrorKind;
use crate::types::ClauseId;

/// Add an input axiom to `sos` (spec.md: primary cell `input`).
pub fn load_axiom(ctx: &mut Context, literals: Vec<Literal>) -> Result<ClauseId, ErrorKind> {
    ctx.add_clause(literals, Primary::Input)
}

/// Add a denial clause --- the clausified negation of a conjecture --- to `sos` (spec.md: primary
/// cell `deny`). The caller supplies the already-negated, already-clausified literals; clausifying
/// a non-clausal goal is the external parser's job.
pub fn load_denial(ctx: &mut Context, literals: Vec<Literal>) -> Result<ClauseId, ErrorKind> {
    ctx.add_clause(literals, Primary::Deny)
}

/// Record the original (un-negated) goal for provenance/reporting (spec.md: primary cell `goal`).
/// Unlike [load_axiom]/[load_denial], this does not join `sos`: the goal itself is never a premise
/// the saturation loop resolves against, only its negation ([load_denial]) is.
pub fn load_goal(ctx: &mut Context, literals: Vec<Literal>) -> Result<ClauseId, ErrorKind> {
    ctx.record_clause(literals, Primary::Goal)
}

/// Load a hint clause into [HintStore](crate::hints::HintStore) (spec.md §4.J). `bsub_weight` and
/// `labels` carry over onto any clause the hint later subsumes. Leases a multiplier for the hint's
/// own variable namespace, held for the run's lifetime in [Context::hint_multipliers].
pub fn load_hint(ctx: &mut Context, literals: Vec<Literal>, bsub_weight: Option<i64>, labels: Vec<String>) -> Result<ClauseId, ErrorKind> {
    let id = ctx.clauses.fresh_id();
    let guard = ctx.lease_multiplier()?;
    let multiplier = guard.multiplier();
    ctx.hint_multipliers.insert(id, guard);
    ctx.hints.insert(Hint { id, literals, multiplier, bsub_weight, labels });
    Ok(id)
}

/// Scan every clause currently in `sos` for equational definitions and fold the survivors away
/// (spec.md §4.J), gated by [Config::fold_definitions](crate::config::Config::fold_definitions).
/// Returns the symbols folded, if any.
pub fn fold_equational_definitions(ctx: &mut Context) -> Vec<crate::symbol::SymNum> {
    if !ctx.config.fold_definitions.value {
        return Vec::new();
    }
    let sos: Vec<ClauseId> = ctx.clauses.list(crate::db::clist::ListName::Sos).map(|l| l.iter().collect()).unwrap_or_default();
    let clauses: Vec<(ClauseId, Vec<Literal>)> = sos.iter().filter_map(|&id| ctx.clauses.get(id).ok().map(|c| (id, c.literals.clone()))).collect();

    let candidates = definitions::scan(&ctx.symbols, &ctx.arena, &clauses);
    if candidates.is_empty() {
        return Vec::new();
    }
    definitions::resolve(&mut ctx.symbols, &ctx.arena, &candidates, Resolution::Unfold)
}

/// A fully parsed input problem, ready to load.
pub struct Problem {
    pub axioms: Vec<Vec<Literal>>,
    pub denials: Vec<Vec<Literal>>,
    pub goal: Option<Vec<Literal>>,
    pub hints: Vec<(Vec<Literal>, Option<i64>, Vec<String>)>,
}

/// Load a full problem: axioms and denial clauses first (so definition-folding sees the whole
/// input set), then fold equational definitions, then record the goal and load hints.
pub fn load_problem(ctx: &mut Context, problem: Problem) -> Result<(), ErrorKind> {
    for literals in problem.axioms {
        load_axiom(ctx, literals)?;
    }
    for literals in problem.denials {
        load_denial(ctx, literals)?;
    }

    fold_equational_definitions(ctx);

    if let Some(goal) = problem.goal {
        load_goal(ctx, goal)?;
    }
    for (literals, weight, labels) in problem.hints {
        load_hint(ctx, literals, weight, labels)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn load_axiom_joins_sos() {
        let mut ctx = Context::new(Config::default());
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let pp = ctx.make_term(p, vec![]);
        let id = load_axiom(&mut ctx, vec![Literal::new(true, pp)]).unwrap();
        assert!(ctx.clauses.get(id).unwrap().memberships().any(|l| *l == crate::db::clist::ListName::Sos));
    }

    #[test]
    fn load_goal_does_not_join_sos() {
        let mut ctx = Context::new(Config::default());
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let pp = ctx.make_term(p, vec![]);
        let id = load_goal(&mut ctx, vec![Literal::new(true, pp)]).unwrap();
        assert_eq!(ctx.clauses.get(id).unwrap().memberships().count(), 0);
    }

    #[test]
    fn a_pure_definition_is_folded_away_as_unfold() {
        let mut ctx = Context::new(Config::default());
        let eq = ctx.symbols.intern_equality();
        let f = ctx.fresh_symbol("f", 1, false).unwrap();
        let g = ctx.fresh_symbol("g", 1, false).unwrap();

        let x0 = ctx.arena.make_var(0);
        let fx = ctx.make_term(f, vec![x0]);
        let x0b = ctx.arena.make_var(0);
        let gx = ctx.make_term(g, vec![x0b]);
        let def_atom = ctx.make_term(eq, vec![fx, gx]);
        load_axiom(&mut ctx, vec![Literal::new(true, def_atom)]).unwrap();

        let folded = fold_equational_definitions(&mut ctx);
        assert_eq!(folded, vec![f]);
        assert!(ctx.symbols.is_unfold(f));
    }

    #[test]
    fn load_hint_registers_in_the_hint_store() {
        let mut ctx = Context::new(Config::default());
        let p = ctx.fresh_symbol("p", 1, true).unwrap();
        let x0 = ctx.arena.make_var(0);
        let px = ctx.make_term(p, vec![x0]);
        let id = load_hint(&mut ctx, vec![Literal::new(true, px)], Some(1), vec!["h1".to_string()]).unwrap();
        assert!(ctx.hint_multipliers.contains_key(&id));
    }
}
