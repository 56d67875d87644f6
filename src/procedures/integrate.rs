/*!
Moving an accepted clause into the active set. spec.md §4.L's `integrate(given)`: index the
clause's literals for resolution/paramodulation partner lookup, place it in the
[PairScheduler](crate::db::pair_scheduler::PairScheduler)'s weight buckets so generation can walk
candidates in the §5 `(i+j, i, j)` order, move it from `sos` into `usable`, and --- if it is an
oriented unit equality --- register it as a demodulator in both [DemodIndex](crate::demod::DemodIndex)es.
*/

use crate::binding::Multiplier;
use crate::context::Context;
use crate::db::clist::ListName;
use crate::demod::DemodRule;
use crate::misc::log::targets;
use crate::types::err::ErrorKind;
use crate::types::ClauseId;

/// Move `id` from `sos` to `usable`, index its literals, and register it as a demodulator if it
/// qualifies (a unit clause whose sole literal is a positive, oriented equality).
pub fn integrate(ctx: &mut Context, id: ClauseId) -> Result<(), ErrorKind> {
    ctx.index_active_clause(id)?;

    if ctx.clauses.get(id)?.memberships().any(|l| *l == ListName::Sos) {
        ctx.clauses.remove_from_list(id, ListName::Sos)?;
    }
    ctx.clauses.add_to_list(id, ListName::Usable)?;
    let weight = ctx.clauses.get(id)?.weight;
    ctx.clauses.pair_scheduler_mut().insert(id, weight);

    if let Some(rule) = demodulator_rule(ctx, id)? {
        ctx.demodulators.insert(rule.clone());
        ctx.back_demodulators.insert(rule);
        ctx.clauses.add_to_list(id, ListName::Demodulators)?;
        ctx.clauses.add_to_list(id, ListName::BackDemodulators)?;
        log::debug!(target: targets::GIVEN_CLAUSE, "registered {id:?} as a demodulator");
    }

    Ok(())
}

/// Build the [DemodRule] `id` qualifies as, if any: a unit clause whose one literal is a positive
/// equality. Leases a multiplier from [Context::demod_multipliers] --- held for the rule's entire
/// lifetime, unlike the lease-use-rollback-release pattern ordinary operations follow --- released
/// only when [retire_demodulator](crate::procedures::simplify::retire_demodulator) removes the rule.
fn demodulator_rule(ctx: &mut Context, id: ClauseId) -> Result<Option<DemodRule>, ErrorKind> {
    let clause = ctx.clauses.get(id)?;
    if clause.literals.len() != 1 {
        return Ok(None);
    }
    let lit = clause.literals[0];
    let Some(eq) = ctx.symbols.equality else {
        return Ok(None);
    };
    if !lit.positive || ctx.arena.symbol(lit.atom) != Some(eq) {
        return Ok(None);
    }
    let args = ctx.arena.args(lit.atom).to_vec();
    if args.len() != 2 {
        return Ok(None);
    }

    let guard = ctx.lease_multiplier()?;
    let multiplier: Multiplier = guard.multiplier();
    ctx.demod_multipliers.insert(id, guard);

    Ok(Some(DemodRule {
        id: id.0,
        lhs: args[0],
        rhs: args[1],
        multiplier,
        oriented: lit.oriented,
        cond: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::clause::Literal;
    use crate::justify::Primary;

    #[test]
    fn integrating_an_oriented_unit_equality_registers_a_demodulator() {
        let mut ctx = Context::new(Config::default());
        let eq = ctx.symbols.intern_equality();
        let f = ctx.fresh_symbol("f", 1, false).unwrap();
        let a = ctx.fresh_symbol("a", 0, false).unwrap();
        let b = ctx.fresh_symbol("b", 0, false).unwrap();
        ctx.symbols.set_precedence(f, 3);
        ctx.symbols.set_precedence(a, 2);
        ctx.symbols.set_precedence(b, 1);

        let fa = ctx.make_term(f, vec![ctx.make_term(a, vec![])]);
        let bb = ctx.make_term(b, vec![]);
        let atom = ctx.make_term(eq, vec![fa, bb]);
        let id = ctx.add_clause(vec![Literal::new(true, atom)], Primary::Input).unwrap();

        integrate(&mut ctx, id).unwrap();
        assert_eq!(ctx.demodulators.iter().count(), 1);
        assert!(ctx.clauses.get(id).unwrap().memberships().any(|l| *l == ListName::Usable));
    }

    #[test]
    fn integrating_a_non_unit_clause_does_not_register_a_demodulator() {
        let mut ctx = Context::new(Config::default());
        let p = ctx.fresh_symbol("p", 0, true).unwrap();
        let q = ctx.fresh_symbol("q", 0, true).unwrap();
        let pp = ctx.make_term(p, vec![]);
        let qq = ctx.make_term(q, vec![]);
        let id = ctx.add_clause(vec![Literal::new(true, pp), Literal::new(true, qq)], Primary::Input).unwrap();

        integrate(&mut ctx, id).unwrap();
        assert_eq!(ctx.demodulators.iter().count(), 0);
    }
}
