/*!
One-way matching: bind the variables of a *pattern* so it becomes identical to a *subject*,
without ever binding a variable on the subject side. spec.md §4.D, grounded in `matching.c`.

This is what [forward demodulation](crate::demod) uses to ask "does this demodulator's left-hand
side match a rewrite target", and what backward subsumption/instance queries in
[the index](crate::index) reduce to once candidates narrow to a single pair of terms.
*/

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::term::{TermArena, TermId};
use crate::types::err::{ErrorKind, UnifyError};
use crate::unify::deref;

/// Match `pattern` (under `pattern_ctx`) against `subject` (under `subject_ctx`): every pattern
/// variable is bound (recorded on `trail`) to the subject subterm it aligns with; subject
/// variables are never bound. Two occurrences of the same pattern variable must match
/// [identical][terms_equal_under] subjects.
pub fn match_term(
    arena: &TermArena,
    contexts: &mut [BindingContext],
    trail: &mut Trail,
    pattern: TermId,
    pattern_ctx: Multiplier,
    subject: TermId,
    subject_ctx: Multiplier,
) -> Result<(), ErrorKind> {
    if let Some(v) = arena.is_variable(pattern) {
        if let Some(existing) = contexts[pattern_ctx.0 as usize].binding(v) {
            return if terms_equal_under(arena, contexts, existing.term, existing.context, subject, subject_ctx) {
                Ok(())
            } else {
                Err(UnifyError::Clash.into())
            };
        }
        trail.bind(&mut contexts[pattern_ctx.0 as usize], v, subject, subject_ctx);
        return Ok(());
    }

    if arena.is_variable(subject).is_some() {
        // A rigid pattern can never match a bare subject variable in one-way matching: doing so
        // would require binding the subject, which matching never does.
        return Err(UnifyError::Clash.into());
    }

    let psym = arena.symbol(pattern).expect("non-variable pattern has a symbol");
    let ssym = arena.symbol(subject).expect("non-variable subject has a symbol");
    if psym != ssym {
        return Err(UnifyError::Clash.into());
    }

    let pargs = arena.args(pattern).to_vec();
    let sargs = arena.args(subject).to_vec();
    for (&p, &s) in pargs.iter().zip(sargs.iter()) {
        match_term(arena, contexts, trail, p, pattern_ctx, s, subject_ctx)?;
    }
    Ok(())
}

/// Structural equality of two terms under (possibly distinct) contexts, dereferencing fully —
/// used to check that repeated pattern variables align consistently, and by variant/identical
/// queries in [the index](crate::index).
pub fn terms_equal_under(
    arena: &TermArena,
    contexts: &[BindingContext],
    a: TermId,
    a_ctx: Multiplier,
    b: TermId,
    b_ctx: Multiplier,
) -> bool {
    let (a, a_ctx) = deref(arena, contexts, a, a_ctx);
    let (b, b_ctx) = deref(arena, contexts, b, b_ctx);

    match (arena.is_variable(a), arena.is_variable(b)) {
        (Some(av), Some(bv)) => av == bv && a_ctx == b_ctx,
        (None, None) => {
            let asym = arena.symbol(a).expect("non-variable term has a symbol");
            let bsym = arena.symbol(b).expect("non-variable term has a symbol");
            asym == bsym
                && arena.args(a).len() == arena.args(b).len()
                && arena
                    .args(a)
                    .iter()
                    .zip(arena.args(b))
                    .all(|(&x, &y)| terms_equal_under(arena, contexts, x, a_ctx, y, b_ctx))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn match_binds_pattern_variables_only() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 2, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let y = arena.make_var(0);
        let pattern = arena.make_rigid(f, vec![x, y]);

        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);
        let subject = arena.make_rigid(f, vec![ta, tb]);

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        match_term(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1)).unwrap();
        assert!(contexts[0].is_bound(0));
    }

    #[test]
    fn match_rejects_repeated_variable_with_inconsistent_subjects() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 2, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x0 = arena.make_var(0);
        let x1 = arena.make_var(0);
        let pattern = arena.make_rigid(f, vec![x0, x1]); // f(x, x)

        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);
        let subject = arena.make_rigid(f, vec![ta, tb]); // f(a, b)

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        let err = match_term(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1));
        assert!(err.is_err());
    }

    #[test]
    fn match_never_binds_subject_variables() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let pattern = arena.make_rigid(f, vec![ta]);
        let y = arena.make_var(0);
        let subject = arena.make_rigid(f, vec![y]);

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        let err = match_term(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1));
        assert!(err.is_err());
        assert!(!contexts[1].is_bound(0));
    }
}
