/*!
Ordinary (syntactic) unification and instantiation. spec.md §4.D, grounded in `unify.c`/`subst.c`
from `original_source/.../Prover9/ladr`.

Unification walks two terms, each interpreted under its own [BindingContext] (identified by a
[Multiplier]), threading every binding it makes through a shared [Trail] so the caller can roll
back to a [TrailMark] on failure or after the unifier has been consumed (spec.md §4.C). [deref]
follows a chain of variable bindings to either an unbound variable or a non-variable term — the
"dereference" step every other operation in this module (and [crate::demod], [crate::index])
builds on.

AC/C unification lives in [ac]; one-way matching (pattern against a ground/variant subject) lives
in [matching].
*/

pub mod ac;
pub mod dioph;
pub mod matching;

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::term::{TermArena, TermId, VarNum};
use crate::types::err::{ErrorKind, UnifyError};

/// Follow `term` (under `ctx`) through bound variables until reaching an unbound variable or a
/// rigid term, returning that term and the context it is to be interpreted under.
pub fn deref(arena: &TermArena, contexts: &[BindingContext], term: TermId, ctx: Multiplier) -> (TermId, Multiplier) {
    if let Some(v) = arena.is_variable(term) {
        if let Some(binding) = contexts[ctx.0 as usize].binding(v) {
            return deref(arena, contexts, binding.term, binding.context);
        }
    }
    (term, ctx)
}

/// Does variable `v` (under `v_ctx`) occur in `t` (under `t_ctx`), after fully dereferencing `t`?
/// Used to reject cyclic bindings (spec.md §4.D's occurs-check requirement).
fn occurs(
    arena: &TermArena,
    contexts: &[BindingContext],
    v: VarNum,
    v_ctx: Multiplier,
    t: TermId,
    t_ctx: Multiplier,
) -> bool {
    let (t, t_ctx) = deref(arena, contexts, t, t_ctx);
    match arena.is_variable(t) {
        Some(tv) => tv == v && t_ctx == v_ctx,
        None => arena
            .args(t)
            .iter()
            .any(|&a| occurs(arena, contexts, v, v_ctx, a, t_ctx)),
    }
}

fn bind_var(
    arena: &TermArena,
    contexts: &mut [BindingContext],
    trail: &mut Trail,
    v: VarNum,
    v_ctx: Multiplier,
    t: TermId,
    t_ctx: Multiplier,
) -> Result<(), ErrorKind> {
    if occurs(arena, contexts, v, v_ctx, t, t_ctx) {
        return Err(UnifyError::Occurs.into());
    }
    trail.bind(&mut contexts[v_ctx.0 as usize], v, t, t_ctx);
    Ok(())
}

/// Robinson unification of `s` (under `s_ctx`) and `t` (under `t_ctx`). On success, every binding
/// made is recorded on `trail`; on failure, the caller is responsible for rolling `trail` back to
/// whatever [TrailMark](crate::binding::TrailMark) it held before the call (spec.md §4.C: unify
/// does not roll back its own partial work, since a caller may want to inspect how far it got,
/// e.g. when unification is used to check AC-compatibility prefixes).
pub fn unify(
    arena: &TermArena,
    contexts: &mut [BindingContext],
    trail: &mut Trail,
    s: TermId,
    s_ctx: Multiplier,
    t: TermId,
    t_ctx: Multiplier,
) -> Result<(), ErrorKind> {
    let (s, s_ctx) = deref(arena, contexts, s, s_ctx);
    let (t, t_ctx) = deref(arena, contexts, t, t_ctx);

    match (arena.is_variable(s), arena.is_variable(t)) {
        (Some(sv), Some(tv)) if sv == tv && s_ctx == t_ctx => Ok(()),
        (Some(sv), _) => bind_var(arena, contexts, trail, sv, s_ctx, t, t_ctx),
        (_, Some(tv)) => bind_var(arena, contexts, trail, tv, t_ctx, s, s_ctx),
        (None, None) => {
            let sf = arena.symbol(s).expect("non-variable term has a symbol");
            let tf = arena.symbol(t).expect("non-variable term has a symbol");
            if sf != tf {
                return Err(UnifyError::Clash.into());
            }
            let sargs = arena.args(s).to_vec();
            let targs = arena.args(t).to_vec();
            for (&sa, &ta) in sargs.iter().zip(targs.iter()) {
                unify(arena, contexts, trail, sa, s_ctx, ta, t_ctx)?;
            }
            Ok(())
        }
    }
}

/// Build a standalone copy of `term` (under `ctx`) with every bound variable replaced by its
/// binding and every still-unbound variable renamed via the context-multiplier scheme:
/// `var(ctx.multiplier * max_vars + v)` (spec.md §4.C). This is how a unifier becomes a concrete
/// instance term once the engine is done comparing alternatives and needs a clause to keep.
pub fn instantiate(
    arena: &mut TermArena,
    contexts: &[BindingContext],
    term: TermId,
    ctx: Multiplier,
    max_vars: u32,
) -> TermId {
    let (t, c) = deref(arena, contexts, term, ctx);
    match arena.is_variable(t) {
        Some(v) => arena.make_var(c.0 * max_vars + v),
        None => {
            let sym = arena.symbol(t).expect("non-variable term has a symbol");
            let args = arena.args(t).to_vec();
            let new_args = args
                .iter()
                .map(|&a| instantiate(arena, contexts, a, c, max_vars))
                .collect();
            arena.make_rigid(sym, new_args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn unify_binds_variable_to_ground_term() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let v0 = arena.make_var(0);
        let pattern = arena.make_rigid(f, vec![v0]);
        let a_term = arena.make_rigid(a, vec![]);
        let subject = arena.make_rigid(f, vec![a_term]);

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();

        unify(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1)).unwrap();

        let (bound, bound_ctx) = deref(&arena, &contexts, v0, Multiplier(0));
        assert!(arena.term_ident(bound, a_term));
        assert_eq!(bound_ctx, Multiplier(1));
    }

    #[test]
    fn unify_rejects_occurs_check_violation() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();

        let mut arena = TermArena::new();
        let v0 = arena.make_var(0);
        let fv0 = arena.make_rigid(f, vec![v0]);

        let mut contexts = vec![BindingContext::new(Multiplier(0))];
        let mut trail = Trail::new();

        let err = unify(&arena, &mut contexts, &mut trail, v0, Multiplier(0), fv0, Multiplier(0));
        assert!(matches!(err, Err(ErrorKind::Unify(UnifyError::Occurs))));
    }

    #[test]
    fn unify_rejects_clashing_symbols() {
        let mut syms = SymbolTable::new();
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();

        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);

        let mut contexts = vec![BindingContext::new(Multiplier(0))];
        let mut trail = Trail::new();

        let err = unify(&arena, &mut contexts, &mut trail, ta, Multiplier(0), tb, Multiplier(0));
        assert!(matches!(err, Err(ErrorKind::Unify(UnifyError::Clash))));
    }
}
