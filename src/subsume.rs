/*!
Clause subsumption. spec.md's GLOSSARY: "clause `c` subsumes `d` iff some substitution makes every
literal of `c` appear in `d`", grounded in `subsume.c`. Used by forward/back simplification, by
[hints](crate::hints) to detect a bsub_wt override, and (transitively) while filtering the passive
list.

Subsumption search is backtracking: literals of `c` are matched one at a time against literals of
`d` of the same sign, sharing one substitution (`c`'s variables only ever bind, `d`'s never do ---
this is exactly [one-way matching](crate::unify::matching)), undoing on failure and trying the next
candidate literal in `d`. Multiple literals of `c` may map to the same literal of `d`.
*/

use crate::binding::{BindingContext, Multiplier, Trail};
use crate::db::clause::Literal;
use crate::term::TermArena;
use crate::unify::matching::match_term;

/// `true` iff `c` subsumes `d`: there is a substitution over `c`'s variables (interpreted under
/// `c_ctx`) making every literal of `c` appear, sign and all, among `d`'s literals (under `d_ctx`).
pub fn subsumes(arena: &mut TermArena, contexts: &mut [BindingContext], trail: &mut Trail, c: &[Literal], c_ctx: Multiplier, d: &[Literal], d_ctx: Multiplier) -> bool {
    try_match(arena, contexts, trail, c, c_ctx, d, d_ctx, 0)
}

fn try_match(arena: &mut TermArena, contexts: &mut [BindingContext], trail: &mut Trail, c: &[Literal], c_ctx: Multiplier, d: &[Literal], d_ctx: Multiplier, next: usize) -> bool {
    if next == c.len() {
        return true;
    }
    let lit = c[next];
    for cand in d {
        if cand.positive != lit.positive {
            continue;
        }
        let mark = trail.mark();
        if match_term(arena, contexts, trail, lit.atom, c_ctx, cand.atom, d_ctx).is_ok() && try_match(arena, contexts, trail, c, c_ctx, d, d_ctx, next + 1) {
            return true;
        }
        trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;
    use crate::term::TermArena;

    #[test]
    fn unit_clause_subsumes_any_clause_with_a_matching_literal() {
        let mut syms = SymbolTable::new();
        let p = syms.intern("p", 1, true).unwrap();
        let q = syms.intern("q", 1, true).unwrap();
        let a = syms.intern("a", 0, false).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let px = arena.make_rigid(p, vec![x]);
        let c = vec![Literal::new(true, px)];

        let ta = arena.make_rigid(a, vec![]);
        let pa = arena.make_rigid(p, vec![ta]);
        let ta2 = arena.make_rigid(a, vec![]);
        let qa = arena.make_rigid(q, vec![ta2]);
        let d = vec![Literal::new(true, qa), Literal::new(true, pa)];

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();
        assert!(subsumes(&mut arena, &mut contexts, &mut trail, &c, Multiplier(0), &d, Multiplier(1)));
    }

    #[test]
    fn sign_mismatch_blocks_subsumption() {
        let mut syms = SymbolTable::new();
        let p = syms.intern("p", 1, true).unwrap();

        let mut arena = TermArena::new();
        let x = arena.make_var(0);
        let px = arena.make_rigid(p, vec![x]);
        let c = vec![Literal::new(true, px)];

        let a = syms.intern("a", 0, false).unwrap();
        let ta = arena.make_rigid(a, vec![]);
        let pa = arena.make_rigid(p, vec![ta]);
        let d = vec![Literal::new(false, pa)];

        let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
        let mut trail = Trail::new();
        assert!(!subsumes(&mut arena, &mut contexts, &mut trail, &c, Multiplier(0), &d, Multiplier(1)));
    }
}
