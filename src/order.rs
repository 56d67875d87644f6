/*!
Term orderings. spec.md §4.F.

`term_order(s, t)` returns one of four outcomes using whichever primary ordering
([OrderKind::Lpo], [OrderKind::Rpo], or [OrderKind::Kbo]) the [config](crate::config) selects. A
secondary "weak" lexicographic order ([term_compare_vcp]) gives a total order on any two terms,
used only as an orientation tiebreak (spec.md §4.F).

For [unfold](crate::symbol::SymbolProps::unfold) symbols, [orient_equality] forces the direction
`alpha → beta` even when neither side dominates under the primary order, matching
`unfold.c`/`definitions.c` in the original LADR sources.
*/

use crate::symbol::SymbolTable;
use crate::term::{TermArena, TermId, TermKind};

/// The result of comparing two terms under a [term order](Order).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    Lt,
    Eq,
    Gt,
    Incomparable,
}

/// Which primary ordering is active.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderKind {
    Lpo,
    Rpo,
    Kbo,
}

/// A configured term ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Order {
    pub kind: OrderKind,
}

impl Order {
    pub fn new(kind: OrderKind) -> Self {
        Order { kind }
    }

    /// `term_order(s, t)`.
    pub fn term_order(&self, syms: &SymbolTable, arena: &TermArena, s: TermId, t: TermId) -> Comparison {
        match self.kind {
            OrderKind::Lpo => lpo(syms, arena, s, t, false),
            OrderKind::Rpo => lpo(syms, arena, s, t, true),
            OrderKind::Kbo => kbo(syms, arena, s, t),
        }
    }

    /// Orient an equality `lhs = rhs` for use as a demodulator, honoring unfold symbols
    /// (spec.md §4.F): if either side's head symbol is `unfold`, orientation is forced toward
    /// that side's definition regardless of the primary order's verdict.
    pub fn orient_equality(
        &self,
        syms: &SymbolTable,
        arena: &TermArena,
        lhs: TermId,
        rhs: TermId,
    ) -> Option<(TermId, TermId)> {
        let lhs_unfold = arena.symbol(lhs).is_some_and(|s| syms.is_unfold(s));
        let rhs_unfold = arena.symbol(rhs).is_some_and(|s| syms.is_unfold(s));

        if lhs_unfold && !rhs_unfold {
            return Some((lhs, rhs));
        }
        if rhs_unfold && !lhs_unfold {
            return Some((rhs, lhs));
        }

        match self.term_order(syms, arena, lhs, rhs) {
            Comparison::Gt => Some((lhs, rhs)),
            Comparison::Lt => Some((rhs, lhs)),
            Comparison::Eq | Comparison::Incomparable => match term_compare_vcp(arena, lhs, rhs) {
                Comparison::Gt => Some((lhs, rhs)),
                Comparison::Lt => Some((rhs, lhs)),
                _ => None,
            },
        }
    }
}

/// Recursive path ordering (LPO when `is_rpo = false`, RPO otherwise). Symbol precedence comes
/// from [SymbolProps::precedence](crate::symbol::SymbolProps::precedence); ties within the
/// recursive comparison of argument lists use the lexicographic extension for LPO and a
/// multiset extension approximated lexicographically for RPO (sufficient for the ground and
/// near-ground terms generated during saturation; a full multiset RPO is noted as an
/// enhancement in DESIGN.md).
fn lpo(syms: &SymbolTable, arena: &TermArena, s: TermId, t: TermId, is_rpo: bool) -> Comparison {
    if arena.term_ident(s, t) {
        return Comparison::Eq;
    }

    match (&arena.get(s).kind, &arena.get(t).kind) {
        (TermKind::Variable(_), TermKind::Variable(_)) => Comparison::Incomparable,
        (TermKind::Variable(v), _) => {
            if occurs_as_subterm(arena, *v, t) {
                Comparison::Lt
            } else {
                Comparison::Incomparable
            }
        }
        (_, TermKind::Variable(v)) => {
            if occurs_as_subterm(arena, *v, s) {
                Comparison::Gt
            } else {
                Comparison::Incomparable
            }
        }
        (TermKind::Rigid(f, f_args), TermKind::Rigid(g, g_args)) => {
            // s > t if some argument of s is >= t.
            for &si in f_args {
                match lpo(syms, arena, si, t, is_rpo) {
                    Comparison::Gt | Comparison::Eq => return Comparison::Gt,
                    _ => {}
                }
            }
            // t > s symmetric check.
            for &ti in g_args {
                match lpo(syms, arena, s, ti, is_rpo) {
                    Comparison::Gt | Comparison::Eq => return Comparison::Lt,
                    _ => {}
                }
            }

            if f == g {
                return compare_args(syms, arena, f_args, g_args, is_rpo, |arena, a, b| lpo(syms, arena, a, b, is_rpo));
            }

            let pf = syms.lookup(*f).precedence;
            let pg = syms.lookup(*g).precedence;
            match pf.cmp(&pg) {
                std::cmp::Ordering::Greater => {
                    if f_args.iter().all(|&si| matches!(lpo(syms, arena, si, t, is_rpo), Comparison::Lt)) {
                        Comparison::Gt
                    } else {
                        Comparison::Incomparable
                    }
                }
                std::cmp::Ordering::Less => {
                    if g_args.iter().all(|&ti| matches!(lpo(syms, arena, s, ti, is_rpo), Comparison::Gt)) {
                        Comparison::Lt
                    } else {
                        Comparison::Incomparable
                    }
                }
                std::cmp::Ordering::Equal => Comparison::Incomparable,
            }
        }
    }
}

fn compare_args(
    syms: &SymbolTable,
    arena: &TermArena,
    f_args: &[TermId],
    g_args: &[TermId],
    is_rpo: bool,
    recurse: impl Fn(&TermArena, TermId, TermId) -> Comparison,
) -> Comparison {
    let _ = syms;
    if !is_rpo {
        // Lexicographic: first index where arguments differ decides.
        for (&a, &b) in f_args.iter().zip(g_args) {
            match recurse(arena, a, b) {
                Comparison::Eq => continue,
                other => return other,
            }
        }
        Comparison::Eq
    } else {
        // Multiset-ish: sort by a canonical key (size, then node-order) and compare pairwise.
        let mut fa: Vec<TermId> = f_args.to_vec();
        let mut ga: Vec<TermId> = g_args.to_vec();
        fa.sort_by_key(|&t| arena.size(t));
        ga.sort_by_key(|&t| arena.size(t));
        for (&a, &b) in fa.iter().zip(ga.iter()) {
            match recurse(arena, a, b) {
                Comparison::Eq => continue,
                other => return other,
            }
        }
        Comparison::Eq
    }
}

fn occurs_as_subterm(arena: &TermArena, v: crate::term::VarNum, t: TermId) -> bool {
    match &arena.get(t).kind {
        TermKind::Variable(w) => *w == v,
        TermKind::Rigid(_, args) => args.iter().any(|&a| occurs_as_subterm(arena, v, a)),
    }
}

/// Knuth-Bendix ordering: compare weight first, break ties via precedence/lexicographic
/// recursion on arguments (spec.md §3, §4.F).
fn kbo(syms: &SymbolTable, arena: &TermArena, s: TermId, t: TermId) -> Comparison {
    if arena.term_ident(s, t) {
        return Comparison::Eq;
    }

    let ws = weight(syms, arena, s);
    let wt = weight(syms, arena, t);

    match (&arena.get(s).kind, &arena.get(t).kind) {
        (TermKind::Variable(v), _) => {
            if occurs_as_subterm(arena, *v, t) {
                Comparison::Lt
            } else {
                Comparison::Incomparable
            }
        }
        (_, TermKind::Variable(v)) => {
            if occurs_as_subterm(arena, *v, s) {
                Comparison::Gt
            } else {
                Comparison::Incomparable
            }
        }
        (TermKind::Rigid(f, f_args), TermKind::Rigid(g, g_args)) => {
            if ws > wt {
                Comparison::Gt
            } else if ws < wt {
                Comparison::Lt
            } else if f == g {
                compare_args(syms, arena, f_args, g_args, false, |arena, a, b| kbo(syms, arena, a, b))
            } else {
                let pf = syms.lookup(*f).precedence;
                let pg = syms.lookup(*g).precedence;
                match pf.cmp(&pg) {
                    std::cmp::Ordering::Greater => Comparison::Gt,
                    std::cmp::Ordering::Less => Comparison::Lt,
                    std::cmp::Ordering::Equal => Comparison::Incomparable,
                }
            }
        }
    }
}

/// The KBO weight of a term: the sum of per-symbol weights, with variables counted as weight 1.
pub fn weight(syms: &SymbolTable, arena: &TermArena, t: TermId) -> u64 {
    match &arena.get(t).kind {
        TermKind::Variable(_) => 1,
        TermKind::Rigid(sym, args) => {
            syms.lookup(*sym).kbo_weight as u64 + args.iter().map(|&a| weight(syms, arena, a)).sum::<u64>()
        }
    }
}

/// A total "weak" lexicographic order used only as an orientation tiebreak (spec.md §4.F). Not a
/// simplification order --- it exists purely to make `orient_equality` deterministic when the
/// primary order is silent.
pub fn term_compare_vcp(arena: &TermArena, a: TermId, b: TermId) -> Comparison {
    match (&arena.get(a).kind, &arena.get(b).kind) {
        (TermKind::Variable(x), TermKind::Variable(y)) => match x.cmp(y) {
            std::cmp::Ordering::Less => Comparison::Lt,
            std::cmp::Ordering::Equal => Comparison::Eq,
            std::cmp::Ordering::Greater => Comparison::Gt,
        },
        (TermKind::Variable(_), TermKind::Rigid(..)) => Comparison::Lt,
        (TermKind::Rigid(..), TermKind::Variable(_)) => Comparison::Gt,
        (TermKind::Rigid(f, f_args), TermKind::Rigid(g, g_args)) => {
            if f.0 != g.0 {
                return if f.0 < g.0 { Comparison::Lt } else { Comparison::Gt };
            }
            for (&x, &y) in f_args.iter().zip(g_args) {
                match term_compare_vcp(arena, x, y) {
                    Comparison::Eq => continue,
                    other => return other,
                }
            }
            Comparison::Eq
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn kbo_orders_by_weight() {
        let mut syms = SymbolTable::new();
        let f = syms.intern("f", 1, false).unwrap();
        let a = syms.intern("a", 0, false).unwrap();
        syms.set_kbo_weight(a, 1);
        syms.set_kbo_weight(f, 1);

        let mut arena = TermArena::new();
        let a_term = arena.make_rigid(a, vec![]);
        let fa = arena.make_rigid(f, vec![a_term]);
        let a_term2 = arena.make_rigid(a, vec![]);

        let order = Order::new(OrderKind::Kbo);
        assert_eq!(order.term_order(&syms, &arena, fa, a_term2), Comparison::Gt);
    }

    #[test]
    fn vcp_is_total_on_ground_terms() {
        let mut syms = SymbolTable::new();
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();
        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);
        assert_ne!(term_compare_vcp(&arena, ta, tb), Comparison::Eq);
    }
}
