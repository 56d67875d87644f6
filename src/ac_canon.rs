/*!
AC canonicalization. spec.md §4.G, grounded in `accanon.c`/`ac_redun.c` from
`original_source/models/symbolic_solvers/Prover9/ladr`.

`ac_canonical` recursively descends non-AC subterms; at an AC node it flattens the node's
arguments (collapsing nested applications of the same AC symbol into one flat list), sorts them
by [term_compare_vcp](crate::order::term_compare_vcp), and right-associates the sorted list back
into a binary tree **reusing the original root id** so back-references (e.g. an index entry, or a
clause's literal pointer) stay valid (spec.md §4.G: "Preserves the identity of the root node").

`cac_tautology` uses this to detect equalities that are AC-tautologies: both sides canonicalize to
the same term.
*/

use crate::order::term_compare_vcp;
use crate::symbol::{SymNum, SymbolTable};
use crate::term::{TermArena, TermId, TermKind};

/// Flatten `t`'s arguments if `t`'s head is AC, recursing first on non-AC subterms.
fn flatten_ac(syms: &SymbolTable, arena: &TermArena, sym: SymNum, t: TermId, out: &mut Vec<TermId>) {
    match &arena.get(t).kind {
        TermKind::Rigid(s, args) if *s == sym => {
            for &a in args {
                flatten_ac(syms, arena, sym, a, out);
            }
        }
        _ => out.push(t),
    }
}

/// Canonicalize `t` in place (by constructing fresh nodes but returning the caller's root id
/// where possible): for AC nodes, flatten + sort + right-associate onto the original root;
/// for everything else, recurse into arguments and rebuild.
///
/// `flag_bit`, if given, is set on every AC node visited after canonicalization (spec.md §4.G);
/// callers clear it whenever a subterm is replaced.
pub fn ac_canonical(syms: &SymbolTable, arena: &mut TermArena, t: TermId, flag_bit: Option<u32>) -> TermId {
    match arena.get(t).kind.clone() {
        TermKind::Variable(_) => t,
        TermKind::Rigid(sym, args) => {
            let canon_args: Vec<TermId> = args
                .iter()
                .map(|&a| ac_canonical(syms, arena, a, flag_bit))
                .collect();

            if syms.is_ac(sym) {
                let mut flat = Vec::new();
                for &a in &canon_args {
                    flatten_ac(syms, arena, sym, a, &mut flat);
                }
                flat.sort_by(|&a, &b| vcp_ordering(arena, a, b));

                let result = right_associate(arena, sym, &flat);
                if let Some(bit) = flag_bit {
                    arena.set_flag(result, bit);
                }
                // Reuse the caller's original root id by overwriting its node content in place,
                // so back-references through `t` keep denoting the canonical term.
                let rebuilt_kind = arena.get(result).kind.clone();
                arena.get_mut(t).kind = rebuilt_kind;
                if let Some(bit) = flag_bit {
                    arena.set_flag(t, bit);
                }
                t
            } else {
                arena.get_mut(t).kind = TermKind::Rigid(sym, canon_args);
                t
            }
        }
    }
}

fn vcp_ordering(arena: &TermArena, a: TermId, b: TermId) -> std::cmp::Ordering {
    use crate::order::Comparison::*;
    match term_compare_vcp(arena, a, b) {
        Lt => std::cmp::Ordering::Less,
        Eq => std::cmp::Ordering::Equal,
        Gt => std::cmp::Ordering::Greater,
        Incomparable => std::cmp::Ordering::Equal,
    }
}

/// Right-associate a flat, sorted argument list back into a binary AC tree: `a1 + (a2 + (a3 + a4))`.
fn right_associate(arena: &mut TermArena, sym: SymNum, flat: &[TermId]) -> TermId {
    match flat.len() {
        0 => panic!("an AC node always has at least one flattened argument"),
        1 => flat[0],
        _ => {
            let rest = right_associate(arena, sym, &flat[1..]);
            arena.make_rigid(sym, vec![flat[0], rest])
        }
    }
}

/// Detect whether an equality `lhs = rhs` is redundant modulo declared AC/C symbols: both sides
/// canonicalize to structurally identical terms (spec.md §4.G, §4.J).
pub fn cac_tautology(syms: &SymbolTable, arena: &mut TermArena, lhs: TermId, rhs: TermId) -> bool {
    let lhs_c = ac_canonical(syms, arena, lhs, None);
    let rhs_c = ac_canonical(syms, arena, rhs, None);
    arena.term_ident(lhs_c, rhs_c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ac_canonical_is_order_independent() {
        let mut syms = SymbolTable::new();
        let plus = syms.intern("+", 2, false).unwrap();
        syms.set_assoc_comm(plus, true);
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();
        let c = syms.intern("c", 0, false).unwrap();

        let mut arena = TermArena::new();
        // (a+b)+c
        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);
        let tc = arena.make_rigid(c, vec![]);
        let ab = arena.make_rigid(plus, vec![ta, tb]);
        let abc1 = arena.make_rigid(plus, vec![ab, tc]);

        // c+(b+a)
        let ta2 = arena.make_rigid(a, vec![]);
        let tb2 = arena.make_rigid(b, vec![]);
        let tc2 = arena.make_rigid(c, vec![]);
        let ba = arena.make_rigid(plus, vec![tb2, ta2]);
        let abc2 = arena.make_rigid(plus, vec![tc2, ba]);

        let c1 = ac_canonical(&syms, &mut arena, abc1, None);
        let c2 = ac_canonical(&syms, &mut arena, abc2, None);
        assert!(arena.term_ident(c1, c2));
    }

    #[test]
    fn cac_tautology_detects_ac_equal_sides() {
        let mut syms = SymbolTable::new();
        let plus = syms.intern("+", 2, false).unwrap();
        syms.set_assoc_comm(plus, true);
        let a = syms.intern("a", 0, false).unwrap();
        let b = syms.intern("b", 0, false).unwrap();

        let mut arena = TermArena::new();
        let ta = arena.make_rigid(a, vec![]);
        let tb = arena.make_rigid(b, vec![]);
        let lhs = arena.make_rigid(plus, vec![ta, tb]);

        let ta2 = arena.make_rigid(a, vec![]);
        let tb2 = arena.make_rigid(b, vec![]);
        let rhs = arena.make_rigid(plus, vec![tb2, ta2]);

        assert!(cac_tautology(&syms, &mut arena, lhs, rhs));
    }
}
