/*!
Equational definition recognition and folding. spec.md §4.J, grounded in `definitions.c`.

A definition candidate is a positive unit clause `f(x1,...,xn) = t` where every argument of `f` is
a distinct variable and `f` never occurs anywhere on the opposite side of some input axiom
(otherwise unfolding `f` away would not be sound as a pure abbreviation). [scan] collects every
such candidate from a set of input clauses; [Definitions::resolve] builds the symbol dependency
DAG the candidates induce, drops any symbol on a cycle (a defined symbol cannot depend, even
transitively, on its own definition), and applies one of the two fixes spec.md names: marking the
surviving symbols [unfold](crate::symbol::SymbolTable::set_unfold) so
[orient_equality](crate::order::Order::orient_equality) always rewrites them away, or appending
them to the tail of the lexicographic precedence so the ordinary term order does the same work.
*/

use std::collections::{HashMap, HashSet};

use crate::db::clause::Literal;
use crate::symbol::{SymNum, SymbolTable};
use crate::term::{TermArena, TermId, TermKind, VarNum};
use crate::types::ClauseId;

/// A single recognized definition `f(x̄) = t`.
pub struct Candidate {
    pub defined: SymNum,
    pub clause_id: ClauseId,
    pub lhs: TermId,
    pub rhs: TermId,
}

/// `true` if `term` is `Rigid(sym, args)` with every argument a variable and no variable repeated.
fn is_distinct_variable_head(arena: &TermArena, term: TermId) -> Option<(SymNum, Vec<VarNum>)> {
    match &arena.get(term).kind {
        TermKind::Rigid(sym, args) => {
            let mut vars = Vec::with_capacity(args.len());
            let mut seen = HashSet::new();
            for &a in args {
                let v = arena.is_variable(a)?;
                if !seen.insert(v) {
                    return None;
                }
                vars.push(v);
            }
            Some((*sym, vars))
        }
        TermKind::Variable(_) => None,
    }
}

fn symbols_in(arena: &TermArena, term: TermId, out: &mut HashSet<SymNum>) {
    match &arena.get(term).kind {
        TermKind::Variable(_) => {}
        TermKind::Rigid(sym, args) => {
            out.insert(*sym);
            for &a in args {
                symbols_in(arena, a, out);
            }
        }
    }
}

/// Scan `clauses` (each a clause ID paired with its literals) for definition candidates: positive
/// unit equalities whose left side is a function of distinct variables, where the defined symbol
/// never occurs on the opposite side of some other input axiom.
pub fn scan(syms: &SymbolTable, arena: &TermArena, clauses: &[(ClauseId, Vec<Literal>)]) -> Vec<Candidate> {
    let Some(eq) = syms.equality else { return Vec::new() };

    let mut occurs_elsewhere: HashMap<SymNum, bool> = HashMap::new();
    for (_, lits) in clauses {
        for lit in lits {
            let is_unit_eq = lits.len() == 1 && lit.positive && arena.symbol(lit.atom) == Some(eq);
            if is_unit_eq {
                continue;
            }
            let mut syms_here = HashSet::new();
            symbols_in(arena, lit.atom, &mut syms_here);
            for s in syms_here {
                occurs_elsewhere.insert(s, true);
            }
        }
    }

    let mut out = Vec::new();
    for (id, lits) in clauses {
        if lits.len() != 1 || !lits[0].positive {
            continue;
        }
        let atom = lits[0].atom;
        if arena.symbol(atom) != Some(eq) {
            continue;
        }
        let args = arena.args(atom);
        if args.len() != 2 {
            continue;
        }
        let (lhs, rhs) = (args[0], args[1]);
        if let Some((defined, _vars)) = is_distinct_variable_head(arena, lhs) {
            if !occurs_elsewhere.get(&defined).copied().unwrap_or(false) {
                out.push(Candidate { defined, clause_id: *id, lhs, rhs });
            }
        }
    }
    out
}

/// How a surviving definition is folded into the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Unfold,
    PrecedenceTail,
}

/// Build the dependency DAG (defined symbol → defined symbols its right side mentions), drop any
/// symbol on a cycle, and apply `resolution` to the rest.
pub fn resolve(syms: &mut SymbolTable, arena: &TermArena, candidates: &[Candidate], resolution: Resolution) -> Vec<SymNum> {
    let defined: HashSet<SymNum> = candidates.iter().map(|c| c.defined).collect();

    let mut deps: HashMap<SymNum, HashSet<SymNum>> = HashMap::new();
    for c in candidates {
        let mut rhs_syms = HashSet::new();
        symbols_in(arena, c.rhs, &mut rhs_syms);
        deps.entry(c.defined).or_default().extend(rhs_syms.into_iter().filter(|s| defined.contains(s)));
    }

    let survivors: Vec<SymNum> = defined.iter().copied().filter(|s| !on_cycle(*s, &deps)).collect();

    match resolution {
        Resolution::Unfold => {
            for &s in &survivors {
                syms.set_unfold(s, true);
            }
        }
        Resolution::PrecedenceTail => {
            let mut floor = syms.iter().map(|(_, props)| props.precedence).min().unwrap_or(0) - 1;
            for &s in &survivors {
                syms.set_precedence(s, floor);
                floor -= 1;
            }
        }
    }

    survivors
}

fn on_cycle(start: SymNum, deps: &HashMap<SymNum, HashSet<SymNum>>) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![start];
    while let Some(s) = stack.pop() {
        let Some(next) = deps.get(&s) else { continue };
        for &n in next {
            if n == start {
                return true;
            }
            if visited.insert(n) {
                stack.push(n);
            }
        }
    }
    false
}
