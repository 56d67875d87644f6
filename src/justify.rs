/*!
Per-clause provenance. spec.md §4.K, grounded in `ioutils.c`'s clause-printing routines and the
justification vocabulary scattered across `unify.c`/`paramod.c`/`demod.c`.

Every clause carries exactly one [Primary] cell recording how it first came to exist, plus zero or
more [Secondary] cells recording cheap simplifications applied afterward (spec.md: "a primary cell
... plus zero or more secondary cells"). [Justification] bundles the two. [collect_parents] and
[ancestry] are the two utilities consumed by an external proof printer; neither is otherwise used
by the saturation loop.
*/

use std::collections::{BTreeSet, HashMap};

use crate::types::ClauseId;

/// Which side of a demodulator rewrote a subterm during simplification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    L,
    R,
}

/// One step of a demodulation (or back-demodulation) sequence applied while simplifying a clause.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DemodStep {
    pub id: ClauseId,
    pub sequence: u32,
    pub direction: Direction,
}

/// How a paramodulation inference's rewritten position is recorded: a path into the target
/// literal, read left to right from the atom.
pub type Position = Vec<u32>;

/// The primary justification cell: how a clause first entered the database.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Primary {
    /// Read directly from the input problem.
    Input,
    /// The negation of the goal clause, introduced for refutation.
    Goal,
    /// A denial clause from an explicit `deny`.
    Deny,
    /// A verbatim copy of another clause (e.g. across a context refresh).
    Copy(ClauseId),
    /// Derived from propositional (ground) reasoning alone.
    Propositional(Vec<ClauseId>),
    /// The result of a back-rewrite pass rewriting one clause's literals in place.
    BackRewrite { parent: ClauseId, steps: Vec<DemodStep> },
    /// Binary resolution between two clauses on the given literal positions.
    Resolve { p1: ClauseId, lit1: u32, p2: ClauseId, lit2: u32 },
    /// Hyperresolution against one nucleus and a sequence of satellite clauses.
    Hyper { nucleus: ClauseId, satellites: Vec<ClauseId> },
    /// UR-resolution (unit-resulting resolution).
    Ur { nucleus: ClauseId, satellites: Vec<ClauseId> },
    /// Factoring: two literals of one parent clause unified and merged.
    Factor { parent: ClauseId, lit_a: u32, lit_b: u32 },
    /// xx-resolution: an equality literal `t ≠ t` resolved away after unification.
    XxRes { parent: ClauseId, lit: u32 },
    /// Paramodulation from one clause into another at the given position.
    Para {
        from: ClauseId,
        from_lit: u32,
        into: ClauseId,
        into_lit: u32,
        position: Position,
        variant: ParaVariant,
    },
    /// Instantiation of a clause's free variables by a substitution recorded elsewhere.
    Instantiate(ClauseId),
    /// Clausification of a non-clausal formula (Skolemization, CNF transformation).
    Clausify(ClauseId),
    /// Expansion of an equational definition.
    ExpandDef(ClauseId),
    /// Introduction of a fresh Skolem or definitional symbol.
    NewSymbol,
}

/// Paramodulation carries three flavors distinguishing which side (`from`/`into`) supplied the
/// functional argument the rewrite fired on (spec.md's `para[_fx|_ix|_fx_ix]` family).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParaVariant {
    Plain,
    Fx,
    Ix,
    FxIx,
}

/// A secondary justification cell: a cheap rewrite applied on top of a clause already justified by
/// a [Primary] cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Secondary {
    /// An equality literal was flipped left-to-right to respect term order.
    Flip { lit: u32 },
    /// An `x = x` literal was deleted (xx-resolution at the clause-simplification level).
    Xx { lit: u32 },
    /// Two identical literals were merged into one.
    Merge { kept: u32, dropped: u32 },
    /// A literal evaluated to a constant (e.g. via arithmetic) and was simplified away.
    Eval { lit: u32 },
    /// A literal was rewritten by forward demodulation.
    Rewrite { lit: u32, steps: Vec<DemodStep> },
    /// A literal subsumed by unit clause deletion was dropped.
    UnitDel { lit: u32, unit: ClauseId },
}

/// A clause's complete provenance: one primary cell and zero or more secondary cells layered atop
/// it in application order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Justification {
    pub primary: Primary,
    pub secondary: Vec<Secondary>,
}

impl Justification {
    pub fn new(primary: Primary) -> Self {
        Justification { primary, secondary: Vec::new() }
    }

    pub fn push_secondary(&mut self, cell: Secondary) {
        self.secondary.push(cell);
    }
}

fn primary_parents(primary: &Primary) -> Vec<ClauseId> {
    match primary {
        Primary::Input | Primary::Goal | Primary::Deny | Primary::NewSymbol => Vec::new(),
        Primary::Copy(p) | Primary::Instantiate(p) | Primary::Clausify(p) | Primary::ExpandDef(p) => vec![*p],
        Primary::Propositional(ps) => ps.clone(),
        Primary::BackRewrite { parent, steps } => {
            let mut out = vec![*parent];
            out.extend(steps.iter().map(|s| s.id));
            out
        }
        Primary::Resolve { p1, p2, .. } => vec![*p1, *p2],
        Primary::Hyper { nucleus, satellites } | Primary::Ur { nucleus, satellites } => {
            let mut out = vec![*nucleus];
            out.extend(satellites.iter().copied());
            out
        }
        Primary::Factor { parent, .. } | Primary::XxRes { parent, .. } => vec![*parent],
        Primary::Para { from, into, .. } => vec![*from, *into],
    }
}

fn secondary_parents(cell: &Secondary) -> Vec<ClauseId> {
    match cell {
        Secondary::Flip { .. } | Secondary::Xx { .. } | Secondary::Merge { .. } | Secondary::Eval { .. } => Vec::new(),
        Secondary::Rewrite { steps, .. } => steps.iter().map(|s| s.id).collect(),
        Secondary::UnitDel { unit, .. } => vec![*unit],
    }
}

/// Every clause ID a justification directly references (spec.md: "a parents-collection utility
/// walks a justification and returns the set of clause IDs it references").
pub fn collect_parents(justification: &Justification) -> BTreeSet<ClauseId> {
    let mut out: BTreeSet<ClauseId> = primary_parents(&justification.primary).into_iter().collect();
    for cell in &justification.secondary {
        out.extend(secondary_parents(cell));
    }
    out
}

/// The full ancestry of `root`: every clause ID transitively referenced by its justification
/// chain, sorted by increasing ID (spec.md: "Ancestry computation memoizes through the ID table
/// and sorts by increasing ID"). `lookup` resolves a clause ID to its justification; a clause with
/// no entry (already discarded) contributes no further ancestors.
pub fn ancestry(root: ClauseId, lookup: &impl Fn(ClauseId) -> Option<Justification>) -> Vec<ClauseId> {
    let mut memo: HashMap<ClauseId, BTreeSet<ClauseId>> = HashMap::new();
    let mut stack = vec![root];
    let mut seen = BTreeSet::new();
    seen.insert(root);

    while let Some(id) = stack.pop() {
        if memo.contains_key(&id) {
            continue;
        }
        let parents = match lookup(id) {
            Some(j) => collect_parents(&j),
            None => BTreeSet::new(),
        };
        for &p in &parents {
            if seen.insert(p) {
                stack.push(p);
            }
        }
        memo.insert(id, parents);
    }

    let mut all: BTreeSet<ClauseId> = BTreeSet::new();
    for parents in memo.values() {
        all.extend(parents.iter().copied());
    }
    all.remove(&root);
    all.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_parents_walks_resolve_and_demod_steps() {
        let justification = Justification {
            primary: Primary::Resolve { p1: ClauseId(1), lit1: 0, p2: ClauseId(2), lit2: 1 },
            secondary: vec![Secondary::Rewrite {
                lit: 0,
                steps: vec![DemodStep { id: ClauseId(9), sequence: 1, direction: Direction::L }],
            }],
        };
        let parents = collect_parents(&justification);
        assert_eq!(parents, BTreeSet::from([ClauseId(1), ClauseId(2), ClauseId(9)]));
    }

    #[test]
    fn ancestry_is_sorted_and_transitive() {
        let mut db: HashMap<ClauseId, Justification> = HashMap::new();
        db.insert(ClauseId(1), Justification::new(Primary::Input));
        db.insert(ClauseId(2), Justification::new(Primary::Input));
        db.insert(
            ClauseId(3),
            Justification::new(Primary::Resolve { p1: ClauseId(1), lit1: 0, p2: ClauseId(2), lit2: 0 }),
        );
        db.insert(
            ClauseId(4),
            Justification::new(Primary::Factor { parent: ClauseId(3), lit_a: 0, lit_b: 1 }),
        );

        let lookup = |id: ClauseId| db.get(&id).cloned();
        let ancestors = ancestry(ClauseId(4), &lookup);
        assert_eq!(ancestors, vec![ClauseId(1), ClauseId(2), ClauseId(3)]);
    }

    #[test]
    fn ancestry_of_an_input_clause_is_empty() {
        let mut db: HashMap<ClauseId, Justification> = HashMap::new();
        db.insert(ClauseId(1), Justification::new(Primary::Input));
        let lookup = |id: ClauseId| db.get(&id).cloned();
        assert!(ancestry(ClauseId(1), &lookup).is_empty());
    }
}
