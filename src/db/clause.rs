/*!
The clause record (`Topform`, spec.md §3). Fields are private where [ClauseStore](crate::db::ClauseStore)
methods exist to uphold invariants across them (the `memberships` set, the weight used by
[the pair scheduler](crate::db::pair_scheduler)), public otherwise.
*/

use std::collections::BTreeSet;

use crate::db::clist::ListName;
use crate::justify::Justification;
use crate::term::TermId;
use crate::types::ClauseId;

/// A literal: a sign over an atomic term. `atom` is always the equality atom or a plain predicate
/// atom --- negation is carried here rather than folded into the term.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Literal {
    pub positive: bool,
    pub atom: TermId,
    /// Set when `atom` is an equality literal oriented `lhs ≻ rhs` in the active term order
    /// (spec.md §3 invariant: "For any oriented equality ... `α ≻ β`").
    pub oriented: bool,
}

impl Literal {
    pub fn new(positive: bool, atom: TermId) -> Self {
        Literal { positive, atom, oriented: false }
    }
}

/// A per-clause attribute, mutable after creation (spec.md §4.J: a hint's `bsub_wt` overrides the
/// weight of anything it subsumes; labels propagate from a matched hint).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Attribute {
    BsubWeight(i64),
    Label(String),
}

/// A clause (`Topform`): an ID, its literals, a weight used to order the passive list, a
/// justification chain, and zero or more attributes.
#[derive(Clone, Debug)]
pub struct Clause {
    pub id: ClauseId,
    pub literals: Vec<Literal>,
    pub weight: i64,
    pub justification: Justification,
    pub attributes: Vec<Attribute>,
    pub(super) memberships: BTreeSet<ListName>,
}

impl Clause {
    pub fn new(id: ClauseId, literals: Vec<Literal>, weight: i64, justification: Justification) -> Self {
        Clause {
            id,
            literals,
            weight,
            justification,
            attributes: Vec::new(),
            memberships: BTreeSet::new(),
        }
    }

    pub fn is_empty_clause(&self) -> bool {
        self.literals.is_empty()
    }

    /// The weight a hint's `bsub_wt` would impose, if the clause carries one.
    pub fn bsub_weight(&self) -> Option<i64> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::BsubWeight(w) => Some(*w),
            _ => None,
        })
    }

    pub fn memberships(&self) -> impl Iterator<Item = &ListName> {
        self.memberships.iter()
    }

    pub fn degree(&self) -> usize {
        self.memberships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justify::Primary;

    #[test]
    fn fresh_clause_has_no_memberships() {
        let c = Clause::new(ClauseId(1), vec![], 3, Justification::new(Primary::Input));
        assert_eq!(c.degree(), 0);
    }

    #[test]
    fn bsub_weight_overrides_when_present() {
        let mut c = Clause::new(ClauseId(1), vec![], 3, Justification::new(Primary::Input));
        assert_eq!(c.bsub_weight(), None);
        c.attributes.push(Attribute::BsubWeight(1));
        assert_eq!(c.bsub_weight(), Some(1));
    }
}
