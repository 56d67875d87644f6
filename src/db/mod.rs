/*!
The clause store. spec.md §4.I, grounded in `otter_sat`'s own [clause database](crate::db) --- a
single owner of every clause, its named-list memberships, and the weight-bucketed pair scheduler
used to drive two-clause generating inferences.

Fields are private; every mutation needed to keep `Clause::memberships` and the `Clist`s it names
in sync goes through a [ClauseStore] method.
*/

pub mod clause;
pub mod clist;
pub mod pair_scheduler;

use std::collections::HashMap;

use crate::db::clause::Clause;
use crate::db::clist::{Clist, ListName};
use crate::db::pair_scheduler::PairScheduler;
use crate::misc::log::targets;
use crate::types::err::{ClauseDBError, ErrorKind};
use crate::types::ClauseId;

pub struct ClauseStore {
    clauses: HashMap<ClauseId, Clause>,
    next_id: u64,
    lists: HashMap<ListName, Clist>,
    pair_scheduler: PairScheduler,
}

impl ClauseStore {
    pub fn new(pair_buckets: usize) -> Self {
        ClauseStore {
            clauses: HashMap::new(),
            next_id: 1,
            lists: HashMap::new(),
            pair_scheduler: PairScheduler::new(pair_buckets),
        }
    }

    /// Allocate the next strictly-increasing ID (spec.md §3 invariant: `clause_id > 0`).
    pub fn fresh_id(&mut self) -> ClauseId {
        let id = ClauseId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, clause: Clause) -> Result<(), ErrorKind> {
        if clause.id.0 == 0 {
            return Err(ClauseDBError::NonPositiveId.into());
        }
        log::trace!(target: targets::CLAUSE_DB, "stored clause {:?}, weight {}", clause.id, clause.weight);
        self.clauses.insert(clause.id, clause);
        Ok(())
    }

    pub fn get(&self, id: ClauseId) -> Result<&Clause, ErrorKind> {
        self.clauses.get(&id).ok_or(ClauseDBError::UnknownId(id.0).into())
    }

    pub fn get_mut(&mut self, id: ClauseId) -> Result<&mut Clause, ErrorKind> {
        self.clauses.get_mut(&id).ok_or(ClauseDBError::UnknownId(id.0).into())
    }

    pub fn add_to_list(&mut self, id: ClauseId, list: ListName) -> Result<(), ErrorKind> {
        let clause = self.get_mut(id)?;
        clause.memberships.insert(list);
        self.lists.entry(list).or_default().push(id);
        Ok(())
    }

    pub fn remove_from_list(&mut self, id: ClauseId, list: ListName) -> Result<(), ErrorKind> {
        let clause = self.get_mut(id)?;
        if !clause.memberships.remove(&list) {
            return Err(ClauseDBError::NotAMember.into());
        }
        if let Some(l) = self.lists.get_mut(&list) {
            l.remove(id);
        }
        Ok(())
    }

    /// Drop `id` from every list it belongs to (spec.md §4.I: O(degree), since `memberships`
    /// enumerates exactly the lists to visit).
    pub fn remove_from_all_lists(&mut self, id: ClauseId) -> Result<(), ErrorKind> {
        let names: Vec<ListName> = self.get(id)?.memberships().copied().collect();
        for name in names {
            self.remove_from_list(id, name)?;
        }
        Ok(())
    }

    /// If `id` belongs to no list, remove it from the store entirely.
    pub fn drop_if_orphaned(&mut self, id: ClauseId) -> bool {
        match self.clauses.get(&id) {
            Some(c) if c.degree() == 0 => {
                self.clauses.remove(&id);
                log::trace!(target: targets::CLAUSE_DB, "dropped orphaned clause {id:?}");
                true
            }
            _ => false,
        }
    }

    pub fn list(&self, name: ListName) -> Option<&Clist> {
        self.lists.get(&name)
    }

    pub fn pair_scheduler(&self) -> &PairScheduler {
        &self.pair_scheduler
    }

    pub fn pair_scheduler_mut(&mut self) -> &mut PairScheduler {
        &mut self.pair_scheduler
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justify::{Justification, Primary};

    fn unit(store: &mut ClauseStore, weight: i64) -> ClauseId {
        let id = store.fresh_id();
        store.insert(Clause::new(id, vec![], weight, Justification::new(Primary::Input))).unwrap();
        id
    }

    #[test]
    fn membership_round_trips_through_add_and_remove() {
        let mut store = ClauseStore::new(8);
        let id = unit(&mut store, 1);
        store.add_to_list(id, ListName::Usable).unwrap();
        assert!(store.list(ListName::Usable).unwrap().contains(id));

        store.remove_from_list(id, ListName::Usable).unwrap();
        assert!(!store.list(ListName::Usable).unwrap().contains(id));
    }

    #[test]
    fn orphaned_clause_is_dropped_only_after_every_list_releases_it() {
        let mut store = ClauseStore::new(8);
        let id = unit(&mut store, 1);
        store.add_to_list(id, ListName::Usable).unwrap();
        store.add_to_list(id, ListName::Sos).unwrap();

        store.remove_from_list(id, ListName::Usable).unwrap();
        assert!(!store.drop_if_orphaned(id));

        store.remove_from_list(id, ListName::Sos).unwrap();
        assert!(store.drop_if_orphaned(id));
        assert!(store.get(id).is_err());
    }

    #[test]
    fn remove_from_all_lists_clears_every_membership() {
        let mut store = ClauseStore::new(8);
        let id = unit(&mut store, 1);
        store.add_to_list(id, ListName::Usable).unwrap();
        store.add_to_list(id, ListName::Demodulators).unwrap();

        store.remove_from_all_lists(id).unwrap();
        assert_eq!(store.get(id).unwrap().degree(), 0);
    }
}
