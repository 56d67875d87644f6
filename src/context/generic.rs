/*!
The engine state a saturation run operates over. Grounded in the teacher's own
[GenericContext](https://docs.rs/otter_sat) --- here there is no genericity over a source of
randomness (nothing in this engine is randomized; spec.md names no such requirement, and `rand`
is accordingly unused --- see DESIGN.md), so the split into a `generic`/`specific` pair instead
separates the engine's mechanics (this file) from the one concrete constructor
([specific](crate::context::specific)) a caller actually instantiates.
*/

use std::collections::HashMap;

use crate::ac_redundancy::is_ac_redundant;
use crate::binding::{BindingContext, Multiplier, MultiplierGuard, MultiplierPool, Trail, TrailMark};
use crate::config::Config;
use crate::context::ContextState;
use crate::db::clause::{Clause, Literal};
use crate::db::clist::ListName;
use crate::db::ClauseStore;
use crate::demod::DemodIndex;
use crate::hints::HintStore;
use crate::index::{IndexKind, Mindex};
use crate::justify::Justification;
use crate::order::Order;
use crate::symbol::SymbolTable;
use crate::term::{FlagPool, TermArena, TermId};
use crate::types::err::{ContextError, ErrorKind};
use crate::types::ClauseId;

/// Running totals reported at the end of a solve (spec.md §6's statistics banner).
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    pub clauses_generated: u64,
    pub clauses_retained: u64,
    pub given_clauses: u64,
}

/// The full state of an in-progress (or not-yet-started) saturation run.
pub struct Context {
    pub config: Config,
    pub state: ContextState,
    pub counters: Counters,

    pub symbols: SymbolTable,
    pub arena: TermArena,
    pub contexts: Vec<BindingContext>,
    pub trail: Trail,
    pub multipliers: MultiplierPool,
    pub flags: FlagPool,
    pub order: Order,

    pub clauses: ClauseStore,
    pub demodulators: DemodIndex,
    pub back_demodulators: DemodIndex,
    pub hints: HintStore,
    /// Every literal atom of every clause in `usable`, for resolution/paramodulation partner
    /// lookup (spec.md §4.E). Populated by [index_active_clause](Context::index_active_clause) as
    /// a clause is integrated, and kept in sync by
    /// [deindex_active_clause](Context::deindex_active_clause) whenever a clause leaves `usable`
    /// or is rewritten in place by back-demodulation.
    pub active_literals: Mindex<(ClauseId, u32)>,
    /// Multiplier guards leased for a [DemodRule](crate::demod::DemodRule)'s own variable
    /// namespace, held for as long as the rule is indexed (unlike the lease-use-release pattern
    /// ordinary generating/simplifying operations follow). Released by
    /// [retire_demodulator](crate::procedures::simplify::retire_demodulator).
    pub demod_multipliers: HashMap<ClauseId, MultiplierGuard>,
    /// Multiplier guards leased for a [Hint](crate::hints::Hint)'s own variable namespace, held
    /// for the lifetime of the run (hints are never retired once loaded).
    pub hint_multipliers: HashMap<ClauseId, MultiplierGuard>,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let multiplier_capacity = 64;
        let mut multipliers = MultiplierPool::new(multiplier_capacity);
        let contexts = (0..multiplier_capacity).map(|i| BindingContext::new(Multiplier(i))).collect();
        // The query context (multiplier 0) is permanently reserved for one-shot calls (matching,
        // subsumption checks) that never persist bindings across calls.
        let _ = multipliers.lease();

        let order = Order::new(config.order.value);
        Context {
            state: ContextState::Configuration,
            counters: Counters::default(),
            symbols: SymbolTable::new(),
            arena: TermArena::new(),
            contexts,
            trail: Trail::new(),
            multipliers,
            flags: FlagPool::new(),
            order,
            clauses: ClauseStore::new(config.pair_scheduler_buckets.value),
            demodulators: DemodIndex::new(),
            back_demodulators: DemodIndex::new(),
            hints: HintStore::new(),
            active_literals: Mindex::new(config.index_kind.value),
            demod_multipliers: HashMap::new(),
            hint_multipliers: HashMap::new(),
            config,
        }
    }

    /// The reserved query-side multiplier (spec.md §4.C: every call that doesn't persist its
    /// bindings across invocations shares this context).
    pub fn query_ctx(&self) -> Multiplier {
        Multiplier(0)
    }

    /// Lease a fresh multiplier for the duration of one generating/simplifying operation.
    pub fn lease_multiplier(&mut self) -> Result<MultiplierGuard, ErrorKind> {
        self.multipliers.lease()
    }

    /// Release a multiplier leased by [lease_multiplier](Context::lease_multiplier) once the
    /// operation using it is done with the bindings it made (its trail segment is expected to
    /// already have been rolled back via [rollback](Context::rollback)).
    pub fn release_multiplier(&mut self, guard: MultiplierGuard) {
        self.multipliers.release(guard);
    }

    /// Undo every binding made since `mark`, freeing its leased multiplier's context for reuse.
    pub fn rollback(&mut self, mark: TrailMark) {
        let contexts = &mut self.contexts;
        self.trail.undo_to(mark, |m| contexts.get_mut(m.0 as usize));
    }

    /// Orient `lhs`/`rhs` and normalize `literals` into a [Clause], tagging equality literals
    /// oriented by the active order, and add it to the store under `primary`'s provenance,
    /// returning its fresh ID. Joins the `sos` list, ready for the saturation loop to schedule.
    pub fn add_clause(&mut self, literals: Vec<Literal>, primary: crate::justify::Primary) -> Result<ClauseId, ErrorKind> {
        let id = self.record_clause(literals, primary)?;
        self.clauses.add_to_list(id, ListName::Sos)?;
        Ok(id)
    }

    /// As [add_clause](Context::add_clause), but joins no list: for provenance-only clauses (e.g.
    /// a recorded, not-yet-negated [Primary::Goal](crate::justify::Primary::Goal)) that the
    /// saturation loop never picks up on its own.
    pub fn record_clause(&mut self, mut literals: Vec<Literal>, primary: crate::justify::Primary) -> Result<ClauseId, ErrorKind> {
        self.orient_equalities(&mut literals);

        if self.config.ac_redundancy.value && is_ac_redundant(&self.symbols, &mut self.arena, &literals) {
            return Err(ContextError::MalformedInput.into());
        }

        let id = self.clauses.fresh_id();
        let weight = literals.iter().map(|l| self.arena.size(l.atom) as i64).sum();
        let clause = Clause::new(id, literals, weight, Justification::new(primary));
        self.clauses.insert(clause)?;
        self.counters.clauses_retained += 1;
        Ok(id)
    }

    fn orient_equalities(&self, literals: &mut [Literal]) {
        let Some(eq) = self.symbols.equality else { return };
        for lit in literals.iter_mut() {
            if self.arena.symbol(lit.atom) != Some(eq) {
                continue;
            }
            let args = self.arena.args(lit.atom).to_vec();
            if args.len() != 2 {
                continue;
            }
            lit.oriented = matches!(self.order.term_order(&self.symbols, &self.arena, args[0], args[1]), crate::order::Comparison::Gt);
        }
    }

    /// Index every literal of `id`'s clause (called once a clause is integrated into the active
    /// set; spec.md §4.L's `integrate(given)`).
    pub fn index_active_clause(&mut self, id: ClauseId) -> Result<(), ErrorKind> {
        let literals = self.clauses.get(id)?.literals.clone();
        for (i, lit) in literals.iter().enumerate() {
            self.active_literals.insert(&self.arena, lit.atom, self.query_ctx(), (id, i as u32));
        }
        Ok(())
    }

    /// Remove every entry [index_active_clause](Context::index_active_clause) recorded for `id`'s
    /// previous literal set: `literals` must be the clause's literals as they stood at the time
    /// they were indexed (a pre-rewrite snapshot when called from back-demodulation, or the
    /// clause's current literals when called as it leaves `usable` entirely).
    pub fn deindex_active_clause(&mut self, id: ClauseId, literals: &[Literal]) {
        for lit in literals {
            self.active_literals.remove(&self.arena, lit.atom, |&(cid, _)| cid == id);
        }
    }

    pub fn fresh_symbol(&mut self, name: &str, arity: u32, predicate: bool) -> Result<crate::symbol::SymNum, ErrorKind> {
        self.symbols.intern(name, arity, predicate)
    }

    pub fn make_term(&mut self, sym: crate::symbol::SymNum, args: Vec<TermId>) -> TermId {
        self.arena.make_rigid(sym, args)
    }
}
