/*!
Configuration of a [context](crate::context). spec.md §6 ("Flags and parameters") and §5's limits.

All configuration lives in one [Config] struct, with each tunable wrapped in [ConfigOption] so a
caller can inspect its valid range and the latest [ContextState](crate::context::ContextState) in
which it may still be adjusted, mirroring the teacher's own `config` module. Unlike the teacher,
nothing here is VSIDS/LBD/restart-scheduler specific --- those concepts have no counterpart in a
resolution prover; the fields instead cover the budgets and toggles spec.md §4/§5 name explicitly.
*/

mod config_option;
pub use config_option::ConfigOption;

use crate::context::ContextState;
use crate::index::IndexKind;
use crate::order::OrderKind;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Which primary term ordering to use (spec.md §4.F).
    pub order: ConfigOption<OrderKind>,

    /// Which backend newly built term indexes use (spec.md §4.E).
    pub index_kind: ConfigOption<IndexKind>,

    /// Per-call forward demodulation rewrite step budget (spec.md §4.H).
    pub demod_step_budget: ConfigOption<u32>,

    /// Per-call forward demodulation size-increase budget (spec.md §4.H).
    pub demod_size_budget: ConfigOption<i64>,

    /// Bucket count `N` for the pair scheduler (spec.md §4.I).
    pub pair_scheduler_buckets: ConfigOption<usize>,

    /// Whether a hint match overrides a generated clause's weight (spec.md §4.J).
    pub hint_weight_override: ConfigOption<bool>,

    /// Whether newly generated equalities are checked for AC-redundancy (spec.md §4.J).
    pub ac_redundancy: ConfigOption<bool>,

    /// Whether forward/backward subsumption is performed at all (spec.md §4.L).
    pub subsumption: ConfigOption<bool>,

    /// Wall-clock limit, `None` for unbounded (spec.md §4.L/§5's tracked limits).
    pub time_limit: ConfigOption<Option<std::time::Duration>>,

    /// Retained-clause-count limit (`MAX_KEPT`, spec.md §6).
    pub max_kept: ConfigOption<Option<u64>>,

    /// Given-clause-count limit (`MAX_GIVEN`, spec.md §6).
    pub max_given: ConfigOption<Option<u64>>,

    /// Proof-depth limit (spec.md §4.L).
    pub max_proof_depth: ConfigOption<Option<u32>>,

    /// Whether [builder::load_problem](crate::builder::load_problem) folds recognized equational
    /// definitions away via [definitions::resolve](crate::definitions::resolve) (spec.md §4.J).
    pub fold_definitions: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            order: ConfigOption {
                name: "order",
                min: OrderKind::Kbo,
                max: OrderKind::Lpo,
                max_state: ContextState::Configuration,
                value: OrderKind::Kbo,
            },
            index_kind: ConfigOption {
                name: "index_kind",
                min: IndexKind::Linear,
                max: IndexKind::DiscrimBind,
                max_state: ContextState::Configuration,
                value: IndexKind::Fpa { depth: 4 },
            },
            demod_step_budget: ConfigOption {
                name: "demod_step_budget",
                min: 1,
                max: u32::MAX,
                max_state: ContextState::Running,
                value: 1_000,
            },
            demod_size_budget: ConfigOption {
                name: "demod_size_budget",
                min: 0,
                max: i64::MAX,
                max_state: ContextState::Running,
                value: 1_000,
            },
            pair_scheduler_buckets: ConfigOption {
                name: "pair_scheduler_buckets",
                min: 1,
                max: usize::MAX,
                max_state: ContextState::Configuration,
                value: 64,
            },
            hint_weight_override: ConfigOption {
                name: "hint_weight_override",
                min: false,
                max: true,
                max_state: ContextState::Running,
                value: true,
            },
            ac_redundancy: ConfigOption {
                name: "ac_redundancy",
                min: false,
                max: true,
                max_state: ContextState::Running,
                value: true,
            },
            subsumption: ConfigOption {
                name: "subsumption",
                min: false,
                max: true,
                max_state: ContextState::Running,
                value: true,
            },
            time_limit: ConfigOption {
                name: "time_limit",
                min: None,
                max: None,
                max_state: ContextState::Running,
                value: None,
            },
            max_kept: ConfigOption {
                name: "max_kept",
                min: None,
                max: None,
                max_state: ContextState::Running,
                value: None,
            },
            max_given: ConfigOption {
                name: "max_given",
                min: None,
                max: None,
                max_state: ContextState::Running,
                value: None,
            },
            max_proof_depth: ConfigOption {
                name: "max_proof_depth",
                min: None,
                max: None,
                max_state: ContextState::Running,
                value: None,
            },
            fold_definitions: ConfigOption {
                name: "fold_definitions",
                min: false,
                max: true,
                max_state: ContextState::Configuration,
                value: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_the_standard_redundancy_checks() {
        let config = Config::default();
        assert!(config.subsumption.value);
        assert!(config.ac_redundancy.value);
        assert_eq!(config.pair_scheduler_buckets.value, 64);
    }
}
