/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [symbol table](crate::symbol)
    pub const SYMBOL_DB: &str = "symbol_db";

    /// Logs related to [unification and matching](crate::unify)
    pub const UNIFY: &str = "unify";

    /// Logs related to [indexing](crate::index)
    pub const INDEX: &str = "index";

    /// Logs related to [demodulation](crate::demod)
    pub const DEMOD: &str = "demod";

    /// Logs related to [AC canonicalization](crate::ac_canon)
    pub const AC_CANON: &str = "ac_canon";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to [clause lists](crate::db::clist)
    pub const CLIST: &str = "clist";

    /// Logs related to the [given-clause loop](crate::procedures::solve)
    pub const GIVEN_CLAUSE: &str = "given_clause";

    /// Logs related to [generating inferences](crate::procedures::generate)
    pub const GENERATE: &str = "generate";

    /// Logs related to [hints](crate::hints)
    pub const HINTS: &str = "hints";

    /// Logs related to [backward simplification](crate::procedures::simplify)
    pub const BACK_SIMPLIFY: &str = "back_simplify";
}
