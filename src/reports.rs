/*!
Solve outcomes. spec.md §6's exit-code banner (`PROOF`, `SOS_EMPTY`, `MAX_MEGS`, `MAX_SECONDS`,
`MAX_GIVEN`, `MAX_KEPT`, `ACTION_EXIT`, `SIGINT`, `SIGSEGV`, `FATAL`), grounded in the teacher's
own [Report](crate::reports) enum returned by [Context::solve](crate::context::Context::solve).

Rendering a proof object from a [Report::Proof] is explicitly out of scope (spec.md §1's
non-goals name "proof-reconstruction/justification renderer"); callers who need one walk
[justify::ancestry](crate::justify::ancestry) themselves.
*/

use crate::types::ClauseId;

/// Why a [solve](crate::context::Context::solve) call stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Report {
    /// The empty clause was derived; `ClauseId` is its ID.
    Proof(ClauseId),
    /// The passive set emptied without deriving a contradiction.
    Exhausted,
    /// The retained-clause-count limit was reached (`MAX_KEPT`).
    MaxKept,
    /// The given-clause-count limit was reached (`MAX_GIVEN`).
    MaxGiven,
    /// The wall-clock time limit was reached (`MAX_SECONDS`).
    MaxSeconds,
}
