/*!
A resolution/paramodulation theorem prover for first-order logic with equality, in the
Prover9/LADR family.

This library is built around the core structure of a [context](context::Context): a single owner
of the symbol table, term arena, clause store, and every index a saturation run consults.

Clauses are added [programmatically](builder), through [Context::make_term](context::Context) and
the [builder] module's input-loading helpers --- parsing a textual problem file into clauses is an
external collaborator's job, not this crate's.

# Orientation

A solve proceeds by repeatedly selecting a "given" clause from the passive list, simplifying it,
checking it for redundancy against the active set, and then deriving new clauses from it via a
fixed set of generating inference rules (resolution, paramodulation, factoring, hyperresolution,
UR-resolution, xx-resolution). [procedures::solve::run] drives this loop to completion, to an
empty-clause refutation, or to one of the configured limits.

Useful starting points:
- [procedures::solve] for the saturation loop itself.
- [builder] for loading a parsed problem into a fresh [Context](context::Context).
- [db] for the clause store and its named lists (`sos`, `usable`, `passive`, `demodulators`, …).
- [config] for the tunables a caller may adjust before or during a run.
- [justify] for how a derived clause's provenance is recorded.

# Logs

Calls to the [log] macro are made throughout the library via named targets, listed in [misc::log].
No log implementation is provided; pairing with e.g. [env_logger](https://docs.rs/env_logger)
lets `RUST_LOG=given_clause=debug` narrow output to the saturation loop's clause selections, or
`RUST_LOG=demod=trace` to individual rewrite steps.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::single_match)]
#![allow(mixed_script_confusables)]

pub mod symbol;
pub mod term;
pub mod flatterm;
pub mod binding;
pub mod order;
pub mod ac_canon;
pub mod unify;
pub mod index;
pub mod demod;
pub mod justify;
pub mod subsume;
pub mod ac_redundancy;
pub mod hints;
pub mod definitions;

pub mod db;
pub mod context;
pub mod config;
pub mod procedures;
pub mod reports;
pub mod types;
pub mod misc;

pub mod builder;
