use crate::context::ContextState;

/// A single configurable value: its name (for diagnostics), valid range, the latest
/// [ContextState] in which it may still be changed, and its current value.
#[derive(Clone)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub max_state: ContextState,
    pub value: T,
}
