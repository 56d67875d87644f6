use crate::config::Config;
use crate::context::{Context, ContextState};
use crate::reports::Report;

impl Context {
    /// Build a fresh context from `config`.
    pub fn from_config(config: Config) -> Self {
        Context::new(config)
    }

    /// Run the [saturation loop](crate::procedures::solve) to completion or to a limit
    /// (spec.md §4.L).
    pub fn solve(&mut self) -> Report {
        self.state = ContextState::Running;
        let report = crate::procedures::solve::run(self);
        self.state = ContextState::Complete;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_starts_in_configuration_state() {
        let ctx = Context::from_config(Config::default());
        assert_eq!(ctx.state, ContextState::Configuration);
    }
}
