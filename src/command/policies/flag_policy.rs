use crate::core::types::Flag;
use crate::errors::Error;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

pub trait FlagRule {
    fn check(&self, args: &[String]) -> FlagDecision;
}

/// `-h` / `--help` at a fixed position after the command word.
pub struct HelpAtIdx(pub usize);
impl FlagRule for HelpAtIdx {
    fn check(&self, args: &[String]) -> FlagDecision {
        match args.get(self.0).map(|a| Flag::try_from(a.as_str())) {
            Some(Ok(Flag::Help)) => FlagDecision::ShortCircuitUsage,
            _ => FlagDecision::Continue,
        }
    }
}

/// Rejects extra words for commands that take no arguments.
pub struct MaxArgs(pub usize);
impl FlagRule for MaxArgs {
    fn check(&self, args: &[String]) -> FlagDecision {
        if args.len() > self.0 {
            FlagDecision::Error(Error::parse(format!(
                "Unexpected argument: '{}'",
                args[self.0]
            )))
        } else {
            FlagDecision::Continue
        }
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}
impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }
    pub fn none() -> Self {
        Self { rules: vec![] }
    }

    /// Help anywhere among the first `depth` words.
    pub fn help_within(depth: usize) -> Self {
        Self::new(
            (0..depth)
                .map(|idx| Box::new(HelpAtIdx(idx)) as Box<dyn FlagRule>)
                .collect(),
        )
    }

    pub fn with(mut self, rule: impl FlagRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn evaluate(&self, args: &[String]) -> FlagDecision {
        // First matching short-circuit wins; otherwise Continue.
        for r in &self.rules {
            match r.check(args) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
