use crate::command::commands::{
    CommandDyn, ConfigCommand, HelpCommand, NowCommand, ProfileCommand, ScheduleCommand,
    TaskCommand,
};
use crate::core::types::{Flag, GlobalCommand};
use crate::errors::Result;

pub trait CommandResolver {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve<'a>(&self, command: &str, args: &'a [String]) -> Result<CommandDyn<'a>>;
}

pub struct GlobalResolver;

impl CommandResolver for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        GlobalCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [String]) -> Result<CommandDyn<'a>> {
        let command_type = GlobalCommand::try_from(command)?;
        match command_type {
            GlobalCommand::Now => Ok(Box::new(NowCommand::new(args))),
            GlobalCommand::Profile => Ok(Box::new(ProfileCommand::new(args))),
            GlobalCommand::Schedule => Ok(Box::new(ScheduleCommand::new(args))),
            GlobalCommand::Task => Ok(Box::new(TaskCommand::new(args))),
            GlobalCommand::Config => Ok(Box::new(ConfigCommand::new(args))),
        }
    }
}

/// `-h`, `--help` or `help` as the command word.
pub struct HelpResolver;

impl CommandResolver for HelpResolver {
    fn can_resolve(&self, command: &str) -> bool {
        command.trim().eq_ignore_ascii_case("help") || Flag::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, _command: &str, args: &'a [String]) -> Result<CommandDyn<'a>> {
        Ok(Box::new(HelpCommand::new(args)))
    }
}
