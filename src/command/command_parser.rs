use crate::command::command_resolver::{CommandResolver, GlobalResolver, HelpResolver};
use crate::command::commands::CommandDyn;
use crate::core::types::GlobalCommand;
use crate::errors::{Error, Result};

pub struct CommandParser {
    registry: Vec<Box<dyn CommandResolver>>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            registry: vec![Box::new(GlobalResolver), Box::new(HelpResolver)],
        }
    }

    pub fn parse<'a>(&self, command: &str, args: &'a [String]) -> Result<CommandDyn<'a>> {
        for r in &self.registry {
            if r.can_resolve(command) {
                return r.resolve(command, args);
            }
        }
        // Surfaces the list of valid command words.
        match GlobalCommand::try_from(command) {
            Err(e) => Err(e),
            Ok(_) => Err(Error::unknown(command)),
        }
    }
}
