//! Host command registry.

use std::fmt;

use crate::error::HostError;
use crate::host::Shell;

/// Handler run when a command is executed. Commands take no arguments;
/// they act on the shell layout.
pub type CommandHandler = Box<dyn Fn(&mut dyn Shell) -> Result<(), HostError>>;

/// A named, argument-less host action.
pub struct Command {
    pub label: String,
    pub execute: CommandHandler,
}

impl Command {
    pub fn new<F>(label: impl Into<String>, execute: F) -> Self
    where
        F: Fn(&mut dyn Shell) -> Result<(), HostError> + 'static,
    {
        Self {
            label: label.into(),
            execute: Box::new(execute),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The host's command registry as seen by plugins.
pub trait CommandRegistry {
    fn add_command(&mut self, id: &str, command: Command) -> Result<(), HostError>;

    fn has_command(&self, id: &str) -> bool;

    fn label(&self, id: &str) -> Option<&str>;

    /// Command ids in registration order
    fn list_commands(&self) -> Vec<&str>;

    fn execute(&self, id: &str, shell: &mut dyn Shell) -> Result<(), HostError>;
}

/// In-memory command registry
#[derive(Debug, Default)]
pub struct Commands {
    commands: Vec<(String, Command)>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|(cid, _)| cid == id).map(|(_, c)| c)
    }
}

impl CommandRegistry for Commands {
    fn add_command(&mut self, id: &str, command: Command) -> Result<(), HostError> {
        if self.has_command(id) {
            return Err(HostError::DuplicateCommand(id.to_string()));
        }
        ::log::debug!("Added command {} ({})", id, command.label);
        self.commands.push((id.to_string(), command));
        Ok(())
    }

    fn has_command(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn label(&self, id: &str) -> Option<&str> {
        self.get(id).map(|c| c.label.as_str())
    }

    fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(id, _)| id.as_str()).collect()
    }

    fn execute(&self, id: &str, shell: &mut dyn Shell) -> Result<(), HostError> {
        let command = self
            .get(id)
            .ok_or_else(|| HostError::UnknownCommand(id.to_string()))?;
        ::log::info!("Executing command {}", id);
        (command.execute)(shell)
    }
}
