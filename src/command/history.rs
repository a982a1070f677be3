use super::{Command, GroupedMutation};

/// Records executed commands in the groups marked by `begin`/`end`.
///
/// Commands recorded outside of an open group become a group of their own.
/// Nested brackets fold into the outermost group.
#[derive(Debug, Default)]
pub struct CommandHistory {
    groups: Vec<Vec<Command>>,
    open: Vec<Command>,
    depth: usize,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed groups, oldest first
    pub fn groups(&self) -> &[Vec<Command>] {
        &self.groups
    }

    pub fn last_group(&self) -> Option<&[Command]> {
        self.groups.last().map(Vec::as_slice)
    }

    /// Returns true while a `begin` is waiting for its `end`
    pub fn is_grouping(&self) -> bool {
        self.depth > 0
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.groups.clear();
        self.open.clear();
        self.depth = 0;
    }
}

impl GroupedMutation for CommandHistory {
    fn begin(&mut self) {
        self.depth += 1;
    }

    fn end(&mut self) {
        if self.depth == 0 {
            log::warn!("Mutation group ended without a matching begin");
            return;
        }
        self.depth -= 1;
        if self.depth == 0 && !self.open.is_empty() {
            self.groups.push(std::mem::take(&mut self.open));
        }
    }

    fn record(&mut self, command: Command) {
        if self.is_grouping() {
            self.open.push(command);
        } else {
            self.groups.push(vec![command]);
        }
    }
}
