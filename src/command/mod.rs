mod history;

use crate::scene::Character;
use crate::skeleton::SkeletonSnapshot;

pub use history::CommandHistory;

/// A single mutation of the edited character
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Marks a preset as the character's active preset
    SelectPreset {
        character_id: String,
        previous: Option<String>,
        preset_id: String,
    },
    /// Writes a pose onto the character's live skeleton
    ApplyPose {
        character_id: String,
        pose: SkeletonSnapshot,
    },
}

impl Command {
    pub fn execute(&self, character: &mut Character) {
        match self {
            Command::SelectPreset { preset_id, .. } => {
                character.pose_preset_id = Some(preset_id.clone());
            }
            Command::ApplyPose { pose, .. } => {
                character.skeleton.apply(pose);
            }
        }
    }
}

/// Begin/end bracket around mutations that form one undoable step.
///
/// The undo system itself lives outside this crate; implementors only need to
/// know where a group starts and ends.
pub trait GroupedMutation {
    fn begin(&mut self);

    fn end(&mut self);

    /// Called for every command executed inside the bracket
    fn record(&mut self, _command: Command) {}

    /// Executes `command` against `character` and records it
    fn execute(&mut self, command: Command, character: &mut Character) {
        command.execute(character);
        self.record(command);
    }
}
