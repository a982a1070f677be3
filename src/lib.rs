#![warn(clippy::all, rust_2018_idioms)]

pub mod bone_names;
pub mod command;
pub mod config;
pub mod defaults;
pub mod error;
pub mod event;
pub mod mirror;
pub mod persistence;
pub mod preset;
pub mod rotation;
pub mod scene;
pub mod search;
pub mod session;
pub mod skeleton;
pub mod store;
pub mod telemetry;

pub use bone_names::SideMarkers;
pub use command::{Command, CommandHistory, GroupedMutation};
pub use config::EngineConfig;
pub use error::{PresetError, PresetResult};
pub use event::{EventBus, EventHandler, PresetEvent};
pub use mirror::MirrorEngine;
pub use persistence::{JsonFileStorage, MemoryStorage, PersistenceError, PresetStorage};
pub use preset::PosePreset;
pub use rotation::{Rotation, mirror_rotation};
pub use scene::Character;
pub use search::{PriorityOrder, RankedPresets, SearchFilter, TermFilter, rank};
pub use session::PresetSession;
pub use skeleton::{Bone, Skeleton, SkeletonSnapshot};
pub use store::PresetStore;
pub use telemetry::{PoseSubmission, TelemetrySink};
