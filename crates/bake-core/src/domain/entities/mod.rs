pub mod artifact_set;
pub mod common;
pub mod finder;
pub mod identity;
pub mod model;
pub mod options;
pub mod statement;

pub use crate::domain::DomainError;
pub use artifact_set::{Artifact, GeneratedArtifactSet};
pub use finder::{ConfigureOption, FinderDescriptor, FinderModule, VersionCheck};
pub use identity::ProjectIdentity;
pub use model::{DirScope, Location, ProjectModel, SubdirectoryText};
pub use options::OptionRegistry;
pub use statement::Statement;
