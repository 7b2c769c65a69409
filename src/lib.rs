pub mod alphabet;
pub mod generator;
pub mod source;
pub mod strength;

pub use alphabet::{CharClass, ClassSet};
pub use generator::{generate, GenerationConfig};
pub use source::{RandomSource, SourceKind};
pub use strength::{estimate, StrengthResult};
