//! Player identities and admin levels.

mod id;
pub use id::{ParsePlayerIdError, PlayerId};

mod level;
pub use level::{Level, ParseLevelError};
