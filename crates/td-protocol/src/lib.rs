pub mod intent;
pub mod result;
pub mod submission;

pub use intent::*;
pub use result::*;
pub use submission::*;
