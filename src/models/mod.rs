pub mod clip;
pub mod google;
pub mod transcript;

pub use clip::*;
pub use google::*;
pub use transcript::*;
