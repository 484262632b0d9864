pub mod traits;
pub mod value;
pub mod wrappers;
