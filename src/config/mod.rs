pub mod options;

pub use options::MultiplyOptions;
