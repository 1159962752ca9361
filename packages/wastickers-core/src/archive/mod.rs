pub mod build;
pub mod load;
pub mod validate;

pub use load::from_wastickers;
pub use validate::check_valid_wastickers;
