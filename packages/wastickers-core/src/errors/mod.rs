pub mod types;

pub use types::{ContainerError, ModelError, PackError, PartitionError, TransformError};
