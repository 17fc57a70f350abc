pub mod output;
pub mod request;

// Re-export commonly used types
pub use output::{BlockOutput, CachePolicy, ExecutionResult};
pub use request::{DocumentRef, ExecutionRequest, SourceOrigin};
