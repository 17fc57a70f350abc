//! Service implementations
//!
//! Concrete implementations of the interfaces.

pub mod mock_process;
pub mod system_process;
pub mod working_dir;

pub use mock_process::{MockProcess, ProcessCall};
pub use system_process::SystemProcess;
pub use working_dir::WorkingDirGuard;
