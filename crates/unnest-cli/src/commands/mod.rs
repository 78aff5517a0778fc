pub mod apply;
pub mod dispatch;
pub mod query;
pub mod schema;
pub mod source;

use std::process::ExitCode;

/// How a command ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Report printed or rewrite written.
    Done,
    /// The rewrite could not be completed; nothing was written.
    Failed,
    /// Fewer wrappers than the requested ordinal; nothing was written.
    OutOfRange,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => Self::SUCCESS,
            Status::Failed => Self::from(1_u8),
            Status::OutOfRange => Self::from(2_u8),
        }
    }
}
