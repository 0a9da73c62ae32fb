pub mod directory;
pub mod file;

pub use directory::{DirectoryDocumenter, RunOptions, RunReport};
pub use file::{DocumentOutcome, FileDocumenter, RedocumentPolicy, SkipReason};
