pub mod commit;
pub mod hash;

pub use commit::{Commit, CommitStatus};
pub use hash::equal_hashes;
