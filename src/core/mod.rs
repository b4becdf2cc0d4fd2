pub mod entry;
pub mod probe;

pub use entry::{normalized_key, strip_outer_quotes, Category, PathEntry, Scope};
pub use probe::{DirListing, DirectoryProbe};
