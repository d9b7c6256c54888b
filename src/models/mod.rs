// Data Models
pub mod directory_state;
pub mod entry_list;
pub mod file_entry;
pub mod operation;

pub use directory_state::DirectoryState;
pub use entry_list::EntryList;
pub use file_entry::FileEntry;
pub use operation::{
    ContentClass, Job, JobKind, JobOutput, JobResult, Listing, ListingNotice, Mutation,
    Navigation, OpenRequest,
};
