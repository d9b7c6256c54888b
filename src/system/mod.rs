// System Layer
pub mod access;
pub mod filesystem;
pub mod opener;

pub use access::{AccessStatus, LocalStorageAccess, StorageAccess};
pub use filesystem::FileSystem;
pub use opener::{Opener, SystemOpener};
