pub mod repository;

pub use repository::FsMenuStore;
