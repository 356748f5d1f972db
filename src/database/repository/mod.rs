//! Repositories for each resource. All of them report failures through
//! `DatabaseError` so handlers map not-found, validation and unexpected
//! failures the same way.

pub mod entry;
pub mod topic;
pub mod user;

pub use entry::EntryRepository;
pub use topic::TopicRepository;
pub use user::UserRepository;
