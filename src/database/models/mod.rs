pub mod commonplace_user;
pub mod entry;
pub mod topic;
pub mod user;

pub use commonplace_user::CommonplaceUser;
pub use entry::{Entry, EntryOwner, EntryRow, NewEntry};
pub use topic::{NewTopic, Topic};
pub use user::{NewUser, User};
