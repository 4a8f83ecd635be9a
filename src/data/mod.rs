pub mod store;

pub use store::{StoreError, TaskStore};
