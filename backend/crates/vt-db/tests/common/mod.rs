#![allow(dead_code)]

mod test_db;

pub use fixtures::{create_test_user, create_test_user_named};
pub use test_db::create_test_pool;
