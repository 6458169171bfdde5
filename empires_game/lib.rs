pub mod catalog;
pub mod models;
pub mod rules;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
