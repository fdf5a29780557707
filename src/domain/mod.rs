pub mod lists;
pub mod message;
