pub mod models;
pub mod question_list;
pub mod types;
