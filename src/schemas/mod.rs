pub mod import;
pub mod quiz;
