pub mod editor_session;
pub mod question_editor;
pub mod quiz_import;
pub mod scoring;
pub mod validation;
