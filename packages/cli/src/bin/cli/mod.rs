pub mod settings;
pub mod updates;
