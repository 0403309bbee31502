pub mod error;
pub mod format;
pub mod import;
pub mod ini;
pub mod store;

pub use error::PersistError;
pub use format::{parse_preset_key, preset_key};
pub use import::{match_weather_name, ExternalTableImporter, ImportedEntry};
pub use ini::{IniDocument, IniSection};
pub use store::PresetStore;
