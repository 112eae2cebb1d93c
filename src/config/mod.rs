mod loader;
mod types;

pub use loader::{SETTINGS_FILE, load, load_container, load_file};
pub use types::Settings;
