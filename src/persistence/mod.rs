pub mod active;
pub mod files;
pub mod kv;
pub mod records;
pub mod settings;

pub use active::{clear_active_pause, load_active_pause, save_active_pause};
pub use files::{ensure_data_dir, init_local_data_dir, report_file};
pub use kv::{FileStore, KeyValueStore};
pub use records::PauseRecordStore;
pub use settings::{load_config, save_config};
