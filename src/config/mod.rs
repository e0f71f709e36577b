#[allow(clippy::module_inception)]
pub mod config;

pub use config::{
    api_key_from, config_path, get_api_key, load_config, load_config_from, save_config,
    save_config_to, Config,
};
