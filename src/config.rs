use crate::Args;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub max_file_size: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            data_dir: PathBuf::from(args.data_dir),
            max_file_size: args.max_file_size,
        }
    }
}
