use std::path::PathBuf;

use fob_split::{DEFAULT_MAX_JOINED_NAME_LENGTH, DEFAULT_SIBLING_RANGE};

pub fn default_graph() -> PathBuf {
    PathBuf::from("module-graph.json")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("packages")
}

pub fn default_root_group() -> String {
    "main".to_string()
}

pub fn default_max_joined_name_length() -> usize {
    DEFAULT_MAX_JOINED_NAME_LENGTH
}

pub fn default_link_siblings() -> bool {
    true
}

pub fn default_sibling_range() -> String {
    DEFAULT_SIBLING_RANGE.to_string()
}
