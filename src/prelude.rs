// std imports
pub use std::fmt::Display;
pub use std::path::{ Path, PathBuf };
pub use std::collections::{ HashMap, HashSet, BTreeMap };

// sync imports
pub use std::sync::Arc;
pub use parking_lot::RwLock;

// serde imports
pub use serde::{ Serialize, Deserialize };

// constants
pub use crate::SETTINGS_FILE;
pub use crate::DEFAULT_VARIABLE_SYMBOL;

// crate imports
pub use crate::cli::*;
pub use crate::math::*;
pub use crate::errors::*;
pub use crate::settings::*;
