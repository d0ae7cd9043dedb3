// config.rs: Compile-time defaults and the environment overrides read by the
// `lz4` binary.

use tracing::warn;

use crate::frame::BlockSizeId;
use crate::hc::HC_CLEVEL_DEFAULT;

// Default HC compression level, used by `--hc` without an explicit level.
// Can be overridden by the LZ4_CLEVEL environment variable,
// or by the --level command-line flag.
pub const CLEVEL_DEFAULT: i32 = HC_CLEVEL_DEFAULT;

// Default frame block size (64 KB blocks).
// Can be overridden at runtime using the --block-size flag.
pub const BLOCKSIZEID_DEFAULT: BlockSizeId = BlockSizeId::Max64Kb;

// Default block size of the "LZ4Block" stream format.
pub const BLOCK_STREAM_SIZE_DEFAULT: usize = 1 << 16;

// Environment variable holding the default compression level.
pub const ENV_CLEVEL: &str = "LZ4_CLEVEL";

/// Runtime defaults after applying environment overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub clevel: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            clevel: CLEVEL_DEFAULT,
        }
    }
}

impl Settings {
    /// Reads `LZ4_CLEVEL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENV_CLEVEL).ok().as_deref())
    }

    /// Parses an optional `LZ4_CLEVEL` value.  `None` means the variable is
    /// unset; anything that is not an unsigned integer is ignored.
    pub fn from_env_value(env_val: Option<&str>) -> Self {
        let mut settings = Settings::default();
        if let Some(env) = env_val {
            match env.trim().parse::<u32>() {
                Ok(level) => settings.clevel = level.min(i32::MAX as u32) as i32,
                Err(_) => warn!(
                    "ignoring environment variable setting {}={}: not a valid unsigned value",
                    ENV_CLEVEL, env
                ),
            }
        }
        settings
    }
}
