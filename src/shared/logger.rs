//! Re-export of the logger API so callers can reach it through
//! `degree_audit::shared::logger`.

pub use crate::logger::{
    disable_debug, disable_verbose, enable_debug, enable_verbose, init_file_logging,
    is_debug_enabled, is_verbose_enabled, set_level, set_level_from_str, Level,
};
