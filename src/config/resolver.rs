use serde_json;
use std::{env, fs, io::ErrorKind, path::Path};

use super::{
    raw::{RawEmitConfig, RawQuote},
    resolved::{EmitConfig, PassConfig, QuoteStyle},
};

pub const MAX_INDENT_WIDTH: usize = 16;

/// Absolute form of a command-line path, relative ones joined onto the cwd.
pub fn get_path_cwd(path_arg: &str) -> Result<String, String> {
    let path = Path::new(path_arg);
    if path.is_absolute() {
        return Ok(path_arg.to_string());
    }
    let cwd = env::current_dir().map_err(|e| format!("Failed to get current directory: {}", e))?;
    cwd.join(path)
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| format!("Invalid path '{}'", path_arg))
}

pub fn load_config(path: &str) -> Result<RawEmitConfig, String> {
    let file_content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            format!("Configuration file '{}' not found.", path)
        } else {
            format!("Failed to read configuration file '{}': {}", path, e)
        }
    })?;
    serde_json::from_str(&file_content)
        .map_err(|e| format!("Failed to parse configuration file '{}': {}", path, e))
}

pub fn resolve_config(raw: RawEmitConfig) -> Result<EmitConfig, String> {
    if raw.indent_width > MAX_INDENT_WIDTH {
        return Err(format!(
            "indent_width must be at most {}, got {}",
            MAX_INDENT_WIDTH, raw.indent_width
        ));
    }
    let indent = if raw.use_tabs {
        "\t".to_string()
    } else {
        " ".repeat(raw.indent_width)
    };
    let quote = match raw.quote {
        RawQuote::Double => QuoteStyle::Double,
        RawQuote::Single => QuoteStyle::Single,
    };

    Ok(EmitConfig {
        indent,
        quote,
        trailing_newline: raw.trailing_newline,
        fail_on_lint: raw.fail_on_lint,
        passes: PassConfig {
            inline_calls: raw.passes.inline_calls,
            strip_dead_code: raw.passes.strip_dead_code,
            flatten_virtual_blocks: raw.passes.flatten_virtual_blocks,
        },
    })
}

/// Loads and validates the config file, or returns the defaults when none is given.
pub fn load_emit_config(path: Option<&str>) -> Result<EmitConfig, String> {
    match path {
        Some(p) => resolve_config(load_config(p)?),
        None => resolve_config(RawEmitConfig::default()),
    }
}
