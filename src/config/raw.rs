use serde::{Deserialize, Serialize};

pub fn default_indent_width() -> usize {
    4
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawQuote {
    #[default]
    Double,
    Single,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawPasses {
    #[serde(default = "default_true")]
    pub inline_calls: bool,
    #[serde(default = "default_true")]
    pub strip_dead_code: bool,
    #[serde(default)]
    pub flatten_virtual_blocks: bool,
}

impl Default for RawPasses {
    fn default() -> Self {
        RawPasses {
            inline_calls: true,
            strip_dead_code: true,
            flatten_virtual_blocks: false,
        }
    }
}

/// Emitter settings as written in the JSON config file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawEmitConfig {
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default)]
    pub use_tabs: bool,
    #[serde(default)]
    pub quote: RawQuote,
    #[serde(default = "default_true")]
    pub trailing_newline: bool,
    #[serde(default = "default_true")]
    pub fail_on_lint: bool,
    #[serde(default)]
    pub passes: RawPasses,
}

impl Default for RawEmitConfig {
    fn default() -> Self {
        RawEmitConfig {
            indent_width: default_indent_width(),
            use_tabs: false,
            quote: RawQuote::Double,
            trailing_newline: true,
            fail_on_lint: true,
            passes: RawPasses::default(),
        }
    }
}
