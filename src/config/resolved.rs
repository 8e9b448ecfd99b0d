#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
}

impl QuoteStyle {
    pub fn char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

/// Which preprocessing transforms run before emission. Lints always run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassConfig {
    pub inline_calls: bool,
    pub strip_dead_code: bool,
    pub flatten_virtual_blocks: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        PassConfig {
            inline_calls: true,
            strip_dead_code: true,
            flatten_virtual_blocks: false,
        }
    }
}

/// Validated emitter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// One indentation level, e.g. four spaces or a tab.
    pub indent: String,
    pub quote: QuoteStyle,
    pub trailing_newline: bool,
    pub fail_on_lint: bool,
    pub passes: PassConfig,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            indent: "    ".to_string(),
            quote: QuoteStyle::Double,
            trailing_newline: true,
            fail_on_lint: true,
            passes: PassConfig::default(),
        }
    }
}
