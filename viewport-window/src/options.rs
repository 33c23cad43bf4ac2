use crate::error::ConfigError;

pub const DEFAULT_ROW_HEIGHT: u32 = 40;
pub const DEFAULT_BUFFER_SIZE: usize = 10;

/// Configuration for [`crate::WindowManager`].
///
/// Values built in Rust are unsigned, so the only invalid state is a zero `row_height`.
/// [`WindowOptions::validated`] replaces it with the default before the manager ever divides
/// by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    /// Fixed height of every row, in pixels.
    pub row_height: u32,
    /// Rows materialized beyond each edge of the strictly visible range.
    pub buffer_size: usize,
    /// When `false`, every row is materialized once and scrolling never re-ranges.
    pub virtual_scrolling_enabled: bool,
    /// Enables/disables the window. When disabled, nothing is materialized.
    pub enabled: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            virtual_scrolling_enabled: true,
            enabled: false,
        }
    }
}

impl WindowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_virtual_scrolling(mut self, enabled: bool) -> Self {
        self.virtual_scrolling_enabled = enabled;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns a copy that is safe to range with, falling back to defaults for invalid fields.
    pub fn validated(mut self) -> Self {
        if self.row_height == 0 {
            wwarn!(
                fallback = DEFAULT_ROW_HEIGHT,
                "WindowOptions: row_height must be positive, using default"
            );
            self.row_height = DEFAULT_ROW_HEIGHT;
        }
        self
    }

    /// Strict conversion from a raw [`WindowConfig`].
    pub fn try_from_config(config: &WindowConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            row_height: match config.row_height {
                None => defaults.row_height,
                Some(h) => parse_row_height(h)?,
            },
            buffer_size: match config.buffer_size {
                None => defaults.buffer_size,
                Some(b) => parse_buffer_size(b)?,
            },
            virtual_scrolling_enabled: config
                .virtual_scrolling_enabled
                .unwrap_or(defaults.virtual_scrolling_enabled),
            enabled: config.enabled.unwrap_or(defaults.enabled),
        })
    }

    /// Lenient conversion from a raw [`WindowConfig`].
    ///
    /// Each invalid field is replaced by its default and a warning is logged; valid fields are
    /// kept.
    pub fn from_config(config: &WindowConfig) -> Self {
        let defaults = Self::default();
        let row_height = match config.row_height.map(parse_row_height) {
            None => defaults.row_height,
            Some(Ok(h)) => h,
            Some(Err(_err)) => {
                wwarn!(error = %_err, fallback = DEFAULT_ROW_HEIGHT, "rejected rowHeight");
                defaults.row_height
            }
        };
        let buffer_size = match config.buffer_size.map(parse_buffer_size) {
            None => defaults.buffer_size,
            Some(Ok(b)) => b,
            Some(Err(_err)) => {
                wwarn!(error = %_err, fallback = DEFAULT_BUFFER_SIZE, "rejected bufferSize");
                defaults.buffer_size
            }
        };
        Self {
            row_height,
            buffer_size,
            virtual_scrolling_enabled: config
                .virtual_scrolling_enabled
                .unwrap_or(defaults.virtual_scrolling_enabled),
            enabled: config.enabled.unwrap_or(defaults.enabled),
        }
    }
}

fn parse_row_height(value: i64) -> Result<u32, ConfigError> {
    match u32::try_from(value) {
        Ok(h) if h > 0 => Ok(h),
        _ => Err(ConfigError::InvalidRowHeight(value)),
    }
}

fn parse_buffer_size(value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeBufferSize(value))
}

/// Raw, host-facing configuration as it arrives from grid options.
///
/// Every field is optional and signed so that bad input can be reported instead of failing to
/// parse. With `feature = "serde"` the keys are camelCase (`rowHeight`, `bufferSize`,
/// `virtualScrollingEnabled`, `enabled`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct WindowConfig {
    pub row_height: Option<i64>,
    pub buffer_size: Option<i64>,
    pub virtual_scrolling_enabled: Option<bool>,
    pub enabled: Option<bool>,
}
