use crate::{
    error::ConfigError,
    responsive::{Behavior, GridBreakpoints},
    unit::DEFAULT_UNIT,
};

/// Options shared by compositions and media queries.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Unit appended to bare numbers, `px` by default.
    pub default_unit: String,
    pub breakpoints: GridBreakpoints,
    /// Behavior of breakpoint-suffixed template props without an explicit
    /// `Up`/`Down`/`Only` suffix.
    pub default_behavior: Behavior,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            default_unit: DEFAULT_UNIT.to_string(),
            breakpoints: GridBreakpoints::default(),
            default_behavior: Behavior::Up,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_unit(mut self, unit: impl Into<String>) -> Result<Self, ConfigError> {
        let unit = unit.into();
        if unit.is_empty() {
            return Err(ConfigError::EmptyUnit);
        }
        self.default_unit = unit;
        Ok(self)
    }

    pub fn breakpoints(mut self, breakpoints: GridBreakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn default_behavior(mut self, behavior: Behavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    /// Read options from JSON. Every field is optional:
    ///
    /// ```json
    /// { "defaultUnit": "rem", "defaultBehavior": "down",
    ///   "breakpoints": { "sm": 480, "md": 768, "lg": 1024, "xl": 1440, "xxl": 1920 } }
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawOptions = serde_json::from_str(json)?;
        let mut options = LayoutOptions::default();
        if let Some(unit) = raw.default_unit {
            options = options.default_unit(unit)?;
        }
        if let Some(widths) = raw.breakpoints {
            options.breakpoints =
                GridBreakpoints::new(widths.sm, widths.md, widths.lg, widths.xl, widths.xxl)?;
        }
        if let Some(behavior) = raw.default_behavior {
            options.default_behavior = behavior;
        }
        Ok(options)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawOptions {
    default_unit: Option<String>,
    breakpoints: Option<BreakpointWidths>,
    default_behavior: Option<Behavior>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BreakpointWidths {
    sm: f64,
    md: f64,
    lg: f64,
    xl: f64,
    xxl: f64,
}
