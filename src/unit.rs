use std::{borrow::Cow, fmt};

/// Unit appended to bare numeric values when nothing else is configured.
pub const DEFAULT_UNIT: &str = "px";

/// A value as written by the user: either a bare number or free-form text.
///
/// Numbers are magnitudes that still need a unit (`750` becomes `750px`),
/// text is passed through untouched unless it is itself a bare number.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Render the value, appending `unit` to bare magnitudes.
    ///
    /// Only values whose text starts with a digit are candidates, so
    /// expressions like `calc(100% - 2rem)` are never touched.
    pub fn resolve(&self, unit: &str) -> String {
        match self {
            Value::Number(n) => {
                let text = n.to_string();
                // Negative and non-finite numbers are not magnitudes.
                if text.starts_with(|c: char| c.is_ascii_digit()) {
                    text + unit
                } else {
                    text
                }
            }
            Value::Text(text) => transform_numeric(text, unit).into_owned(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Append `unit` to `value` if it is a bare magnitude such as `"750"` or `"1.5"`.
///
/// Anything that already carries a unit, or does not start with a digit,
/// is returned as-is.
pub fn transform_numeric<'a>(value: &'a str, unit: &str) -> Cow<'a, str> {
    if is_bare_number(value) {
        Cow::Owned(format!("{value}{unit}"))
    } else {
        Cow::Borrowed(value)
    }
}

fn is_bare_number(value: &str) -> bool {
    let starts_with_digit = value.chars().next().is_some_and(|c| c.is_ascii_digit());
    starts_with_digit
        && value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.parse::<f64>().is_ok()
}

/// Convert a camelCase property name into its dashed form.
///
/// `minWidth` becomes `min-width`; names that are already dashed are kept.
pub(crate) fn dashed(name: &str) -> Cow<'_, str> {
    if !name.chars().any(|c| c.is_ascii_uppercase()) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::{Value, dashed, transform_numeric};

    #[test]
    fn numbers_get_unit() {
        assert_eq!(Value::from(750).resolve("px"), "750px");
        assert_eq!(Value::from(1.5).resolve("rem"), "1.5rem");
        assert_eq!(Value::from(0).resolve("px"), "0px");
    }

    #[test]
    fn negative_and_non_finite_numbers_stay_bare() {
        assert_eq!(Value::from(-5).resolve("px"), "-5");
        assert_eq!(Value::from(-0.5).resolve("px"), "-0.5");
        assert_eq!(Value::from(f64::NAN).resolve("px"), "NaN");
        assert_eq!(Value::from(f64::INFINITY).resolve("px"), "inf");
    }

    #[test]
    fn numeric_text_gets_unit() {
        assert_eq!(transform_numeric("750", "px"), "750px");
        assert_eq!(transform_numeric("12.5", "em"), "12.5em");
    }

    #[test]
    fn text_with_unit_passes_through() {
        assert_eq!(transform_numeric("750px", "px"), "750px");
        assert_eq!(transform_numeric("2dppx", "px"), "2dppx");
        assert_eq!(transform_numeric("calc(100% - 10px)", "px"), "calc(100% - 10px)");
        assert_eq!(transform_numeric("landscape", "px"), "landscape");
        assert_eq!(transform_numeric(".5", "px"), ".5");
        assert_eq!(transform_numeric("", "px"), "");
    }

    #[test]
    fn dashed_names() {
        assert_eq!(dashed("minWidth"), "min-width");
        assert_eq!(dashed("maxDeviceAspectRatio"), "max-device-aspect-ratio");
        assert_eq!(dashed("orientation"), "orientation");
        assert_eq!(dashed("min-width"), "min-width");
    }
}
