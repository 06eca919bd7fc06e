//! Option exercise style definitions.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Option exercise style.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any time up to expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// let style: ExerciseStyle = "american".parse().unwrap();
/// assert!(style.is_american());
/// assert_eq!(ExerciseStyle::default(), ExerciseStyle::European);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns true if this is European style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns true if this is American style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseStyle {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "us" => Ok(ExerciseStyle::American),
            other => Err(InstrumentError::InvalidParameter {
                message: format!(
                    "unsupported exercise style '{}': expected european or american",
                    other
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ExerciseStyle::European.is_european());
        assert!(!ExerciseStyle::European.is_american());
        assert!(ExerciseStyle::American.is_american());
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            "European".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::European
        );
        assert_eq!(
            " AMERICAN ".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "bermudan".parse::<ExerciseStyle>().unwrap_err();
        assert!(err.to_string().contains("bermudan"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for style in [ExerciseStyle::European, ExerciseStyle::American] {
            assert_eq!(style.to_string().parse::<ExerciseStyle>().unwrap(), style);
        }
    }
}
