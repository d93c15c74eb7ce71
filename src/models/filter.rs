use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Default near-black exclusion radius in J'a'b' units
pub const DEFAULT_BLACK_THRESHOLD: f32 = 35.0;

/// Inclusive numeric interval used by the lightness, chroma and hue filters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Hue membership. A range with `min > max` wraps through 0°.
    pub fn contains_hue(&self, hue: f64) -> bool {
        if self.min <= self.max {
            self.contains(hue)
        } else {
            hue >= self.min || hue <= self.max
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// Parses `MIN,MAX` as given on the command line
impl FromStr for Range {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || ConfigError::RangeSyntax(s.to_string());

        let (min, max) = s.split_once(',').ok_or_else(syntax)?;
        let min: f64 = min.trim().parse().map_err(|_| syntax())?;
        let max: f64 = max.trim().parse().map_err(|_| syntax())?;
        if !min.is_finite() || !max.is_finite() {
            return Err(syntax());
        }
        Ok(Range::new(min, max))
    }
}

/// Gamut restrictions applied to the color table before palette selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// CIECAM02 lightness J
    pub lightness: Option<Range>,
    /// CIECAM02 chroma C
    pub chroma: Option<Range>,
    /// Hue angle in degrees
    pub hue: Option<Range>,
    /// Drop colors within `black_threshold` of black
    pub no_black: bool,
    pub black_threshold: f32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            lightness: None,
            chroma: None,
            hue: None,
            no_black: false,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
        }
    }
}

impl FilterSpec {
    /// True when at least one polar (JCh) restriction is set
    pub fn has_polar_filter(&self) -> bool {
        self.lightness.is_some() || self.chroma.is_some() || self.hue.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_polar_filter() && !self.no_black
    }

    /// Check range ordering and bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(range) = self.lightness {
            check_ordered("lightness", range)?;
        }
        if let Some(range) = self.chroma {
            check_ordered("chroma", range)?;
        }
        if let Some(range) = self.hue {
            // min > max is a wraparound request, only the endpoints are checked
            let in_circle = |v: f64| (0.0..=360.0).contains(&v);
            if !in_circle(range.min) || !in_circle(range.max) {
                return Err(ConfigError::InvalidRange {
                    name: "hue",
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if !(self.black_threshold >= 0.0 && self.black_threshold.is_finite()) {
            return Err(ConfigError::InvalidBlackThreshold(self.black_threshold));
        }
        Ok(())
    }
}

fn check_ordered(name: &'static str, range: Range) -> Result<(), ConfigError> {
    if range.min < 0.0 || range.min > range.max {
        return Err(ConfigError::InvalidRange {
            name,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}
