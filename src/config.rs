//! Chart profiles.
//! One parameterized pipeline, several presets: layout policy, glyph style,
//! color law and size range are all chosen here.

use crate::charts::{Color, ColorScheme, GlyphStyle};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum LayoutConfig {
    /// Row-major grid of fixed cells, `columns` per row.
    Grid {
        columns: usize,
        cell_size: f64,
        padding: f64,
    },
    /// Debut year on x, durability on y, inset by `padding` on every side.
    Scatter { padding: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub min: f64,
    pub max: f64,
    /// Start the durability domain at zero instead of the observed minimum.
    #[serde(default)]
    pub zero_baseline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub layout: LayoutConfig,
    pub glyphs: GlyphStyle,
    pub color: ColorScheme,
    pub size: SizeConfig,
    /// Fill for items whose debut year did not parse.
    #[serde(default = "default_unknown_color")]
    pub unknown_color: Color,
    /// Gap between the bottom of a glyph and its label.
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,
}

fn default_unknown_color() -> Color {
    Color::GRAY
}

fn default_label_offset() -> f64 {
    12.0
}

const WARM_LIGHT: Color = Color::rgb(253, 224, 197);
const WARM_DARK: Color = Color::rgb(122, 31, 12);

impl Default for ChartConfig {
    fn default() -> Self {
        Self::grid()
    }
}

impl ChartConfig {
    /// Twelve-column grid, geometric glyphs, viridis by debut year.
    pub fn grid() -> Self {
        Self {
            name: "grid".to_string(),
            width: 1000.0,
            height: 700.0,
            layout: LayoutConfig::Grid {
                columns: 12,
                cell_size: 80.0,
                padding: 40.0,
            },
            glyphs: GlyphStyle::Geometric {
                triangle_factor: 1.8,
            },
            color: ColorScheme::Viridis,
            size: SizeConfig {
                min: 6.0,
                max: 28.0,
                zero_baseline: false,
            },
            unknown_color: default_unknown_color(),
            label_offset: default_label_offset(),
        }
    }

    pub fn grid_gradient() -> Self {
        Self {
            name: "grid-gradient".to_string(),
            glyphs: GlyphStyle::Geometric {
                triangle_factor: 1.6,
            },
            color: ColorScheme::Gradient {
                from: WARM_LIGHT,
                to: WARM_DARK,
            },
            ..Self::grid()
        }
    }

    pub fn grid_silhouette() -> Self {
        Self {
            name: "grid-silhouette".to_string(),
            layout: LayoutConfig::Grid {
                columns: 10,
                cell_size: 90.0,
                padding: 50.0,
            },
            glyphs: GlyphStyle::Silhouette {
                reference_size: 12.0,
            },
            size: SizeConfig {
                min: 8.0,
                max: 30.0,
                zero_baseline: false,
            },
            ..Self::grid()
        }
    }

    pub fn scatter() -> Self {
        Self {
            name: "scatter".to_string(),
            width: 1000.0,
            height: 700.0,
            layout: LayoutConfig::Scatter { padding: 60.0 },
            glyphs: GlyphStyle::Geometric {
                triangle_factor: 1.7,
            },
            color: ColorScheme::Viridis,
            size: SizeConfig {
                min: 4.0,
                max: 20.0,
                zero_baseline: false,
            },
            unknown_color: default_unknown_color(),
            label_offset: default_label_offset(),
        }
    }

    pub fn scatter_silhouette() -> Self {
        Self {
            name: "scatter-silhouette".to_string(),
            glyphs: GlyphStyle::Silhouette {
                reference_size: 12.0,
            },
            color: ColorScheme::Gradient {
                from: WARM_LIGHT,
                to: WARM_DARK,
            },
            size: SizeConfig {
                min: 6.0,
                max: 22.0,
                zero_baseline: false,
            },
            ..Self::scatter()
        }
    }

    /// All built-in profiles, the reference grid first.
    pub fn profiles() -> Vec<Self> {
        vec![
            Self::grid(),
            Self::grid_gradient(),
            Self::grid_silhouette(),
            Self::scatter(),
            Self::scatter_silhouette(),
        ]
    }

    pub fn profile(name: &str) -> Option<Self> {
        Self::profiles().into_iter().find(|p| p.name == name)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.size.min >= 0.0 && self.size.min <= self.size.max) {
            return Err(ConfigError::Invalid(format!(
                "size range [{}, {}] must be non-negative and ordered",
                self.size.min, self.size.max
            )));
        }
        match self.layout {
            LayoutConfig::Grid {
                columns, cell_size, ..
            } => {
                if columns == 0 {
                    return Err(ConfigError::Invalid("grid needs at least one column".into()));
                }
                if cell_size <= 0.0 {
                    return Err(ConfigError::Invalid("grid cell size must be positive".into()));
                }
            }
            LayoutConfig::Scatter { padding } => {
                if padding * 2.0 >= self.width.min(self.height) {
                    return Err(ConfigError::Invalid(format!(
                        "scatter padding {} leaves no plot area",
                        padding
                    )));
                }
            }
        }
        if let GlyphStyle::Silhouette { reference_size } = self.glyphs {
            if reference_size <= 0.0 {
                return Err(ConfigError::Invalid(
                    "silhouette reference size must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_profiles_are_valid_and_unique() {
        let profiles = ChartConfig::profiles();
        assert_eq!(profiles.len(), 5);
        for profile in &profiles {
            profile.validate().unwrap();
        }
        let mut names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn json_round_trip_through_file() {
        let profile = ChartConfig::scatter_silhouette();
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), profile.to_json_string().unwrap()).unwrap();

        let loaded = ChartConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let json = r#"{
            "name": "custom",
            "width": 800, "height": 600,
            "layout": { "mode": "grid", "columns": 8, "cell_size": 70, "padding": 30 },
            "glyphs": { "style": "geometric", "triangle_factor": 1.6 },
            "color": { "scheme": "viridis" },
            "size": { "min": 5, "max": 25 }
        }"#;
        let config = ChartConfig::from_json_str(json).unwrap();
        assert_eq!(config.unknown_color, Color::GRAY);
        assert_eq!(config.label_offset, 12.0);
        assert!(!config.size.zero_baseline);
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let mut config = ChartConfig::grid();
        config.layout = LayoutConfig::Grid {
            columns: 0,
            cell_size: 80.0,
            padding: 40.0,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ChartConfig::grid();
        config.size.min = 30.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let bad_json = ChartConfig::from_json_str("{ not json");
        assert!(matches!(bad_json, Err(ConfigError::Json(_))));
    }
}
