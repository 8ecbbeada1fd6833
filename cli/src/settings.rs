use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use sweeper_core::BoardConfig;

/// Mine fraction used when only the board size is given.
pub const DEFAULT_DENSITY: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for BoardConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => BoardConfig::beginner(),
            Preset::Intermediate => BoardConfig::intermediate(),
            Preset::Expert => BoardConfig::expert(),
        }
    }
}

/// Board options collected from the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardOptions {
    pub preset: Option<Preset>,
    pub width: Option<u8>,
    pub height: Option<u8>,
    pub mines: Option<u16>,
    pub density: Option<f64>,
}

/// Loads a board config from a TOML file with `width`, `height` and `mines` keys.
pub fn load(path: &Path) -> anyhow::Result<BoardConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse(text: &str) -> anyhow::Result<BoardConfig> {
    let config: BoardConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Resolves the final config: file or preset first, then explicit overrides.
///
/// A new size without a mine count or density falls back to [`DEFAULT_DENSITY`].
pub fn resolve(base: Option<BoardConfig>, options: &BoardOptions) -> anyhow::Result<BoardConfig> {
    let base = base
        .or_else(|| options.preset.map(BoardConfig::from))
        .unwrap_or_default();
    let width = options.width.unwrap_or(base.width);
    let height = options.height.unwrap_or(base.height);
    let resized = width != base.width || height != base.height;

    let config = match (options.mines, options.density) {
        (Some(_), Some(_)) => anyhow::bail!("Give either a mine count or a density, not both"),
        (Some(mines), None) => BoardConfig::new(width, height, mines),
        (None, Some(density)) => BoardConfig::from_density(width, height, density),
        (None, None) if resized => BoardConfig::from_density(width, height, DEFAULT_DENSITY),
        (None, None) => BoardConfig::new(width, height, base.mines),
    };

    config.with_context(|| format!("Cannot play a {width}x{height} board with these settings"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_beginner() {
        let config = resolve(None, &BoardOptions::default()).unwrap();

        assert_eq!(config, BoardConfig::beginner());
    }

    #[test]
    fn preset_and_overrides() {
        let options = BoardOptions {
            preset: Some(Preset::Expert),
            mines: Some(50),
            ..Default::default()
        };

        let config = resolve(None, &options).unwrap();

        assert_eq!((config.width, config.height, config.mines), (30, 16, 50));
    }

    #[test]
    fn resizing_uses_default_density() {
        let options = BoardOptions {
            width: Some(20),
            height: Some(20),
            ..Default::default()
        };

        assert_eq!(resolve(None, &options).unwrap().mines, 40);
    }

    #[test]
    fn rejects_conflicting_or_invalid_options() {
        let both = BoardOptions {
            mines: Some(3),
            density: Some(0.2),
            ..Default::default()
        };
        let crowded = BoardOptions {
            width: Some(2),
            height: Some(2),
            mines: Some(4),
            ..Default::default()
        };

        assert!(resolve(None, &both).is_err());
        assert!(resolve(None, &crowded).is_err());
    }

    #[test]
    fn parses_toml_config() {
        let config = parse("width = 12\nheight = 8\nmines = 20\n").unwrap();

        assert_eq!(config, BoardConfig::new(12, 8, 20).unwrap());
        assert!(parse("width = 2\nheight = 2\nmines = 4\n").is_err());
        assert!(parse("width = 2\n").is_err());
    }

    #[test]
    fn file_config_wins_over_preset() {
        let file = BoardConfig::new(5, 5, 5).unwrap();
        let options = BoardOptions {
            preset: Some(Preset::Expert),
            ..Default::default()
        };

        assert_eq!(resolve(Some(file), &options).unwrap(), file);
    }
}
