// Configuration module for reading Rules.toml
// Holds the game setup and rule settings used by the binaries

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::autopilot::Strategy;
use crate::settings::Settings;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub game: GameConfig,
    pub settings: SettingsConfig,
    pub autopilot: AutopilotConfig,
}

/// Board and participants for a locally driven game
#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub ruleset: String,
    pub width: i32,
    pub height: i32,
    pub snakes: Vec<String>,
    pub max_turns: u32,
    /// Fixed seed for reproducible games; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn snake_ids(&self) -> Vec<&str> {
        self.snakes.iter().map(String::as_str).collect()
    }
}

/// Rule values handed to every pipeline stage
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub food_spawn_chance: i32,
    pub minimum_food: i32,
    pub hazard_damage_per_turn: i32,
    pub snake_max_health: i32,
}

impl SettingsConfig {
    /// Builds rule settings drawing randomness from `seed`
    pub fn to_settings(&self, seed: u64) -> Settings {
        Settings::new(
            self.food_spawn_chance,
            self.minimum_food,
            self.hazard_damage_per_turn,
            self.snake_max_health,
        )
        .with_seed(seed)
    }
}

/// How computer-controlled snakes pick their moves
#[derive(Debug, Deserialize, Clone)]
pub struct AutopilotConfig {
    pub strategy: Strategy,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Rules.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Rules.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Rules.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Rules.toml
    pub fn default_hardcoded() -> Self {
        Config {
            game: GameConfig {
                ruleset: "standard".to_string(),
                width: 11,
                height: 11,
                snakes: vec![
                    "alpha".to_string(),
                    "beta".to_string(),
                    "gamma".to_string(),
                    "delta".to_string(),
                ],
                max_turns: 500,
                seed: None,
            },
            settings: SettingsConfig {
                food_spawn_chance: 15,
                minimum_food: 1,
                hazard_damage_per_turn: 14,
                snake_max_health: 100,
            },
            autopilot: AutopilotConfig {
                strategy: Strategy::Hungry,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Rules.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.game.ruleset, "standard");
        assert_eq!(config.game.snake_ids(), vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_rules_toml_can_be_parsed() {
        // This test ensures Rules.toml is valid and can be parsed
        let result = Config::from_file("Rules.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Rules.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Rules.toml").expect("Rules.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.game.ruleset, hardcoded_config.game.ruleset);
        assert_eq!(file_config.game.width, hardcoded_config.game.width);
        assert_eq!(file_config.game.height, hardcoded_config.game.height);
        assert_eq!(file_config.game.snakes, hardcoded_config.game.snakes);
        assert_eq!(file_config.game.max_turns, hardcoded_config.game.max_turns);

        assert_eq!(
            file_config.settings.food_spawn_chance,
            hardcoded_config.settings.food_spawn_chance
        );
        assert_eq!(
            file_config.settings.minimum_food,
            hardcoded_config.settings.minimum_food
        );
        assert_eq!(
            file_config.settings.hazard_damage_per_turn,
            hardcoded_config.settings.hazard_damage_per_turn
        );
        assert_eq!(
            file_config.settings.snake_max_health,
            hardcoded_config.settings.snake_max_health
        );
        assert_eq!(
            file_config.autopilot.strategy,
            hardcoded_config.autopilot.strategy
        );
    }

    #[test]
    fn test_settings_conversion() {
        let config = Config::default_hardcoded();
        let settings = config.settings.to_settings(5);
        assert_eq!(settings.food_spawn_chance, 15);
        assert_eq!(settings.snake_max_health, 100);
    }

    #[test]
    fn test_seed_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [game]
            ruleset = "wrapped"
            width = 7
            height = 7
            snakes = ["a", "b"]
            max_turns = 10
            seed = 99

            [settings]
            food_spawn_chance = 0
            minimum_food = 2
            hazard_damage_per_turn = 0
            snake_max_health = 100

            [autopilot]
            strategy = "random"
            "#,
        )
        .expect("inline config should parse");

        assert_eq!(config.game.seed, Some(99));
        assert_eq!(config.autopilot.strategy, Strategy::Random);
        assert_eq!(Config::default_hardcoded().game.seed, None);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        // Test with a non-existent file
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
