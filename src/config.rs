use std::path::PathBuf;

use clap::Parser;

/// Recommend a recipe from the ingredients you have.
#[derive(Debug, Clone, Parser)]
#[command(name = "recipe-recommender", version, about)]
pub struct Config {
    /// Recipe CSV with RecipeName, Ingredients and ImageURL columns
    #[arg(long, env = "RECIPES_CSV", default_value = "recipes_big.csv")]
    pub recipes: PathBuf,

    /// Directory that relative image paths are re-rooted under
    #[arg(long, env = "RECIPES_IMAGE_ROOT", default_value = "project")]
    pub image_root: String,

    /// Load the fitted engine from this file when it matches the recipes,
    /// otherwise fit and write it here
    #[arg(long, env = "RECIPES_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Scores at or below this are reported as "no close match"
    #[arg(long, default_value_t = 0.0, value_parser = parse_score)]
    pub min_score: f64,

    /// Print each recommendation as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Ingredients to search for; reads one query per line from stdin when omitted
    pub query: Vec<String>,
}

impl Config {
    /// Query given on the command line, if any
    pub fn inline_query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

fn parse_score(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("`{s}` is outside 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["recipe-recommender"]).unwrap();
        assert_eq!(config.image_root, "project");
        assert_eq!(config.min_score, 0.0);
        assert!(!config.json);
        assert!(config.snapshot.is_none());
        assert_eq!(config.inline_query(), None);
    }

    #[test]
    fn query_words_are_joined() {
        let config = Config::try_parse_from([
            "recipe-recommender",
            "--recipes",
            "data.csv",
            "--json",
            "tomato,",
            "onion",
        ])
        .unwrap();
        assert_eq!(config.recipes, PathBuf::from("data.csv"));
        assert!(config.json);
        assert_eq!(config.inline_query().as_deref(), Some("tomato, onion"));
    }

    #[test]
    fn min_score_must_be_a_similarity() {
        assert!(Config::try_parse_from(["recipe-recommender", "--min-score", "0.25"]).is_ok());
        assert!(Config::try_parse_from(["recipe-recommender", "--min-score", "1.5"]).is_err());
        assert!(Config::try_parse_from(["recipe-recommender", "--min-score", "high"]).is_err());
    }
}
