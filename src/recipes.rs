//! Recipe records and the lookup from an engine row back to a recipe.

use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{Match, RecommendEngine};
use crate::error::{Error, Result};

/// Headers a recipe file must carry. `ImageURL` is optional.
pub const REQUIRED_COLUMNS: [&str; 2] = ["RecipeName", "Ingredients"];

/// One row of the recipe file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "RecipeName")]
    pub name: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "ImageURL", default)]
    pub image_url: Option<String>,
}

/// Read recipes from CSV, keeping file order
pub fn read_recipes<R: Read>(reader: R) -> Result<Vec<Recipe>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column));
        }
    }
    let recipes = rdr.deserialize().collect::<std::result::Result<Vec<Recipe>, _>>()?;
    Ok(recipes)
}

pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let file = File::open(path.as_ref())?;
    let recipes = read_recipes(BufReader::new(file))?;
    tracing::info!(path = %path.as_ref().display(), recipes = recipes.len(), "recipes loaded");
    Ok(recipes)
}

/// 画像パスの正規化
/// Normalize an image reference from the recipe file.
///
/// Backslashes become `/`. URLs and paths already under `image_root/` or
/// `images/` are kept; anything else is re-rooted as
/// `image_root/<file name>`.
pub fn clean_image_path(raw: &str, image_root: &str) -> String {
    let path = raw.trim().replace('\\', "/");
    let root_prefix = format!("{}/", image_root.trim_end_matches('/'));
    if path.starts_with("http") || path.starts_with(&root_prefix) || path.starts_with("images/") {
        return path;
    }
    let file_name = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path.as_str(),
    };
    format!("{root_prefix}{file_name}")
}

/// Where a recipe's picture can be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Remote(String),
    Local(PathBuf),
    /// a local path that does not exist
    NotFound(PathBuf),
    Missing,
}

impl ImageRef {
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => ImageRef::Missing,
            Some(url) if url.starts_with("http") => ImageRef::Remote(url.to_string()),
            Some(path) => {
                let path = PathBuf::from(path);
                if path.exists() {
                    ImageRef::Local(path)
                } else {
                    ImageRef::NotFound(path)
                }
            }
        }
    }
}

/// Recipes plus the engine fitted on their ingredients.
/// Engine ids are row numbers into `recipes`.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    engine: RecommendEngine<usize>,
}

/// A recipe picked for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    /// engine answer; `id` equals `row`
    #[serde(flatten)]
    pub hit: Match<usize>,
}

impl RecipeBook {
    /// Fit a new engine over the ingredients of `recipes`.
    /// Image references are normalized against `image_root` first.
    pub fn new(recipes: Vec<Recipe>, image_root: &str) -> Result<Self> {
        let recipes = normalize_images(recipes, image_root);
        let engine = RecommendEngine::fit(
            recipes
                .iter()
                .enumerate()
                .map(|(row, recipe)| (row, recipe.ingredients.as_str())),
        )?;
        Ok(RecipeBook { recipes, engine })
    }

    /// Pair `recipes` with an engine fitted earlier on the same data
    pub fn with_engine(
        recipes: Vec<Recipe>,
        image_root: &str,
        engine: RecommendEngine<usize>,
    ) -> Result<Self> {
        let ids_line_up = engine.len() == recipes.len()
            && engine.ids().iter().enumerate().all(|(row, id)| row == *id);
        if !ids_line_up {
            return Err(Error::CorruptSnapshot(format!(
                "engine has {} rows for {} recipes",
                engine.len(),
                recipes.len()
            )));
        }
        Ok(RecipeBook {
            recipes: normalize_images(recipes, image_root),
            engine,
        })
    }

    /// Recipe for `query`, `None` when the query is blank
    pub fn recommend(&self, query: &str) -> Result<Option<Recommendation<'_>>> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        let hit = self.engine.query(query)?;
        let recipe = self
            .recipes
            .get(hit.id)
            .ok_or_else(|| Error::CorruptSnapshot(format!("no recipe at row {}", hit.id)))?;
        Ok(Some(Recommendation { recipe, hit }))
    }

    #[inline]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[inline]
    pub fn engine(&self) -> &RecommendEngine<usize> {
        &self.engine
    }
}

/// Fingerprint of the ingredient texts, stored with engine snapshots
pub fn fingerprint(recipes: &[Recipe]) -> u64 {
    let mut hasher = DefaultHasher::new();
    recipes.len().hash(&mut hasher);
    for recipe in recipes {
        recipe.ingredients.hash(&mut hasher);
    }
    hasher.finish()
}

fn normalize_images(mut recipes: Vec<Recipe>, image_root: &str) -> Vec<Recipe> {
    for recipe in &mut recipes {
        recipe.image_url = recipe
            .image_url
            .take()
            .filter(|url| !url.trim().is_empty())
            .map(|url| clean_image_path(&url, image_root));
    }
    recipes
}
