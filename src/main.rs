use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recipe_recommender::{
    config::Config,
    recipes::{self, ImageRef, Recipe, RecipeBook, Recommendation},
    RecommendEngine, Result,
};

fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_data_error() => {
            eprintln!("error: {err} (fix {})", config.recipes.display());
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// logs go to stderr, results to stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let recipes = recipes::load_recipes(&config.recipes)?;
    let book = build_book(config, recipes)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(query) = config.inline_query() {
        return answer(&book, &query, config, &mut out);
    }
    for line in io::stdin().lock().lines() {
        answer(&book, &line?, config, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

/// Fit the engine, or reuse a snapshot fitted on the same ingredients
fn build_book(config: &Config, recipes: Vec<Recipe>) -> Result<RecipeBook> {
    let Some(path) = &config.snapshot else {
        return RecipeBook::new(recipes, &config.image_root);
    };
    let fingerprint = recipes::fingerprint(&recipes);
    if path.exists() {
        match RecommendEngine::<usize>::load(path) {
            Ok((engine, saved)) if saved == fingerprint => {
                tracing::info!(path = %path.display(), "engine loaded from snapshot");
                return RecipeBook::with_engine(recipes, &config.image_root, engine);
            }
            Ok(_) => tracing::warn!(path = %path.display(), "snapshot is stale, refitting"),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "snapshot unusable, refitting"),
        }
    }
    let book = RecipeBook::new(recipes, &config.image_root)?;
    if let Err(err) = book.engine().save(path, fingerprint) {
        tracing::warn!(path = %path.display(), error = %err, "snapshot not written");
    }
    Ok(book)
}

fn answer<W: Write>(book: &RecipeBook, query: &str, config: &Config, out: &mut W) -> Result<()> {
    let recommendation = book
        .recommend(query)?
        .filter(|rec| rec.hit.score > config.min_score);

    if config.json {
        let value = serde_json::json!({
            "query": query.trim(),
            "recommendation": recommendation,
        });
        serde_json::to_writer(&mut *out, &value).map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    match recommendation {
        Some(rec) => render(&rec, out)?,
        None if query.trim().is_empty() => writeln!(out, "Please enter some ingredients.")?,
        None => writeln!(out, "No close match for \"{}\".", query.trim())?,
    }
    Ok(())
}

fn render<W: Write>(rec: &Recommendation<'_>, out: &mut W) -> io::Result<()> {
    writeln!(out, "Recipe: {} (similarity {:.3})", rec.recipe.name, rec.hit.score)?;
    writeln!(out, "Ingredients: {}", rec.recipe.ingredients)?;
    match ImageRef::resolve(rec.recipe.image_url.as_deref()) {
        ImageRef::Remote(url) => writeln!(out, "Image: {url}"),
        ImageRef::Local(path) => writeln!(out, "Image: {}", path.display()),
        ImageRef::NotFound(path) => writeln!(out, "Image not found: {}", path.display()),
        ImageRef::Missing => writeln!(out, "No image available for this recipe."),
    }
}
