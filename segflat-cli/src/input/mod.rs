//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::resolve_patterns;

use anyhow::{Context, Result};
use segflat_core::fixture::load_fixtures;
use segflat_core::Fixture;

/// Load every fixture from files matching the given patterns
pub fn load_fixture_files(patterns: &[String]) -> Result<Vec<Fixture>> {
    let mut fixtures = Vec::new();
    for path in resolve_patterns(patterns)? {
        let loaded = load_fixtures(&path)
            .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
        log::info!("{}: {} fixtures", path.display(), loaded.len());
        fixtures.extend(loaded);
    }
    Ok(fixtures)
}
