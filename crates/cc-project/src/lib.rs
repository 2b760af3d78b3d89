//! cc-project: site and scenario file formats and validation.

pub mod migrate;
pub mod scenario;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_scenario_to_latest, migrate_to_latest};
pub use scenario::*;
pub use schema::*;
pub use validate::{ValidationError, validate_scenario, validate_site};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Site> {
    let content = std::fs::read_to_string(path)?;
    let mut site: Site = serde_yaml::from_str(&content)?;
    site = migrate_to_latest(site)?;
    validate_site(&site)?;
    Ok(site)
}

pub fn save_yaml(path: &std::path::Path, site: &Site) -> ProjectResult<()> {
    validate_site(site)?;
    let content = serde_yaml::to_string(site)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Site> {
    let content = std::fs::read_to_string(path)?;
    let mut site: Site = serde_json::from_str(&content)?;
    site = migrate_to_latest(site)?;
    validate_site(&site)?;
    Ok(site)
}

pub fn save_json(path: &std::path::Path, site: &Site) -> ProjectResult<()> {
    validate_site(site)?;
    let content = serde_json::to_string_pretty(site)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_scenario_yaml(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let mut scenario: Scenario = serde_yaml::from_str(&content)?;
    scenario = migrate_scenario_to_latest(scenario)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_scenario_yaml(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}
