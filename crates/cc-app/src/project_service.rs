//! Site loading, saving, validation, and introspection.

use std::path::Path;

use cc_project::{ChamberDef, Scenario, Site};

use crate::error::{AppError, AppResult};
use crate::runtime_compile::compile_chamber;

/// Summary of a chamber for listing.
#[derive(Debug, Clone)]
pub struct ChamberSummary {
    pub id: String,
    pub name: String,
    pub humidifier_installed: bool,
    /// Default setpoint (°C, %RH) if the site gives one.
    pub default_target: Option<(f64, f64)>,
    pub tick_interval_s: u32,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Load a site file (YAML, or JSON by extension), migrated to the latest
/// schema.
pub fn load_site(path: &Path) -> AppResult<Site> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let site: Site = if is_json(path) {
        serde_json::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse site JSON: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse site YAML: {}", e)))?
    };

    Ok(cc_project::migrate_to_latest(site)?)
}

/// Save a site to a YAML file.
pub fn save_site(path: &Path, site: &Site) -> AppResult<()> {
    let content = serde_yaml::to_string(site)
        .map_err(|e| AppError::Project(format!("Failed to serialize site: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Field checks plus a trial compile of every chamber, so band-ordering
/// mistakes surface before a controller is started.
pub fn validate_site(site: &Site) -> AppResult<()> {
    if site.chambers.is_empty() {
        return Err(AppError::Validation(
            "Site must have at least one chamber".to_string(),
        ));
    }
    cc_project::validate_site(site)?;
    for chamber in &site.chambers {
        compile_chamber(chamber)
            .map_err(|e| AppError::Validation(format!("Chamber '{}': {}", chamber.id, e)))?;
    }
    Ok(())
}

/// List all chambers in the site with summaries.
pub fn list_chambers(site: &Site) -> Vec<ChamberSummary> {
    site.chambers
        .iter()
        .map(|chamber| ChamberSummary {
            id: chamber.id.clone(),
            name: chamber.name.clone(),
            humidifier_installed: chamber.humidifier_installed,
            default_target: chamber.default_target.map(|t| (t.temp_c, t.rh_percent)),
            tick_interval_s: chamber
                .tuning
                .tick_interval_s
                .unwrap_or(cc_controls::ControllerConfig::default().tick_interval_s),
        })
        .collect()
}

/// Get a specific chamber by ID.
pub fn get_chamber<'a>(site: &'a Site, chamber_id: &str) -> AppResult<&'a ChamberDef> {
    site.chamber(chamber_id)
        .ok_or_else(|| AppError::ChamberNotFound(chamber_id.to_string()))
}

/// Load and validate a scenario file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "scenario file not found"),
        });
    }
    Ok(cc_project::load_scenario_yaml(path)?)
}
