//! Schema migration framework.

use crate::ProjectError;
use crate::scenario::Scenario;
use crate::schema::Site;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut site: Site) -> Result<Site, ProjectError> {
    if site.version > LATEST_VERSION {
        return Err(ProjectError::Migration {
            what: format!(
                "Site version {} is newer than supported version {}",
                site.version, LATEST_VERSION
            ),
        });
    }
    while site.version < LATEST_VERSION {
        site = migrate_one_version(site)?;
    }
    Ok(site)
}

fn migrate_one_version(site: Site) -> Result<Site, ProjectError> {
    match site.version {
        0 => migrate_v0_to_v1(site),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// v0 chambers could omit `id`; derive it from the name.
fn migrate_v0_to_v1(mut site: Site) -> Result<Site, ProjectError> {
    for chamber in &mut site.chambers {
        if chamber.id.trim().is_empty() {
            chamber.id = chamber.name.trim().to_ascii_lowercase().replace(' ', "_");
        }
    }
    site.version = 1;
    Ok(site)
}

pub fn migrate_scenario_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => {
            scenario.version = 1;
            Ok(scenario)
        }
        v if v <= LATEST_VERSION => Ok(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from scenario version {}", v),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChamberDef, TuningDef};

    #[test]
    fn v0_fills_blank_ids() {
        let site = Site {
            version: 0,
            name: "old".to_string(),
            chambers: vec![ChamberDef {
                id: String::new(),
                name: "Cold Room 2".to_string(),
                description: None,
                humidifier_installed: false,
                default_target: None,
                tuning: TuningDef::default(),
            }],
        };
        let site = migrate_to_latest(site).unwrap();
        assert_eq!(site.version, LATEST_VERSION);
        assert_eq!(site.chambers[0].id, "cold_room_2");
    }

    #[test]
    fn latest_is_untouched() {
        let site = Site {
            version: LATEST_VERSION,
            name: "s".to_string(),
            chambers: vec![],
        };
        assert_eq!(migrate_to_latest(site.clone()).unwrap(), site);
    }

    #[test]
    fn newer_site_is_rejected() {
        let site = Site {
            version: LATEST_VERSION + 1,
            name: "future".to_string(),
            chambers: vec![],
        };
        assert!(matches!(
            migrate_to_latest(site),
            Err(ProjectError::Migration { .. })
        ));
    }

    #[test]
    fn newer_scenario_is_rejected() {
        let scenario = Scenario {
            version: LATEST_VERSION + 1,
            name: "future".to_string(),
            ticks: vec![],
        };
        assert!(migrate_scenario_to_latest(scenario).is_err());
    }
}
