//! End-to-end tick scenarios for a single chamber.

use cc_controls::{
    ActuatorCommands, AirReading, ChamberController, ControlTarget, ControllerConfig,
    HumidityMode, ModeFlags, SleepCycleConfig, TickInput,
};

const TARGET: ControlTarget = ControlTarget::new(150, 750);

fn summer() -> ModeFlags {
    ModeFlags {
        summer_mode: true,
        ..ModeFlags::default()
    }
}

fn tick_input(chamber: (i32, i32), outdoor: (i32, i32), modes: ModeFlags, elapsed: u32) -> TickInput {
    TickInput {
        chamber: Some(AirReading::new(chamber.0, chamber.1)),
        supply: Some(AirReading::new(chamber.0 - 20, chamber.1)),
        outdoor: Some(AirReading::new(outdoor.0, outdoor.1)),
        target: TARGET,
        modes,
        elapsed_seconds: elapsed,
    }
}

fn controller() -> ChamberController {
    ChamberController::new(ControllerConfig::default()).unwrap()
}

#[test]
fn safe_init_boundary() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((170, 900), (250, 600), summer(), 31));
    assert_eq!(out.commands, ActuatorCommands::all_off());
    let requested = out.decision.unwrap().requested;
    assert!(requested.relay_cool);

    let out = ctl.tick(&tick_input((170, 900), (250, 600), summer(), 32));
    let decision = out.decision.unwrap();
    assert!(decision.init_complete);
    assert_eq!(out.commands, decision.requested);
}

#[test]
fn dehumidify_closes_bypass_and_uses_cold_water() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((170, 900), (250, 600), summer(), 60));
    let decision = out.decision.unwrap();
    assert_eq!(decision.chamber_humidity, HumidityMode::Humid);
    assert!(out.commands.relay_cool);
    assert!(out.commands.relay_dehumidify_water);
    assert!(!out.commands.relay_bypass_open);
}

#[test]
fn plain_cooling_opens_bypass() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((170, 650), (250, 600), summer(), 60));
    assert_eq!(out.decision.unwrap().chamber_humidity, HumidityMode::Fine);
    assert!(out.commands.relay_cool);
    assert!(out.commands.relay_bypass_open);
    assert!(!out.commands.relay_dehumidify_water);
}

#[test]
fn better_cold_than_dry_blocks_heating() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((130, 600), (250, 600), summer(), 60));
    let decision = out.decision.unwrap();
    assert_eq!(decision.chamber_humidity, HumidityMode::Dry);
    assert!(decision.chamber_temperature.heating);
    assert!(decision.demand.heating_blocked);
    assert!(!out.commands.relay_warm);
    assert!(!out.commands.relay_humidifier);
}

#[test]
fn heating_allowed_at_floor() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((105, 600), (250, 600), summer(), 60));
    let decision = out.decision.unwrap();
    assert_eq!(decision.chamber_humidity, HumidityMode::Dry);
    assert!(!decision.demand.heating_blocked);
    assert!(out.commands.relay_warm);
}

#[test]
fn humidifier_lifts_the_heating_block() {
    let mut ctl = controller();
    let modes = ModeFlags {
        humidifier_installed: true,
        ..summer()
    };
    let out = ctl.tick(&tick_input((130, 600), (250, 600), modes, 60));
    assert!(out.commands.relay_warm);
    assert!(out.commands.relay_humidifier);
}

#[test]
fn winter_economizer_replaces_water_cooling() {
    let mut ctl = controller();
    let out = ctl.tick(&TickInput {
        target: ControlTarget::new(100, 850),
        ..tick_input((120, 850), (0, 600), ModeFlags::default(), 60)
    });
    let decision = out.decision.unwrap();
    assert!(decision.economizer_beneficial);
    assert!(decision.chamber_temperature.cooling);
    assert!(out.commands.relay_outdoor_air_max);
    assert!(!out.commands.relay_cool);
    assert!(!out.commands.relay_main_fan);
    // Outside the AH deadzone: 100 - (120 - 100).
    assert!(!decision.inside_deadzone);
    assert_eq!(out.supply_target_raw, 80);
}

#[test]
fn humi_save_drives_auxiliary_outputs() {
    let mut ctl = controller();
    let modes = ModeFlags {
        humi_save_mode: true,
        ..ModeFlags::default()
    };
    let out = ctl.tick(&TickInput {
        target: ControlTarget::new(100, 850),
        ..tick_input((120, 850), (0, 600), modes, 60)
    });
    assert!(out.commands.relay_outdoor_air_save);
    assert!(out.commands.relay_recirculation);
    assert!(out.commands.relay_bypass_open);
    assert!(!out.commands.relay_outdoor_air_max);
}

#[test]
fn supply_target_inside_deadzone_blends_outdoor() {
    let mut ctl = controller();
    let out = ctl.tick(&tick_input((155, 750), (200, 600), summer(), 60));
    assert!(out.decision.unwrap().inside_deadzone);
    assert_eq!(out.supply_target_raw, 132);
}

#[test]
fn sleep_gates_relays_but_keeps_demand() {
    let config = ControllerConfig {
        sleep: SleepCycleConfig {
            action_time: 3,
            sleep_time: 2,
        },
        ..ControllerConfig::default()
    };
    let mut ctl = ChamberController::new(config).unwrap();
    let mut cool = Vec::new();
    for i in 0..6 {
        let out = ctl.tick(&tick_input((170, 650), (250, 600), summer(), 60 + 5 * i));
        assert!(out.decision.unwrap().chamber_temperature.cooling);
        cool.push(out.commands.relay_cool);
    }
    assert_eq!(cool, vec![true, true, false, false, true, true]);
}

#[test]
fn manual_sleep_request_overrides_cycle() {
    let mut ctl = controller();
    let modes = ModeFlags {
        sleep_requested: Some(true),
        ..summer()
    };
    let out = ctl.tick(&tick_input((170, 650), (250, 600), modes, 60));
    assert!(out.decision.unwrap().sleeping);
    assert!(!out.commands.relay_cool);

    let wake = ModeFlags {
        sleep_requested: Some(false),
        ..summer()
    };
    let out = ctl.tick(&tick_input((170, 650), (250, 600), wake, 65));
    assert!(!out.decision.unwrap().sleeping);
    assert!(out.commands.relay_cool);

    // Released back to the automatic cycle in the active phase.
    let out = ctl.tick(&tick_input((170, 650), (250, 600), summer(), 70));
    assert!(!out.decision.unwrap().sleeping);
    assert!(!ctl.state().sleep.manual_override);
}

#[test]
fn resumed_controller_keeps_hysteresis() {
    let mut ctl = controller();
    ctl.tick(&tick_input((170, 650), (250, 600), summer(), 60));
    let state = ctl.clone().into_state();

    let mut resumed = ChamberController::with_state(ControllerConfig::default(), state).unwrap();
    // 156 is inside the exit margin only for an already-cooling loop.
    let out = resumed.tick(&tick_input((156, 650), (250, 600), summer(), 65));
    assert!(out.commands.relay_cool);

    let mut fresh = controller();
    let out = fresh.tick(&tick_input((156, 650), (250, 600), summer(), 65));
    assert!(!out.commands.relay_cool);
}

#[test]
fn sensor_fallback_after_repeated_failures() {
    let mut ctl = controller();
    ctl.tick(&tick_input((170, 650), (250, 600), summer(), 60));
    let mut last = None;
    for i in 0..3 {
        let out = ctl.tick(&TickInput {
            chamber: None,
            ..tick_input((0, 0), (250, 600), summer(), 65 + 5 * i)
        });
        last = out.decision;
    }
    let decision = last.unwrap();
    assert!(decision.sensor_fallback);
    assert_eq!(decision.readings.chamber_temp_raw, 170);
}
