//! Property tests for the control state machines and the relay interlock.

use cc_controls::{
    AirReading, ChamberController, ControlTarget, ControllerConfig, HumidityBand, HumidityMode, ModeFlags,
    TemperatureBand, TemperatureState, TickInput, hysteresis, is_inside_chamber_deadzone,
    is_inside_supply_deadzone,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn hysteresis_holds_state_inside_band(
        target in -200i32..400,
        delta_hi in 1i32..50,
        delta_lo in 1i32..50,
        initial in any::<bool>(),
        offsets in prop::collection::vec(0.0f64..1.0, 1..50),
    ) {
        let mut state = initial;
        for f in offsets {
            // Strictly inside (target - delta_lo, target + delta_hi).
            let span = delta_hi + delta_lo - 2;
            let measured = target - delta_lo + 1 + (f * span as f64) as i32;
            state = hysteresis(measured, target, delta_hi, delta_lo, state);
            prop_assert_eq!(state, initial);
        }
    }

    #[test]
    fn supply_deadzone_inside_chamber_deadzone(e in -5.0f64..5.0) {
        if is_inside_supply_deadzone(e) {
            prop_assert!(is_inside_chamber_deadzone(e));
        }
    }

    #[test]
    fn cooling_and_heating_are_exclusive(
        temps in prop::collection::vec(0i32..300, 1..80),
        target in 50i32..250,
    ) {
        let band = TemperatureBand::CHAMBER;
        let mut state = TemperatureState::default();
        for t in temps {
            state = band.step(t, target, state);
            prop_assert!(!(state.cooling && state.heating));
        }
    }

    #[test]
    fn fine_stays_fine_inside_deadzone(offset in -0.8f64..=0.8, target in 4.0f64..15.0) {
        let band = HumidityBand::CHAMBER;
        prop_assert_eq!(band.next_mode(target + offset, target, HumidityMode::Fine), HumidityMode::Fine);
    }

    #[test]
    fn relays_never_heat_and_cool_without_dehumidify(
        ticks in prop::collection::vec(
            (100i32..=220, 500i32..=900, -100i32..=300, 300i32..=900, any::<bool>(), any::<bool>()),
            1..60,
        ),
        target_temp in 100i32..=200,
        target_rh in 600i32..=900,
        humidifier in any::<bool>(),
    ) {
        let config = ControllerConfig::default();
        let mut controller = ChamberController::new(config).unwrap();
        for (i, (temp, rh, outdoor_t, outdoor_rh, summer, humi_save)) in ticks.into_iter().enumerate() {
            let out = controller.tick(&TickInput {
                chamber: Some(AirReading::new(temp, rh)),
                supply: Some(AirReading::new(temp - 20, rh)),
                outdoor: Some(AirReading::new(outdoor_t, outdoor_rh)),
                target: ControlTarget::new(target_temp, target_rh),
                modes: ModeFlags {
                    summer_mode: summer,
                    humi_save_mode: humi_save,
                    sleep_requested: None,
                    humidifier_installed: humidifier,
                },
                elapsed_seconds: 30 + 5 * i as u32,
            });
            let decision = out.decision.unwrap();
            prop_assert!(out.commands.interlock_ok(decision.dehumidify));
            prop_assert!(decision.requested.interlock_ok(decision.dehumidify));
            prop_assert!(!out.commands.relay_dehumidify_water || out.commands.relay_cool);
            prop_assert!((60..=400).contains(&out.supply_target_raw));
        }
    }

    #[test]
    fn only_plausible_readings_reach_the_decision(
        ticks in prop::collection::vec(
            (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>()),
            1..40,
        ),
    ) {
        let plausible = |r: AirReading| (-400..=600).contains(&r.temp_raw) && (0..=1000).contains(&r.rh_raw);
        let mut controller = ChamberController::new(ControllerConfig::default()).unwrap();
        for (i, (temp, rh, outdoor_t, outdoor_rh)) in ticks.into_iter().enumerate() {
            let out = controller.tick(&TickInput {
                chamber: Some(AirReading::new(temp, rh)),
                supply: Some(AirReading::new(temp, rh)),
                outdoor: Some(AirReading::new(outdoor_t, outdoor_rh)),
                target: ControlTarget::new(150, 750),
                modes: ModeFlags::default(),
                elapsed_seconds: 40 + 5 * i as u32,
            });
            if let Some(decision) = out.decision {
                prop_assert!(plausible(decision.readings.chamber()));
                prop_assert!(plausible(decision.readings.outdoor()));
                prop_assert!(decision.chamber_ah.is_finite());
            } else {
                prop_assert!(!out.commands.any_on());
            }
        }
    }
}
