//! Focused unit tests covering replay configuration and execution.

use super::helpers::{SELECT_STARTUP_PIN, ScriptDir, StubBuilder};
use crate::replay::{ReplayArgs, ReplayConfig, Routing, load_script, run_replay_with};
use crate::script::{ReplayReport, RouteReport};
use super::*;
use rstest::rstest;
use std::time::Duration;
use waymark_core::{ControllerError, OverlayId, PinId, RequestId, RouteError};

fn args_for(dir: &ScriptDir) -> ReplayArgs {
    ReplayArgs {
        script: Some(dir.path().to_path_buf()),
        offline: true,
        ..ReplayArgs::default()
    }
}

fn replay(dir: &ScriptDir, builder: &StubBuilder) -> Result<ReplayReport, CliError> {
    let mut buffer = Vec::new();
    run_replay_with(args_for(dir), builder, &mut buffer)?;
    let stdout = String::from_utf8(buffer).expect("stdout utf-8");
    Ok(serde_json::from_str(&stdout).expect("output should be a JSON report"))
}

#[rstest]
fn converting_replay_without_script_errors() {
    let err = ReplayConfig::try_from(ReplayArgs::default()).expect_err("missing script");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SCRIPT);
            assert_eq!(env, ENV_SCRIPT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn offline_flag_selects_straight_lines() {
    let args = ReplayArgs {
        script: Some("session.json".into()),
        offline: true,
        ..ReplayArgs::default()
    };
    let config = ReplayConfig::try_from(args).expect("config should build");
    assert_eq!(config.routing, Routing::Offline);
}

#[rstest]
fn osrm_settings_override_defaults() {
    let args = ReplayArgs {
        script: Some("session.json".into()),
        osrm_base_url: Some("http://osrm.example.com".to_owned()),
        timeout_secs: Some(5),
        offline: false,
    };
    let config = ReplayConfig::try_from(args).expect("config should build");
    let Routing::Osrm(http) = config.routing else {
        panic!("expected OSRM routing");
    };
    assert_eq!(http.base_url, "http://osrm.example.com");
    assert_eq!(http.timeout, Duration::from_secs(5));
}

#[rstest]
fn default_routing_targets_local_osrm() {
    let args = ReplayArgs {
        script: Some("session.json".into()),
        ..ReplayArgs::default()
    };
    let config = ReplayConfig::try_from(args).expect("config should build");
    let Routing::Osrm(http) = config.routing else {
        panic!("expected OSRM routing");
    };
    assert_eq!(http.base_url, "http://localhost:5000");
}

#[rstest]
fn load_script_reports_missing_file() {
    let dir = ScriptDir::new();
    let err = load_script(dir.path()).expect_err("script does not exist");
    assert!(matches!(err, CliError::OpenScript { .. }), "found {err:?}");
}

#[rstest]
fn load_script_reports_invalid_json() {
    let dir = ScriptDir::with_script("{ not valid json");
    let err = load_script(dir.path()).expect_err("script is malformed");
    assert!(matches!(err, CliError::ParseScript { .. }), "found {err:?}");
}

#[rstest]
fn replay_reports_distance_and_route() {
    let dir = ScriptDir::with_script(SELECT_STARTUP_PIN);
    let report = replay(&dir, &StubBuilder::Direct).expect("replay should succeed");

    assert_eq!(report.distance_label.as_deref(), Some("Distance: 876.22 m"));
    assert_eq!(report.pins.len(), 1);
    assert_eq!(report.overlays.len(), 1);
    let overlay = report.overlays.first().expect("one overlay");
    assert_eq!(overlay.points, 2);
    assert_eq!(overlay.color, "#ff0000ff");
    assert_eq!(overlay.width, 4.0);
    assert_eq!(
        report.routes,
        vec![RouteReport::Drawn {
            request: RequestId(1),
            overlay: OverlayId(1),
        }]
    );
    assert!(!report.following);
}

#[rstest]
fn replay_reports_failed_route_without_overlay() {
    let dir = ScriptDir::with_script(SELECT_STARTUP_PIN);
    let report =
        replay(&dir, &StubBuilder::Failing(RouteError::NoRoute)).expect("replay should succeed");

    assert!(report.overlays.is_empty());
    assert_eq!(report.distance_label.as_deref(), Some("Distance: 876.22 m"));
    assert!(matches!(
        report.routes.as_slice(),
        [RouteReport::Failed { .. }]
    ));
}

#[rstest]
fn denied_authorization_drops_positions() {
    let dir = ScriptDir::with_script(
        r#"{
            "authorization": "denied",
            "events": [
                { "type": "show_me" },
                { "type": "positions", "positions": [{ "latitude": 37.95, "longitude": -122.03 }] },
                { "type": "select_pin", "pin": 1 }
            ]
        }"#,
    );
    let report = replay(&dir, &StubBuilder::Direct).expect("replay should succeed");

    assert!(report.distance_label.is_none());
    assert!(report.routes.is_empty());
    assert!(report.following);
}

#[rstest]
fn superseded_selection_is_reported_stale() {
    let dir = ScriptDir::with_script(
        r#"{
            "events": [
                { "type": "positions", "positions": [{ "latitude": 37.95, "longitude": -122.03 }] },
                { "type": "long_press", "point": { "x": 100.0, "y": 100.0 } },
                { "type": "select_pin", "pin": 1 },
                { "type": "select_pin", "pin": 2 }
            ]
        }"#,
    );
    let report = replay(&dir, &StubBuilder::Direct).expect("replay should succeed");

    assert_eq!(report.pins.len(), 2);
    assert_eq!(report.overlays.len(), 1);
    assert_eq!(
        report.routes,
        vec![
            RouteReport::Stale {
                request: RequestId(1)
            },
            RouteReport::Drawn {
                request: RequestId(2),
                overlay: OverlayId(1),
            },
        ]
    );
}

#[rstest]
fn selecting_unknown_pin_fails() {
    let dir = ScriptDir::with_script(r#"{ "events": [{ "type": "select_pin", "pin": 9 }] }"#);
    let err = replay(&dir, &StubBuilder::Direct).expect_err("pin 9 does not exist");
    match err {
        CliError::Controller(ControllerError::UnknownPin(pin)) => assert_eq!(pin, PinId(9)),
        other => panic!("expected UnknownPin, found {other:?}"),
    }
}
