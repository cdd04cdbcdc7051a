//! Replay command implementation for the Waymark CLI.
//!
//! Drives a [`MapController`] over a [`HeadlessMapSurface`] through the
//! events of a session script. Route requests are spawned on a
//! current-thread Tokio runtime and their completions are fed back to the
//! controller when the script awaits them or the script ends.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use waymark_core::{
    AuthorizationStatus, HeadlessMapSurface, LongPress, MapController, MapSurface, Position,
    PositionSource, RequestId, RouteCompletion, RouteProvider,
};
use waymark_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, StraightLineRouteProvider};

use crate::script::{OverlayReport, ReplayReport, RouteReport, ScriptEvent, SessionScript};
use crate::{ARG_OFFLINE, ARG_OSRM_BASE_URL, ARG_SCRIPT, ARG_TIMEOUT_SECS, CliError, ENV_SCRIPT};

/// CLI arguments for the `replay` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Replay a JSON session script against a headless map. \
                 Routes come from an OSRM instance unless --offline is \
                 given, in which case straight lines are drawn. The final \
                 screen state is printed as JSON.",
    about = "Replay a scripted map session"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ReplayArgs {
    /// Path to a JSON session script.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) script: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Request timeout for the routing service in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Draw straight lines instead of querying a routing service.
    #[arg(long = ARG_OFFLINE)]
    #[serde(default)]
    pub(crate) offline: bool,
}

impl ReplayArgs {
    pub(crate) fn into_config(self) -> Result<ReplayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReplayConfig::try_from(merged)
    }
}

/// Where routes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Routing {
    /// Straight lines computed in-process.
    Offline,
    /// An OSRM Route API endpoint.
    Osrm(HttpRouteProviderConfig),
}

/// Resolved `replay` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReplayConfig {
    /// Path to the JSON session script.
    pub(crate) script: Utf8PathBuf,
    /// Route source.
    pub(crate) routing: Routing,
}

impl TryFrom<ReplayArgs> for ReplayConfig {
    type Error = CliError;

    fn try_from(args: ReplayArgs) -> Result<Self, Self::Error> {
        let script = args.script.ok_or(CliError::MissingArgument {
            field: ARG_SCRIPT,
            env: ENV_SCRIPT,
        })?;

        let routing = if args.offline {
            Routing::Offline
        } else {
            let mut config = HttpRouteProviderConfig::default();
            if let Some(base_url) = args.osrm_base_url {
                config.base_url = base_url;
            }
            if let Some(secs) = args.timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            Routing::Osrm(config)
        };

        Ok(Self { script, routing })
    }
}

/// Builds the route provider for the current replay invocation.
pub(super) trait RouteProviderBuilder {
    fn build(&self, config: &ReplayConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(super) struct DefaultRouteProviderBuilder;

impl RouteProviderBuilder for DefaultRouteProviderBuilder {
    fn build(&self, config: &ReplayConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        match &config.routing {
            Routing::Offline => Ok(Box::new(StraightLineRouteProvider)),
            Routing::Osrm(http) => {
                let provider = HttpRouteProvider::with_config(http.clone()).map_err(|source| {
                    CliError::BuildRouteProvider {
                        base_url: http.base_url.clone(),
                        source,
                    }
                })?;
                Ok(Box::new(provider))
            }
        }
    }
}

/// Position source whose permission prompt is answered by the script.
#[derive(Debug, Clone, Copy)]
struct ScriptedPositionSource {
    answer: AuthorizationStatus,
    status: AuthorizationStatus,
    updating: bool,
}

impl ScriptedPositionSource {
    const fn answering(answer: AuthorizationStatus) -> Self {
        Self {
            answer,
            status: AuthorizationStatus::NotDetermined,
            updating: false,
        }
    }

    /// Whether fixes should reach the controller.
    fn delivers(&self) -> bool {
        self.updating && self.status == AuthorizationStatus::Granted
    }
}

impl PositionSource for ScriptedPositionSource {
    fn request_authorization(&mut self) {
        self.status = self.answer;
    }

    fn start_updates(&mut self) {
        self.updating = true;
    }

    fn stop_updates(&mut self) {
        self.updating = false;
    }

    fn authorization(&self) -> AuthorizationStatus {
        self.status
    }

    fn is_updating(&self) -> bool {
        self.updating
    }
}

type ReplayController =
    MapController<ScriptedPositionSource, HeadlessMapSurface, Box<dyn RouteProvider>>;

struct Session {
    controller: ReplayController,
    outstanding: Vec<(RequestId, JoinHandle<RouteCompletion>)>,
    routes: Vec<RouteReport>,
}

impl Session {
    fn start(script: &SessionScript, provider: Box<dyn RouteProvider>) -> Result<Self, CliError> {
        let surface = HeadlessMapSurface::new(script.viewport, script.starting_region());
        let mut controller = MapController::new(
            ScriptedPositionSource::answering(script.authorization),
            surface,
            provider,
            script.config.clone(),
        )?;
        controller.start();
        let status = controller.position_source().authorization();
        controller.on_authorization_changed(status);
        Ok(Self {
            controller,
            outstanding: Vec::new(),
            routes: Vec::new(),
        })
    }

    async fn apply(&mut self, event: ScriptEvent) -> Result<(), CliError> {
        match event {
            ScriptEvent::Positions { positions } => {
                if self.controller.position_source().delivers() {
                    let batch: Vec<Position> = positions.into_iter().map(Position::from).collect();
                    self.controller.on_positions(&batch);
                } else {
                    log::debug!("dropping {} fixes without location access", positions.len());
                }
            }
            ScriptEvent::ShowMe => self.controller.show_me(),
            ScriptEvent::Pan { phase } => self.controller.on_pan(phase),
            ScriptEvent::LongPress { point, held_ms } => {
                let press = LongPress::new(point, Duration::from_millis(held_ms));
                self.controller.on_long_press(press);
            }
            ScriptEvent::SelectPin { pin } => {
                if let Some(pending) = self.controller.select_pin(pin)? {
                    let id = pending.id();
                    self.outstanding.push((id, tokio::spawn(pending.resolve())));
                }
            }
            ScriptEvent::AwaitRoutes => self.drain().await?,
        }
        Ok(())
    }

    /// Feed every outstanding completion back to the controller in request
    /// order.
    async fn drain(&mut self) -> Result<(), CliError> {
        for (id, handle) in std::mem::take(&mut self.outstanding) {
            let completion = handle.await.map_err(CliError::RouteTask)?;
            let outcome = self.controller.complete_route(completion);
            self.routes.push(RouteReport::from_outcome(id, &outcome));
        }
        Ok(())
    }

    fn finish(mut self) -> ReplayReport {
        self.controller.stop();
        let surface = self.controller.surface();
        let overlays = surface
            .overlays()
            .iter()
            .map(|overlay| {
                OverlayReport::new(
                    overlay.id,
                    overlay.line.0.len(),
                    self.controller.overlay_style(overlay),
                )
            })
            .collect();
        ReplayReport {
            pins: surface.pins().to_vec(),
            overlays,
            region: surface.region(),
            distance_label: surface.distance_label().map(str::to_owned),
            following: self.controller.is_following(),
            routes: self.routes,
        }
    }
}

async fn replay_session(
    script: SessionScript,
    provider: Box<dyn RouteProvider>,
) -> Result<ReplayReport, CliError> {
    let mut session = Session::start(&script, provider)?;
    for event in script.events {
        session.apply(event).await?;
    }
    session.drain().await?;
    Ok(session.finish())
}

pub(super) fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteProviderBuilder;
    run_replay_with(args, &builder, &mut stdout)
}

pub(super) fn run_replay_with(
    args: ReplayArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_replay(args, builder)?;
    write_report(writer, &report)
}

fn execute_replay(
    args: ReplayArgs,
    builder: &dyn RouteProviderBuilder,
) -> Result<ReplayReport, CliError> {
    let config = args.into_config()?;
    let script = load_script(&config.script)?;
    let provider = builder.build(&config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(replay_session(script, provider))
}

/// Loads a JSON-encoded [`SessionScript`] from disk.
pub(super) fn load_script(path: &Utf8Path) -> Result<SessionScript, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenScript {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseScript {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, report: &ReplayReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}
