//! Error types emitted by the Waymark CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::ControllerError;
use waymark_data::routing::ProviderBuildError;

/// Errors emitted by the Waymark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Opening the session script failed.
    #[error("failed to open session script at {path:?}: {source}")]
    OpenScript {
        /// Script location.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Session script JSON could not be decoded.
    #[error("failed to parse session script JSON at {path:?}: {source}")]
    ParseScript {
        /// Script location.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The controller rejected the script's configuration or events.
    #[error(transparent)]
    Controller(#[from] ControllerError),
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// Routing service URL.
        base_url: String,
        /// Construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// Building the async runtime failed.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A spawned route request panicked or was dropped by the runtime.
    #[error("route task failed: {0}")]
    RouteTask(#[source] tokio::task::JoinError),
    /// Serialising the replay report failed.
    #[error("failed to serialise replay report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the replay report failed.
    #[error("failed to write replay report: {0}")]
    WriteReport(#[source] std::io::Error),
}
