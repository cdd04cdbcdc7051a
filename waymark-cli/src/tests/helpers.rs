//! Test helpers for writing session scripts and stub route providers.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use tempfile::TempDir;
use waymark_core::RouteProvider;
use waymark_core::test_support::StubRouteProvider;

use crate::CliError;
use crate::replay::{ReplayConfig, RouteProviderBuilder};

/// Write `contents` to `path` through cap-std.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    let parent = path.parent().expect("path should have a parent");
    let name = path.file_name().expect("path should have a file name");
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()).expect("open dir");
    dir.write(name, contents).expect("write file");
}

/// Temporary directory holding a session script.
pub(super) struct ScriptDir {
    _dir: TempDir,
    script: Utf8PathBuf,
}

impl ScriptDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let script = root.join("session.json");
        Self { _dir: dir, script }
    }

    pub(super) fn with_script(json: &str) -> Self {
        let dir = Self::new();
        write_utf8(&dir.script, json.as_bytes());
        dir
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.script
    }
}

/// Builder handing out core stub providers instead of network clients.
pub(super) enum StubBuilder {
    Direct,
    Failing(waymark_core::RouteError),
}

impl RouteProviderBuilder for StubBuilder {
    fn build(&self, _config: &ReplayConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        Ok(match self {
            Self::Direct => Box::new(StubRouteProvider::direct()),
            Self::Failing(err) => Box::new(StubRouteProvider::with_error(err.clone())),
        })
    }
}

/// A script placing the user near the startup pin and selecting it.
pub(super) const SELECT_STARTUP_PIN: &str = r#"{
    "events": [
        { "type": "positions", "positions": [{ "latitude": 37.95, "longitude": -122.03 }] },
        { "type": "select_pin", "pin": 1 },
        { "type": "await_routes" }
    ]
}"#;
