//! Bundler config failures are reported through `tracing`, not returned.

use modnav_core::config::keys;
use modnav_core::{resolve_module, MemoryFs, Resolution, ResolutionRequest, Workspace};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured.contents())
}

#[test]
fn test_invalid_webpack_config_is_logged() {
    let fs = MemoryFs::new()
        .with_file("/proj/webpack.config.json", "{ plugins: ")
        .with_dir("/proj/src");
    let ws = Workspace::new(["/proj"]).with_setting(keys::WEBPACK, true);
    let request = ResolutionRequest::new("/proj/src/app.js", "@ui/Button");

    let (resolution, logs) = with_captured_logs(|| resolve_module(&fs, &ws, &request));

    assert_eq!(resolution.unwrap(), Resolution::NotFound);
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("Failed to load webpack config"), "{logs}");
    assert!(logs.contains("webpack.config.json"), "{logs}");
}

#[test]
fn test_missing_webpack_config_is_logged() {
    let fs = MemoryFs::new().with_dir("/proj/src");
    let ws = Workspace::new(["/proj"]).with_setting(keys::WEBPACK, true);
    let request = ResolutionRequest::new("/proj/src/app.js", "@ui/Button");

    let (resolution, logs) = with_captured_logs(|| resolve_module(&fs, &ws, &request));

    assert_eq!(resolution.unwrap(), Resolution::NotFound);
    assert!(logs.contains("Failed to read config"), "{logs}");
}

#[test]
fn test_disabled_aliases_log_nothing() {
    let fs = MemoryFs::new().with_dir("/proj/src");
    let ws = Workspace::new(["/proj"]);
    let request = ResolutionRequest::new("/proj/src/app.js", "@ui/Button");

    let (resolution, logs) = with_captured_logs(|| resolve_module(&fs, &ws, &request));

    assert_eq!(resolution.unwrap(), Resolution::NotFound);
    assert!(logs.is_empty(), "{logs}");
}
