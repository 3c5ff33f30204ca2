//! StudyFlow RPC server: JSON-lines over stdin/stdout.
//!
//! Request:  {"id":1, "method":"goals.add", "params":{"title":"...","target":5}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Messages for the background service are written to stdout as
//! `{"event":"message",...}`; their replies arrive on stdin (see
//! `services::line_bridge`). Logs go to stderr.

use std::io::{self, BufReader, Stdin, Stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use studyflow::app::App;
use studyflow::platform;
use studyflow::rpc_handler::handle_method;
use studyflow::services::line_bridge::JsonLineBridge;
use studyflow::services::messaging::MessageSender;

type StdioBridge = JsonLineBridge<BufReader<Stdin>, Stdout>;

fn init_logging() {
    let filter = EnvFilter::try_from_env("STUDYFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn db_path() -> PathBuf {
    std::env::var_os("STUDYFLOW_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(platform::get_data_dir)
        .join("studyflow.db")
}

fn respond(bridge: &StdioBridge, response: &Value) -> io::Result<()> {
    bridge.write_value(response)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let bridge = Arc::new(JsonLineBridge::new(BufReader::new(io::stdin()), io::stdout()));
    let sender: Arc<dyn MessageSender> = bridge.clone();
    let settings_path = std::env::var_os("STUDYFLOW_CONFIG").map(PathBuf::from);
    let db_path = db_path();

    let mut app = App::open(&db_path, settings_path, sender)?;
    let events = Arc::clone(&bridge);
    app.set_focus_listener(Arc::new(move || {
        if let Err(e) = events.emit_event("focus.expired", json!({})) {
            tracing::warn!("failed to announce focus expiry: {}", e);
        }
    }));
    let app = Mutex::new(app);

    tracing::info!(db = %db_path.display(), "studyflow rpc server ready");
    bridge.emit_event("ready", json!({"version": env!("CARGO_PKG_VERSION")}))?;

    while let Some(line) = bridge.read_line() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("stdin read failed: {}", e);
                break;
            }
        };

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&bridge, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        tracing::debug!(method, "request");
        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                tracing::debug!(method, error = %err, "request failed");
                json!({"id": id, "error": err})
            }
        };
        respond(&bridge, &response)?;
    }

    tracing::info!("input closed, shutting down");
    Ok(())
}
