//! JSON-lines transport to the background service.
//!
//! Outbound messages are written as
//! `{"event":"message","seq":N,"expectsReply":bool,"message":{...}}`.
//! For messages that expect a reply, the next input line must be
//! `{"reply":N,"result":...}` or `{"reply":N,"error":"..."}`.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::services::messaging::{safe_lock, Message, MessageSender};
use crate::types::errors::CommunicationError;

/// Line-oriented bridge over any reader/writer pair (stdin/stdout in the server).
pub struct JsonLineBridge<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
    seq: AtomicU64,
}

impl<R: BufRead + Send, W: Write + Send> JsonLineBridge<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            seq: AtomicU64::new(1),
        }
    }

    /// Reads the next non-blank line. `None` at end of input.
    pub fn read_line(&self) -> Option<io::Result<String>> {
        let mut reader = safe_lock(&self.reader);
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Some(Ok(trimmed.to_string()));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Writes one JSON value as a line and flushes.
    pub fn write_value(&self, value: &Value) -> io::Result<()> {
        let mut writer = safe_lock(&self.writer);
        writeln!(writer, "{}", value)?;
        writer.flush()
    }

    /// Writes `{"event": name, ...payload}`.
    pub fn emit_event(&self, name: &str, payload: Value) -> io::Result<()> {
        let mut event = json!({ "event": name });
        if let (Some(target), Value::Object(fields)) = (event.as_object_mut(), payload) {
            target.extend(fields);
        }
        self.write_value(&event)
    }

    fn await_reply(&self, seq: u64) -> Result<Value, CommunicationError> {
        let line = match self.read_line() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                tracing::warn!("reading reply {} failed: {}", seq, e);
                return Err(CommunicationError::Disconnected);
            }
            None => return Err(CommunicationError::Disconnected),
        };

        let reply: Value = serde_json::from_str(&line)
            .map_err(|e| CommunicationError::UnexpectedResponse(format!("malformed reply: {}", e)))?;

        if reply.get("reply").and_then(Value::as_u64) != Some(seq) {
            return Err(CommunicationError::UnexpectedResponse(format!(
                "expected reply {}, got {}",
                seq, line
            )));
        }
        if let Some(error) = reply.get("error") {
            let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(CommunicationError::Rejected(message));
        }
        Ok(reply.get("result").cloned().unwrap_or(Value::Null))
    }
}

impl<R: BufRead + Send, W: Write + Send> MessageSender for JsonLineBridge<R, W> {
    fn send(&self, message: &Message) -> Result<Value, CommunicationError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let expects_reply = message.expects_reply();
        let envelope = json!({
            "event": "message",
            "seq": seq,
            "expectsReply": expects_reply,
            "message": message,
        });
        self.write_value(&envelope).map_err(|e| {
            tracing::warn!("writing {} failed: {}", message.kind(), e);
            CommunicationError::Disconnected
        })?;
        tracing::debug!(seq, kind = message.kind(), "sent background message");

        if !expects_reply {
            return Ok(Value::Null);
        }
        self.await_reply(seq)
    }
}
