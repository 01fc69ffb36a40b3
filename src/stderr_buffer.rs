use std::io;
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Activate buffering. While active, log output is stored instead of
/// printed to stderr.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprint!("{}", msg);
    }
}

/// Writer handed to the tracing subscriber so log lines go through the buffer.
pub struct BufferedStderr;

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        warn(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffered_writes_are_drained() {
        activate();
        let mut writer = BufferedStderr;
        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();

        let messages = drain();
        assert_eq!(messages, vec!["first\n".to_string(), "second\n".to_string()]);
        assert!(drain().is_empty());
    }
}
