//! Line-oriented transport to a player subprocess.
//!
//! All reads are blocking-with-timeout: a reader thread drains the child's
//! stdout and forwards whole lines over a channel, so the arena side can wait
//! with `recv_timeout` and never hang on a stalled engine.

use crate::error::PlayerError;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

pub struct PlayerProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
}

impl PlayerProcess {
    /// Spawn `command` with piped stdio and start draining its stdout.
    pub fn spawn(command: &[String]) -> Result<Self, PlayerError> {
        let (program, args) = command.split_first().ok_or(PlayerError::Spawn)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|_| PlayerError::Spawn)?;
        let stdin = child.stdin.take().ok_or(PlayerError::Spawn)?;
        let stdout = child.stdout.take().ok_or(PlayerError::Spawn)?;

        let (sender, lines) = mpsc::channel();
        let reader = std::thread::spawn(move || {
            // Ends at EOF or on read failure; dropping the sender wakes the
            // arena side with a disconnect.
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => {
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(PlayerProcess {
            child,
            stdin,
            lines,
            reader: Some(reader),
        })
    }

    /// Send one line to the player.
    pub fn send_line(&mut self, line: &str) -> Result<(), PlayerError> {
        writeln!(self.stdin, "{}", line)?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for the player's next line.
    pub fn read_line(&mut self, timeout: Duration) -> Result<String, PlayerError> {
        match self.lines.recv_timeout(timeout) {
            Ok(line) => Ok(line),
            Err(RecvTimeoutError::Timeout) => Err(PlayerError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(PlayerError::Io),
        }
    }

    /// Round-trip the liveness probe.
    pub fn ping(&mut self, timeout: Duration) -> Result<(), PlayerError> {
        self.send_line("ping")?;
        if self.read_line(timeout)?.trim() == "pong" {
            Ok(())
        } else {
            Err(PlayerError::Parse)
        }
    }
}

impl Drop for PlayerProcess {
    fn drop(&mut self) {
        // Killing an already-exited process reports an error we can ignore;
        // the wait reaps it either way.
        let _ = self.child.kill();
        let _ = self.child.wait();
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn round_trips_lines_through_cat() {
        let mut process = PlayerProcess::spawn(&command(&["cat"])).unwrap();
        process.send_line("hello").unwrap();
        assert_eq!(
            process.read_line(Duration::from_secs(5)).unwrap(),
            "hello"
        );
    }

    #[test]
    fn times_out_on_silence() {
        let mut process = PlayerProcess::spawn(&command(&["cat"])).unwrap();
        assert_eq!(
            process.read_line(Duration::from_millis(100)),
            Err(PlayerError::Timeout)
        );
    }

    #[test]
    fn reports_eof_as_io_failure() {
        let mut process = PlayerProcess::spawn(&command(&["true"])).unwrap();
        assert_eq!(
            process.read_line(Duration::from_secs(5)),
            Err(PlayerError::Io)
        );
    }

    #[test]
    fn rejects_unspawnable_commands() {
        assert!(matches!(
            PlayerProcess::spawn(&command(&["/nonexistent/player"])),
            Err(PlayerError::Spawn)
        ));
        assert!(matches!(
            PlayerProcess::spawn(&[]),
            Err(PlayerError::Spawn)
        ));
    }

    #[test]
    fn ping_rejects_wrong_answer() {
        // cat echoes "ping" back, which is not "pong".
        let mut process = PlayerProcess::spawn(&command(&["cat"])).unwrap();
        assert_eq!(
            process.ping(Duration::from_secs(5)),
            Err(PlayerError::Parse)
        );
    }
}
