//! Line input read on a helper thread.
//!
//! A `READ` blocked on the terminal has to notice an interrupt, and a
//! blocking `read_line` never returns on its own. The helper thread reads
//! one line per request and never reads ahead, so a caller can stop
//! waiting while the request stays outstanding. The line it eventually
//! produces goes to the next caller.

use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::streams::read_trimmed_line;

/// How often a waiting read looks at the interrupt flag.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

type Reply = io::Result<Option<String>>;

#[derive(Debug)]
struct Channel {
    requests: Sender<()>,
    replies: Receiver<Reply>,
    /// A line was requested and has not been collected yet.
    outstanding: bool,
}

impl Channel {
    fn request(&mut self) -> io::Result<()> {
        if !self.outstanding {
            self.requests.send(()).map_err(|_| reader_gone())?;
            self.outstanding = true;
        }
        Ok(())
    }

    fn collect(&mut self, reply: Reply) -> Reply {
        self.outstanding = false;
        reply
    }
}

/// A line source served by a background thread. Clones share the source.
#[derive(Clone, Debug)]
pub struct LineReader {
    channel: Arc<Mutex<Channel>>,
}

impl LineReader {
    /// Start a reader thread over `source`.
    pub fn spawn<R>(mut source: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (requests, pending) = mpsc::channel::<()>();
        let (answer, replies) = mpsc::channel();
        thread::Builder::new()
            .name("line-reader".to_string())
            .spawn(move || {
                while pending.recv().is_ok() {
                    if answer.send(read_trimmed_line(&mut source)).is_err() {
                        break;
                    }
                }
            })?;
        Ok(LineReader {
            channel: Arc::new(Mutex::new(Channel {
                requests,
                replies,
                outstanding: false,
            })),
        })
    }

    /// The process-wide reader over standard input.
    ///
    /// Everything that reads standard input goes through this one reader so
    /// buffered lines are never split between two consumers.
    pub fn stdin() -> io::Result<Self> {
        static STDIN: OnceLock<LineReader> = OnceLock::new();
        if let Some(reader) = STDIN.get() {
            return Ok(reader.clone());
        }
        let reader = LineReader::spawn(BufReader::new(io::stdin()))?;
        Ok(STDIN.get_or_init(|| reader).clone())
    }

    /// Wait for the next line; `None` at end of input.
    pub fn read_line(&self) -> Reply {
        let mut channel = self.channel.lock();
        channel.request()?;
        let reply = channel.replies.recv().map_err(|_| reader_gone())?;
        channel.collect(reply)
    }

    /// Wait for the next line, giving up with [`io::ErrorKind::Interrupted`]
    /// once `interrupt` is set. The flag is left for the caller to clear.
    pub fn read_line_until(&self, interrupt: &AtomicBool) -> Reply {
        let mut channel = self.channel.lock();
        channel.request()?;
        loop {
            match channel.replies.recv_timeout(POLL_INTERVAL) {
                Ok(reply) => return channel.collect(reply),
                Err(RecvTimeoutError::Timeout) => {
                    if interrupt.load(Ordering::SeqCst) {
                        tracing::debug!("line read interrupted");
                        return Err(io::ErrorKind::Interrupted.into());
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Err(reader_gone()),
            }
        }
    }
}

fn reader_gone() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "line reader thread stopped")
}

#[cfg(test)]
mod tests;
