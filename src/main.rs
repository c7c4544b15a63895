//! Qipu -- an interactive Xiangqi manual viewer.
//!
//! Reads commands from stdin and writes responses to stdout. Autoplay
//! advances between commands: the main loop waits for input only until the
//! next autoplay deadline.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use clap::Parser;
use log::{debug, info, warn};

use qipu::analysis::HttpUpstream;
use qipu::board::Board;
use qipu::config::{init_logging, ViewerArgs};
use qipu::manual::Catalog;
use qipu::protocol::parse_command;
use qipu::replay::Session;
use qipu::viewer::Viewer;

fn main() -> anyhow::Result<()> {
    let args = ViewerArgs::parse();
    init_logging(args.log_level);

    let catalog = match &args.manuals {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let session = Session::new(Board::opening(), args.period());
    let mut viewer = Viewer::new(catalog, session);
    if !args.offline {
        viewer = viewer.with_analysis(Box::new(HttpUpstream::new(args.endpoint.clone())));
    }

    info!("loaded {} manuals", viewer.catalog().manuals.len());
    if !viewer.select_default() {
        warn!("catalog is empty, nothing selected");
    }

    let lines = spawn_stdin_reader();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    run(&mut viewer, &lines, &mut out)?;
    Ok(())
}

/// Forwards stdin lines over a channel so the main loop can wait on input
/// and the autoplay deadline together.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Runs the command loop until `quit` or end of input. When input ends
/// while autoplay is running, playback is finished first.
fn run<W: Write>(viewer: &mut Viewer, lines: &Receiver<String>, out: &mut W) -> io::Result<()> {
    loop {
        let received = match viewer.session().next_deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                let Some(cmd) = parse_command(&line) else {
                    continue;
                };
                if !viewer.handle(&cmd, Instant::now(), out)? {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => viewer.tick(Instant::now(), out)?,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("input closed");
                while let Some(deadline) = viewer.session().next_deadline() {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    viewer.tick(Instant::now(), out)?;
                }
                break;
            }
        }
    }
    out.flush()
}
