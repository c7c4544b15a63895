//! Viewer state management.
//!
//! Holds the manual catalog, the replay session for the selected variation,
//! and the optional analysis client, and answers parsed commands with plain
//! text written to the output stream.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use crate::analysis::{extract_moves, AnalysisProxy, Upstream};
use crate::manual::{export_to_dir, import_file, Catalog};
use crate::protocol::Command;
use crate::replay::{AutoplayHandle, Session};

/// Manual loaded at startup when the catalog has it.
pub const DEMO_MANUAL: &str = "示范对局";

/// Boxed upstream so the viewer can run against any client.
pub type BoxedUpstream = Box<dyn Upstream + Send>;

/// Interactive viewer state between commands.
pub struct Viewer {
    catalog: Catalog,
    session: Session,
    selected: Option<(String, String)>,
    autoplay: Option<AutoplayHandle>,
    analysis: Option<AnalysisProxy<BoxedUpstream>>,
}

impl Viewer {
    /// Creates a viewer with nothing selected.
    pub fn new(catalog: Catalog, session: Session) -> Self {
        Viewer {
            catalog,
            session,
            selected: None,
            autoplay: None,
            analysis: None,
        }
    }

    /// Enables the `analyze` command.
    pub fn with_analysis(mut self, upstream: BoxedUpstream) -> Self {
        self.analysis = Some(AnalysisProxy::new(upstream));
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the (manual, variation) names of the loaded sequence.
    pub fn selected(&self) -> Option<(&str, &str)> {
        self.selected
            .as_ref()
            .map(|(m, v)| (m.as_str(), v.as_str()))
    }

    /// Loads a variation into the session. Returns false if it doesn't
    /// exist, leaving the current selection untouched.
    pub fn select(&mut self, manual: &str, variation: &str) -> bool {
        let Some(found) = self.catalog.find(manual) else {
            return false;
        };
        let manual_name = found.name.clone();
        let Some(v) = self.catalog.variation(manual, variation) else {
            return false;
        };
        let variation_name = v.name.clone();
        self.session.load(v.moves.clone());
        info!("selected {} / {}", manual_name, variation_name);
        self.selected = Some((manual_name, variation_name));
        true
    }

    /// Loads the demo game, or the first variation of the first manual when
    /// the catalog has no demo. Returns false for an empty catalog.
    pub fn select_default(&mut self) -> bool {
        let manual = if self.catalog.find(DEMO_MANUAL).is_some() {
            DEMO_MANUAL.to_string()
        } else {
            match self.catalog.manuals.first() {
                Some(first) => first.name.clone(),
                None => return false,
            }
        };
        self.select(&manual, "")
    }

    /// One-line description of the replay position.
    pub fn status(&self) -> String {
        let mut line = format!("move {}/{}", self.session.index(), self.session.len());
        if let Some(mv) = self.session.current_move() {
            line.push(' ');
            line.push_str(&mv.label);
        }
        line
    }

    /// Advances autoplay to `now`, reporting any progress.
    pub fn tick<W: Write>(&mut self, now: Instant, out: &mut W) -> io::Result<()> {
        let was_playing = self.session.is_playing();
        if self.session.tick(now) {
            writeln!(out, "{}", self.status())?;
        }
        if was_playing && !self.session.is_playing() {
            self.autoplay = None;
            writeln!(out, "finished")?;
        }
        out.flush()
    }

    /// Executes one command. Returns false when the viewer should exit.
    pub fn handle<W: Write>(
        &mut self,
        cmd: &Command,
        now: Instant,
        out: &mut W,
    ) -> io::Result<bool> {
        match cmd {
            Command::Manuals => self.handle_manuals(out)?,
            Command::Select { manual, variation } => {
                let variation = variation.as_deref().unwrap_or("");
                if self.catalog.find(manual).is_none() {
                    writeln!(out, "error: unknown manual '{}'", manual)?;
                } else if self.select(manual, variation) {
                    if let Some((m, v)) = self.selected() {
                        let len = self.session.len();
                        writeln!(out, "selected {} / {} ({} moves)", m, v, len)?;
                    }
                } else {
                    writeln!(
                        out,
                        "error: no variation '{}' in manual '{}'",
                        variation, manual
                    )?;
                }
            }
            Command::Next => {
                self.session.next();
                writeln!(out, "{}", self.status())?;
            }
            Command::Prev => {
                self.session.prev();
                writeln!(out, "{}", self.status())?;
            }
            Command::Jump { index } => {
                self.session.jump(*index);
                writeln!(out, "{}", self.status())?;
            }
            Command::Reset => {
                self.session.reset();
                writeln!(out, "{}", self.status())?;
            }
            Command::Play => self.handle_play(now, out)?,
            Command::Pause => {
                if let Some(handle) = self.autoplay.take() {
                    self.session.cancel(handle);
                }
                writeln!(out, "paused")?;
            }
            Command::Board => {
                write!(out, "{}", self.session.board())?;
                writeln!(out, "{}", self.status())?;
            }
            Command::Moves => {
                if self.session.is_empty() {
                    writeln!(out, "no moves")?;
                }
                let index = self.session.index();
                for (i, mv) in self.session.moves().iter().enumerate() {
                    let marker = if i + 1 == index { '*' } else { ' ' };
                    writeln!(out, "{}{}. {}", marker, i + 1, mv.label)?;
                }
            }
            Command::Fen => {
                writeln!(out, "{}", self.session.position())?;
            }
            Command::Export { manual, dir } => self.handle_export(manual, dir.as_deref(), out)?,
            Command::Import { path } => self.handle_import(Path::new(path), out)?,
            Command::Analyze => self.handle_analyze(out)?,
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }

    /// Pauses when the viewer's timer is still running, otherwise starts a
    /// new one.
    /// A handle made stale by navigation counts as not playing.
    fn handle_play<W: Write>(&mut self, now: Instant, out: &mut W) -> io::Result<()> {
        if let Some(handle) = self.autoplay.take() {
            if self.session.cancel(handle) {
                return writeln!(out, "paused");
            }
        }
        match self.session.play(now) {
            Some(handle) => {
                self.autoplay = Some(handle);
                writeln!(out, "playing")
            }
            None => writeln!(out, "nothing to play"),
        }
    }

    fn handle_manuals<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, manual) in self.catalog.manuals.iter().enumerate() {
            writeln!(out, "{}. {} - {}", i + 1, manual.name, manual.description)?;
            for (j, variation) in manual.variations.iter().enumerate() {
                writeln!(
                    out,
                    "   {}) {} ({} moves)",
                    j + 1,
                    variation.name,
                    variation.moves.len()
                )?;
            }
        }
        Ok(())
    }

    fn handle_export<W: Write>(
        &self,
        manual: &str,
        dir: Option<&str>,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(found) = self.catalog.find(manual) else {
            writeln!(out, "error: unknown manual '{}'", manual)?;
            return Ok(());
        };
        match export_to_dir(found, Path::new(dir.unwrap_or("."))) {
            Ok(path) => writeln!(out, "exported {}", path.display()),
            Err(e) => {
                warn!("export of '{}' failed: {}", found.name, e);
                writeln!(out, "error: {}", e)
            }
        }
    }

    /// Imports a manual and loads its first variation. Nothing changes if
    /// the file can't be read or validated.
    fn handle_import<W: Write>(&mut self, path: &Path, out: &mut W) -> io::Result<()> {
        let manual = match import_file(path) {
            Ok(manual) => manual,
            Err(e) => {
                warn!("import of {} failed: {}", path.display(), e);
                return writeln!(out, "error: {}", e);
            }
        };
        let name = manual.name.clone();
        let variations = manual.variations.len();
        let moves = manual.move_count();
        self.catalog.insert(manual);
        self.select(&name, "");
        writeln!(
            out,
            "imported {} ({} variations, {} moves)",
            name, variations, moves
        )?;
        writeln!(out, "{}", self.status())
    }

    fn handle_analyze<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(proxy) = &self.analysis else {
            return writeln!(out, "error: analysis is disabled");
        };
        let fen = self.session.position();
        match proxy.query_position(&fen) {
            Ok(data) => {
                let moves = extract_moves(&data);
                writeln!(out, "analysis {}", data.trim_end_matches(['\0', '\n']))?;
                writeln!(out, "bestmoves {}", moves.join(" "))
            }
            Err(e) => writeln!(out, "error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{UpstreamError, UpstreamRequest};
    use crate::protocol::parse_command;

    struct CannedUpstream(&'static str);

    impl Upstream for CannedUpstream {
        fn fetch(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
            assert_eq!(request.action(), "queryall");
            Ok(self.0.to_string())
        }
    }

    fn viewer() -> Viewer {
        Viewer::new(Catalog::builtin().unwrap(), Session::default())
    }

    fn run(viewer: &mut Viewer, line: &str) -> String {
        let cmd = parse_command(line).unwrap();
        let mut out = Vec::new();
        viewer.handle(&cmd, Instant::now(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn select_and_step() {
        let mut viewer = viewer();
        assert_eq!(run(&mut viewer, "select 橘中秘"), "selected 橘中秘 / 顺炮局 (8 moves)\n");
        assert_eq!(run(&mut viewer, "next"), "move 1/8 炮二平五\n");
        assert_eq!(run(&mut viewer, "next"), "move 2/8 炮８平５\n");
        assert_eq!(run(&mut viewer, "prev"), "move 1/8 炮二平五\n");
        assert_eq!(run(&mut viewer, "jump 100"), "move 8/8 卒７进１\n");
        assert_eq!(run(&mut viewer, "reset"), "move 0/8\n");
    }

    #[test]
    fn unknown_selection_keeps_state() {
        let mut viewer = viewer();
        run(&mut viewer, "select 1");
        run(&mut viewer, "next");
        let out = run(&mut viewer, "select 1 nope");
        assert!(out.starts_with("error:"));
        assert_eq!(viewer.session().index(), 1);
        assert_eq!(viewer.selected(), Some(("橘中秘", "顺炮局")));
    }

    #[test]
    fn play_toggles() {
        let mut viewer = viewer();
        assert_eq!(run(&mut viewer, "play"), "nothing to play\n");
        run(&mut viewer, "select 2");
        assert_eq!(run(&mut viewer, "play"), "playing\n");
        assert_eq!(run(&mut viewer, "play"), "paused\n");
        assert_eq!(run(&mut viewer, "play"), "playing\n");
        assert_eq!(run(&mut viewer, "pause"), "paused\n");
        assert!(!viewer.session().is_playing());
    }

    #[test]
    fn play_after_navigation_starts_again() {
        let mut viewer = viewer();
        run(&mut viewer, "select 2");
        run(&mut viewer, "play");
        run(&mut viewer, "next");
        assert!(!viewer.session().is_playing());
        assert_eq!(run(&mut viewer, "play"), "playing\n");
        assert!(viewer.session().is_playing());
    }

    #[test]
    fn startup_selects_demo_game() {
        let mut viewer = viewer();
        assert!(viewer.select_default());
        assert_eq!(viewer.selected(), Some((DEMO_MANUAL, "中炮对屏风马")));
        assert_eq!(viewer.status(), "move 0/6");
        assert_eq!(run(&mut viewer, "play"), "playing\n");
    }

    #[test]
    fn startup_without_demo_selects_first_variation() {
        let catalog = Catalog::from_json(
            r#"{"manuals": [{"name": "残局", "variations": [{"name": "一", "moves": []}]}]}"#,
        )
        .unwrap();
        let mut viewer = Viewer::new(catalog, Session::default());
        assert!(viewer.select_default());
        assert_eq!(viewer.selected(), Some(("残局", "一")));

        let mut empty = Viewer::new(Catalog::default(), Session::default());
        assert!(!empty.select_default());
        assert_eq!(empty.selected(), None);
    }

    #[test]
    fn unknown_manual_is_reported() {
        let mut viewer = viewer();
        assert_eq!(
            run(&mut viewer, "select nope"),
            "error: unknown manual 'nope'\n"
        );
        assert_eq!(
            run(&mut viewer, "select 1 nope"),
            "error: no variation 'nope' in manual '1'\n"
        );
    }

    #[test]
    fn moves_without_selection() {
        let mut viewer = viewer();
        assert_eq!(run(&mut viewer, "moves"), "no moves\n");
    }

    #[test]
    fn tick_reports_progress_and_finish() {
        let mut viewer = viewer();
        run(&mut viewer, "select 3 2");
        let t0 = Instant::now();
        let cmd = parse_command("play").unwrap();
        viewer.handle(&cmd, t0, &mut Vec::new()).unwrap();

        let later = t0 + viewer.session().period() * 10;
        let mut out = Vec::new();
        viewer.tick(later, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "move 5/5 马五进三\nfinished\n");
    }

    #[test]
    fn fen_and_board() {
        let mut viewer = viewer();
        assert_eq!(
            run(&mut viewer, "fen"),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1\n"
        );
        let board = run(&mut viewer, "board");
        assert!(board.contains("车马相仕帅仕相马车"));
        assert!(board.ends_with("move 0/0\n"));
    }

    #[test]
    fn moves_marks_current() {
        let mut viewer = viewer();
        run(&mut viewer, "select 3 2");
        run(&mut viewer, "jump 2");
        let out = run(&mut viewer, "moves");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "*2. 将５平４");
        assert_eq!(lines[0], " 1. 马三进五");
    }

    #[test]
    fn export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let mut viewer = viewer();
        let out = run(&mut viewer, &format!("export 梅花谱 {}", dir.path().display()));
        assert!(out.starts_with("exported "));

        let path = dir.path().join("梅花谱.json");
        let out = run(&mut viewer, &format!("import {}", path.display()));
        assert_eq!(out, "imported 梅花谱 (1 variations, 8 moves)\nmove 0/8\n");
        assert_eq!(viewer.catalog().manuals.len(), 4);
        assert_eq!(viewer.session().len(), 8);
    }

    #[test]
    fn failed_import_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut viewer = viewer();
        run(&mut viewer, "select 1");
        run(&mut viewer, "next");
        let out = run(&mut viewer, &format!("import {}", path.display()));
        assert!(out.starts_with("error: invalid manual JSON"));
        assert_eq!(viewer.session().index(), 1);
        assert_eq!(viewer.catalog().manuals.len(), 4);
    }

    #[test]
    fn analyze_uses_upstream() {
        let mut viewer =
            viewer().with_analysis(Box::new(CannedUpstream("move:h2e2,score:1|move:b2e2,score:1")));
        let out = run(&mut viewer, "analyze");
        assert_eq!(
            out,
            "analysis move:h2e2,score:1|move:b2e2,score:1\nbestmoves h2e2 b2e2\n"
        );
    }

    #[test]
    fn analyze_disabled() {
        let mut viewer = viewer();
        assert_eq!(run(&mut viewer, "analyze"), "error: analysis is disabled\n");
    }

    #[test]
    fn quit_stops() {
        let mut viewer = viewer();
        let mut out = Vec::new();
        assert!(!viewer
            .handle(&Command::Quit, Instant::now(), &mut out)
            .unwrap());
    }
}
