//! Interactive terminal front-end for the grid editor.
//!
//! A thin REPL over `Editor::apply`: parses one command per line, prints
//! outcomes, and redraws the grid whenever editor events say something
//! changed. All editing behavior lives in the core; this module only
//! translates lines to commands and outcomes to text.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver};
use log::debug;

use crate::core::editor::{Editor, EditorCommand, Outcome};
use crate::core::events::{EditorEvent, EventSender};
use crate::core::player::Player;
use crate::device::{sim, Controller, ControllerInfo};
use crate::entities::GridError;

/// Editor, its event feed and the playback engine for one session.
pub struct Shell {
    editor: Editor,
    events: Receiver<EditorEvent>,
    player: Player,
}

impl Shell {
    /// New shell over a blank animation of the given shape.
    pub fn new(
        width: usize,
        height: usize,
        controllers: Vec<Arc<dyn Controller>>,
    ) -> Result<Self, GridError> {
        let (tx, rx) = unbounded();
        let mut editor = Editor::new(width, height, controllers)?;
        editor.set_event_sender(EventSender::new(tx));
        Ok(Self {
            editor,
            events: rx,
            player: Player::new(),
        })
    }

    /// Read commands until quit or EOF.
    pub fn run(&mut self) -> Result<()> {
        println!(
            "pixa editor - {}x{} grid, 'help' lists commands",
            self.editor.animation().width(),
            self.editor.animation().height()
        );
        self.render();
        while let Some(line) = read_line("pixa> ") {
            if !self.execute_line(line.trim()) {
                break;
            }
        }
        Ok(())
    }

    /// One line of input; returns false on quit.
    fn execute_line(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return true;
        };
        let args: Vec<&str> = parts.collect();

        match word {
            "t" | "toggle" => {
                let col = args.first().and_then(|s| s.parse().ok());
                let row = args.get(1).and_then(|s| s.parse().ok());
                match (col, row) {
                    (Some(col), Some(row)) => {
                        self.dispatch(EditorCommand::ToggleCell { col, row })
                    }
                    _ => println!("usage: toggle COL ROW"),
                }
            }
            "a" | "add" => self.dispatch(EditorCommand::AddFrame),
            "p" | "prev" => self.dispatch(EditorCommand::PrevFrame),
            "n" | "next" => self.dispatch(EditorCommand::NextFrame),
            "d" | "dur" => match args.first().and_then(|s| s.parse().ok()) {
                Some(secs) => self.dispatch(EditorCommand::SetDuration(secs)),
                None => println!("usage: dur SECONDS"),
            },
            "e" | "export" => self.dispatch(EditorCommand::Export),
            "w" | "save" => match args.first() {
                Some(path) => self.dispatch(EditorCommand::ExportToFile(PathBuf::from(path))),
                None => println!("usage: save FILE"),
            },
            "l" | "load" => match args.first() {
                Some(path) => self.dispatch(EditorCommand::LoadFromFile(PathBuf::from(path))),
                None => println!("usage: load FILE"),
            },
            "s" | "send" => match args.first() {
                Some(name) => self.send_once(name),
                None => self.dispatch(EditorCommand::SendToDevice),
            },
            "use" => match args.first() {
                Some(name) => match self.editor.set_preferred(name) {
                    Ok(()) => println!("using {}", name),
                    Err(e) => println!("error: {}", e),
                },
                None => println!("usage: use CONTROLLER"),
            },
            "devices" => self.list_devices(),
            "show" => self.render(),
            "play" => self.play(),
            "help" | "?" => print_help(),
            "q" | "quit" | "exit" => return false,
            other => println!("unknown command: {} (try help)", other),
        }
        true
    }

    fn dispatch(&mut self, command: EditorCommand) {
        match self.editor.apply(command) {
            Ok(outcome) => {
                let redrew = self.drain_events();
                self.report(outcome, redrew);
            }
            Err(err) => println!("error: {}", err),
        }
    }

    fn report(&mut self, outcome: Outcome, redrew: bool) {
        match outcome {
            Outcome::Toggled { .. } | Outcome::FrameAdded { .. } | Outcome::DurationSet { .. } => {}
            Outcome::FrameSelected { index, total } => {
                if !redrew {
                    println!("frame {}/{}", index + 1, total);
                }
            }
            Outcome::Exported(doc) => match serde_json::to_string(&doc) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("error: {}", e),
            },
            Outcome::Saved { path, frames } => {
                println!("saved {} frame(s) to {}", frames, path.display())
            }
            Outcome::Loaded { path, frames } => {
                println!("loaded {} frame(s) from {}", frames, path.display())
            }
            Outcome::Sent { controller } => println!("sent to {}", controller),
            Outcome::SelectionRequired(infos) => self.prompt_selection(infos),
        }
    }

    /// Drain pending editor events; redraw once if anything changed.
    fn drain_events(&mut self) -> bool {
        let mut dirty = false;
        for event in self.events.try_iter() {
            debug!("editor event: {:?}", event);
            dirty = true;
        }
        if dirty {
            self.render();
        }
        dirty
    }

    fn render(&self) {
        let anim = self.editor.animation();
        let frame = anim.current_frame();
        println!("{}", frame.grid().to_ascii());
        println!(
            "frame {}/{} (duration: {}s)",
            anim.current_index() + 1,
            anim.frame_count(),
            frame.duration()
        );
    }

    /// Send to a named controller without storing a preference.
    fn send_once(&mut self, name: &str) {
        match self.editor.send_to(name) {
            Ok(Outcome::Sent { controller }) => println!("sent to {}", controller),
            Ok(other) => debug!("unexpected outcome: {:?}", other),
            Err(e) => println!("error: {}", e),
        }
    }

    /// Chooser flow: the editor asked which controller to send to.
    fn prompt_selection(&mut self, infos: Vec<ControllerInfo>) {
        println!("choose a controller:");
        for (i, info) in infos.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, info.name, info.description);
        }
        let Some(choice) = read_line("controller (number or name, empty cancels): ") else {
            return;
        };
        let choice = choice.trim();
        if choice.is_empty() {
            println!("send cancelled");
            return;
        }
        let name = match choice.parse::<usize>() {
            Ok(i) if i >= 1 && i <= infos.len() => infos[i - 1].name.clone(),
            _ => choice.to_string(),
        };
        let remember = matches!(
            read_line("always use this controller? [y/N]: ")
                .as_deref()
                .map(str::trim),
            Some("y") | Some("Y")
        );
        if remember {
            match self.editor.set_preferred(&name) {
                Ok(()) => self.dispatch(EditorCommand::SendToDevice),
                Err(e) => println!("error: {}", e),
            }
        } else {
            self.send_once(&name);
        }
    }

    fn list_devices(&self) {
        if self.editor.controllers().is_empty() {
            println!("no controllers attached");
            return;
        }
        for controller in self.editor.controllers() {
            let marker = if self.editor.preferred() == Some(controller.name()) {
                "*"
            } else {
                " "
            };
            println!(" {} {} - {}", marker, controller.name(), controller.description());
        }
    }

    /// Play the animation once from the first frame, pushing each frame to
    /// the preferred controller when one is set.
    fn play(&mut self) {
        if self.editor.animation().frame_count() == 1 {
            println!("single frame, nothing to play");
            return;
        }
        self.editor.animation_mut().set_current(0);
        self.player.set_loop_enabled(false);
        self.player.play();
        self.show_playback_frame();
        while self.player.is_playing() {
            if self.player.update(self.editor.animation_mut()).is_some() {
                self.show_playback_frame();
            }
            thread::sleep(Duration::from_millis(10));
        }
        // Cursor stays on the last frame once playback ends.
    }

    fn show_playback_frame(&mut self) {
        self.render();
        if let Some(name) = self.editor.preferred().map(str::to_string) {
            if let Err(e) = self.editor.send_to(&name) {
                println!("error: {}", e);
                self.player.stop();
            }
        }
    }
}

/// Build controllers, construct the shell, optionally load a file, run.
pub fn run(width: usize, height: usize, sim_count: usize, file: Option<PathBuf>) -> Result<()> {
    let controllers = sim::controllers(sim_count, width, height);
    let mut shell = Shell::new(width, height, controllers)?;
    if let Some(path) = file {
        shell.dispatch(EditorCommand::LoadFromFile(path));
    }
    shell.run()
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            log::warn!("stdin read failed: {}", e);
            None
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  t|toggle COL ROW   flip a cell of the current frame");
    println!("  a|add              append a copy of the current frame");
    println!("  p|prev  n|next     step between frames");
    println!("  d|dur SECONDS      set the current frame's duration");
    println!("  e|export           print the animation as JSON");
    println!("  w|save FILE        write the animation to a JSON file");
    println!("  l|load FILE        replace the animation from a JSON file");
    println!("  s|send [NAME]      push the current frame to a controller");
    println!("  use NAME           remember a controller for later sends");
    println!("  devices            list attached controllers");
    println!("  play               play the animation once from frame 1");
    println!("  show               redraw the grid");
    println!("  q|quit             leave");
}
