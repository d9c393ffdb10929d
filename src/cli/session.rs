//! Interactive card session (`namecard session`).
//!
//! Reads one command per line and applies it to a single [`CardSession`],
//! mirroring the search box, toggles and flip gestures of the preview page.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use namecard::{
    CardAssets, CardFonts, CardSession, OptionalField, SUGGESTION_LIMIT, export_png, render_face,
};
use namecard::{Config, Directory, RenderOptions};

use crate::cli::GlobalArgs;
use crate::cli::utils::{describe_front, load_context, measurer, resolve_png_target};

/// Arguments for `namecard session`.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Read commands from a file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,
}

const HELP: &str = "\
commands:
  search <id>            show an employee by exact id, keeping mobile/LINE input
  select <id>            pick an employee as from the suggestion list, clearing input
  suggest [text]         list matching employees
  mobile [number]        set the mobile number (empty clears it)
  line [id]              set the LINE ID
  toggle <field>         flip an optional field
  show <field> | hide <field>
  ext on|off             Miaoli extension after the office number
  click                  flip the card
  drag <from> <to>       horizontal drag gesture
  view                   print the composed front face
  export [path]          export the visible face as PNG
  help | quit";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Search(String),
    Select(String),
    Suggest(String),
    Mobile(String),
    Line(String),
    Toggle(OptionalField),
    Show(OptionalField),
    Hide(OptionalField),
    Extension(bool),
    Click,
    Drag(f32, f32),
    View,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match verb {
        "search" => SessionCommand::Search(rest.to_string()),
        "select" => SessionCommand::Select(rest.to_string()),
        "suggest" => SessionCommand::Suggest(rest.to_string()),
        "mobile" => SessionCommand::Mobile(rest.to_string()),
        "line" => SessionCommand::Line(rest.to_string()),
        "toggle" => SessionCommand::Toggle(rest.parse()?),
        "show" => SessionCommand::Show(rest.parse()?),
        "hide" => SessionCommand::Hide(rest.parse()?),
        "ext" => match rest {
            "on" => SessionCommand::Extension(true),
            "off" => SessionCommand::Extension(false),
            other => bail!("expected 'on' or 'off', got '{}'", other),
        },
        "click" => SessionCommand::Click,
        "drag" => {
            let mut parts = rest.split_whitespace();
            let mut next = || -> Result<f32> {
                let raw = parts.next().ok_or_else(|| anyhow!("usage: drag <from> <to>"))?;
                raw.parse::<f32>()
                    .with_context(|| format!("invalid coordinate '{}'", raw))
            };
            let from = next()?;
            let to = next()?;
            SessionCommand::Drag(from, to)
        }
        "view" => SessionCommand::View,
        "export" => SessionCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => bail!("unknown command '{}'", other),
    };
    Ok(Some(command))
}

pub fn handle(global: &GlobalArgs, args: SessionArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let mut state = SessionState::new(ctx.config, ctx.directory);

    let interactive = args.script.is_none();
    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Box::new(io::Cursor::new(text))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut stdout = io::stdout();
    if interactive {
        writeln!(stdout, "{} records loaded; type 'help' for commands", state.directory.len())?;
    }
    for line in reader.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "error: {:#}", err)?;
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        // Command failures are reported and the session keeps going.
        if let Err(err) = state.apply(command, &mut stdout) {
            writeln!(stdout, "error: {:#}", err)?;
        }
        stdout.flush()?;
    }
    Ok(())
}

struct SessionState {
    config: Config,
    directory: Directory,
    session: CardSession,
    /// Next synthetic pointer id for `drag`.
    pointer: u32,
}

impl SessionState {
    fn new(config: Config, directory: Directory) -> Self {
        Self {
            config,
            directory,
            session: CardSession::new(),
            pointer: 0,
        }
    }

    fn apply(&mut self, command: SessionCommand, out: &mut impl Write) -> Result<()> {
        match command {
            SessionCommand::Search(query) => {
                match self.session.search(&self.directory, &query) {
                    Ok(record) => writeln!(out, "selected {}", record.display_line())?,
                    Err(_) => self.print_message(out)?,
                }
            }
            SessionCommand::Select(query) => {
                match self.session.search(&self.directory, &query) {
                    Ok(record) => {
                        self.session.select(record.clone());
                        writeln!(out, "selected {}", record.display_line())?
                    }
                    Err(_) => self.print_message(out)?,
                }
            }
            SessionCommand::Suggest(query) => {
                let matches = self
                    .session
                    .suggest(&self.directory, &query, SUGGESTION_LIMIT);
                for record in matches {
                    writeln!(out, "  {}", record.display_line())?;
                }
                self.print_message(out)?;
            }
            SessionCommand::Mobile(text) => {
                self.session.set_mobile_input(text);
                writeln!(out, "mobile: {}", self.session.overrides().mobile)?;
            }
            SessionCommand::Line(text) => self.session.set_messaging_id(text),
            SessionCommand::Toggle(field) => {
                let visible = self.session.toggle_field(field);
                writeln!(out, "{}: {}", field.label(), on_off(visible))?;
            }
            SessionCommand::Show(field) => self.session.set_field(field, true),
            SessionCommand::Hide(field) => self.session.set_field(field, false),
            SessionCommand::Extension(visible) => {
                self.session.set_miaoli_extension_visible(visible)
            }
            SessionCommand::Click => {
                let face = self.session.click();
                writeln!(out, "face: {:?}", face)?;
            }
            SessionCommand::Drag(from, to) => {
                self.pointer = self.pointer.wrapping_add(1);
                self.session.pointer_down(self.pointer, from);
                let flipped = self.session.pointer_up(self.pointer, to);
                writeln!(
                    out,
                    "face: {:?}{}",
                    self.session.orientation(),
                    if flipped { " (flipped)" } else { "" }
                )?;
            }
            SessionCommand::View => {
                let measure = measurer(&self.config)?;
                match self
                    .session
                    .front_face(&self.config.company, measure.as_ref())
                {
                    Some(face) => {
                        writeln!(out, "face: {:?}", self.session.orientation())?;
                        write!(out, "{}", describe_front(&face))?;
                    }
                    None => writeln!(out, "no employee selected")?,
                }
            }
            SessionCommand::Export(path) => self.export(path, out)?,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn export(&self, path: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
        let fonts = CardFonts::load(&self.config.fonts).context("failed to load card fonts")?;
        let face = self
            .session
            .front_face(&self.config.company, &fonts)
            .ok_or_else(|| anyhow!("no employee selected"))?;
        let assets = CardAssets::load(&self.config.assets)?;
        let options = RenderOptions {
            pixel_ratio: self.config.render.pixel_ratio,
        };
        let output = path.unwrap_or_else(|| PathBuf::from("."));
        let target = resolve_png_target(&output, &self.session.export_file_name())?;
        let image = render_face(self.session.orientation(), &face, &fonts, &assets, &options)?;
        let receipt = export_png(&image, &target)?;
        writeln!(
            out,
            "exported {} ({} bytes, sha256 {})",
            receipt.path.display(),
            receipt.bytes,
            receipt.sha256
        )?;
        Ok(())
    }

    fn print_message(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(message) = self.session.message() {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }
}

fn on_off(visible: bool) -> &'static str {
    if visible { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> SessionState {
        let directory = Directory::from_json(
            r#"[{"員工編號": "E0007", "員工姓名(中)": "王小明", "員工姓名(英)": "Ming Wang",
                 "職位(中)": "工程師", "職位(英)": "Engineer"}]"#,
        )
        .unwrap();
        SessionState::new(Config::default(), directory)
    }

    fn run(state: &mut SessionState, line: &str) -> String {
        let mut out = Vec::new();
        let command = parse_command(line).unwrap().unwrap();
        state.apply(command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("# note").unwrap(), None);
        assert_eq!(
            parse_command("search E0007").unwrap(),
            Some(SessionCommand::Search("E0007".into()))
        );
        assert_eq!(
            parse_command("toggle taipei-phone").unwrap(),
            Some(SessionCommand::Toggle(OptionalField::TaipeiPhone))
        );
        assert_eq!(
            parse_command("drag 10 75.5").unwrap(),
            Some(SessionCommand::Drag(10.0, 75.5))
        );
        assert_eq!(parse_command("export").unwrap(), Some(SessionCommand::Export(None)));
        assert!(parse_command("drag 10").is_err());
        assert!(parse_command("ext maybe").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn search_miss_prints_message() {
        let mut state = state();
        assert_eq!(
            run(&mut state, "search E9999"),
            "員工編號錯誤或尚未建檔，請確認員工編號或聯繫資安課\n"
        );
        assert_eq!(run(&mut state, "search"), "請輸入員工編號\n");
    }

    #[test]
    fn select_clears_input_but_search_keeps_it() {
        let mut state = state();
        run(&mut state, "search E0007");
        run(&mut state, "mobile 0912345678");
        run(&mut state, "search E0007");
        assert_eq!(state.session.mobile_input(), "0912345678");
        assert_eq!(run(&mut state, "select E0007"), "selected E0007 王小明 Ming Wang\n");
        assert!(state.session.mobile_input().is_empty());
    }

    #[test]
    fn gestures_flip_the_face() {
        let mut state = state();
        run(&mut state, "search E0007");
        assert_eq!(run(&mut state, "drag 0 30"), "face: Front\n");
        assert_eq!(run(&mut state, "drag 0 60"), "face: Back (flipped)\n");
        assert_eq!(run(&mut state, "click"), "face: Front\n");
    }

    #[test]
    fn view_lists_mobile_after_entry() {
        let mut state = state();
        run(&mut state, "search E0007");
        assert_eq!(run(&mut state, "mobile 0912345678"), "mobile: 0912-345-678\n");
        let view = run(&mut state, "view");
        assert!(view.contains("手機：0912-345-678"));
        assert!(view.contains("王小明"));
    }
}
