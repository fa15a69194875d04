//! Line commands driving the shell from a terminal.

use crate::app::{App, AppResult};
use crate::event_handler::InputEvent;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiAction, render_ui};
use drawboard_core::decode::DroppedFile;
use drawboard_core::editor::EditOutcome;
use drawboard_core::input::{Key, Modifiers};
use drawboard_core::session::Route;
use drawboard_core::shapes::{FontFamily, SerializableColor};
use drawboard_core::storage::Storage;
use drawboard_core::tools::ToolKind;
use kurbo::Point;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Page navigation subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Prev,
    Next,
    Add,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Projects,
    New(String),
    Open(String),
    /// Go to a path such as `/project/<id>`.
    Navigate(Route),
    Clear { confirmed: bool },
    Action(UiAction),
    Pointer(InputEvent),
    Key { key: Key, modifiers: Modifiers },
    Text(String),
    Page(PageCommand),
    Drop(Vec<PathBuf>),
    Scene,
    Status,
    Shortcuts,
    Quit,
}

fn parse_number(value: Option<&str>, usage: &'static str) -> Result<f64, CommandError> {
    let value = value.ok_or(CommandError::Usage(usage))?;
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| CommandError::InvalidValue(value.to_string()))
}

fn parse_point<'a>(
    mut args: impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<Point, CommandError> {
    let x = parse_number(args.next(), usage)?;
    let y = parse_number(args.next(), usage)?;
    Ok(Point::new(x, y))
}

fn rest(line: &str, usage: &'static str) -> Result<String, CommandError> {
    let rest = line
        .trim()
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    if rest.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(rest.to_string())
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "login" => {
                const USAGE: &str = "login <username> <password>";
                let username = words.next().ok_or(CommandError::Usage(USAGE))?;
                let password = words.next().ok_or(CommandError::Usage(USAGE))?;
                Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "projects" | "back" => Command::Projects,
            "new" => Command::New(rest(line, "new <title>")?),
            "open" => {
                let target = words
                    .next()
                    .ok_or(CommandError::Usage("open <project-id>|<path>"))?;
                if target.starts_with('/') {
                    let route = Route::from_path(target)
                        .ok_or_else(|| CommandError::InvalidValue(target.to_string()))?;
                    Command::Navigate(route)
                } else {
                    Command::Open(target.to_string())
                }
            }
            "clear" => Command::Clear {
                confirmed: matches!(words.next(), Some("yes" | "y")),
            },
            "tool" => {
                let value = words.next().ok_or(CommandError::Usage("tool <name>"))?;
                let tool = value
                    .parse::<ToolKind>()
                    .map_err(|_| CommandError::InvalidValue(value.to_string()))?;
                Command::Action(UiAction::SetTool(tool))
            }
            "color" => {
                let value = words.next().ok_or(CommandError::Usage("color <#rrggbb>"))?;
                let color = SerializableColor::from_hex(value)
                    .ok_or_else(|| CommandError::InvalidValue(value.to_string()))?;
                Command::Action(UiAction::SetColor(color))
            }
            "thickness" => Command::Action(UiAction::SetThickness(parse_number(
                words.next(),
                "thickness <1-20>",
            )?)),
            "zoom" => Command::Action(UiAction::SetZoom(parse_number(
                words.next(),
                "zoom <0.5-2.0>",
            )?)),
            "font-size" => Command::Action(UiAction::SetFontSize(parse_number(
                words.next(),
                "font-size <10-100>",
            )?)),
            "font" => {
                let value = rest(line, "font <family>")?;
                let family = value.parse::<FontFamily>().map_err(CommandError::InvalidValue)?;
                Command::Action(UiAction::SetFontFamily(family))
            }
            "down" => Command::Pointer(InputEvent::PointerDown(parse_point(words, "down <x> <y>")?)),
            "move" => Command::Pointer(InputEvent::PointerMove(parse_point(words, "move <x> <y>")?)),
            "up" => Command::Pointer(InputEvent::PointerUp(parse_point(words, "up <x> <y>")?)),
            "dblclick" => Command::Pointer(InputEvent::DoubleClick(parse_point(
                words,
                "dblclick <x> <y>",
            )?)),
            "blur" => Command::Pointer(InputEvent::Blur),
            "key" => {
                const USAGE: &str = "key <name> [ctrl] [shift]";
                let value = words.next().ok_or(CommandError::Usage(USAGE))?;
                let key = Key::from_name(value)
                    .ok_or_else(|| CommandError::InvalidValue(value.to_string()))?;
                let mut modifiers = Modifiers::NONE;
                for modifier in words {
                    match modifier.to_ascii_lowercase().as_str() {
                        "ctrl" => modifiers.ctrl = true,
                        "shift" => modifiers.shift = true,
                        "alt" => modifiers.alt = true,
                        "meta" | "cmd" => modifiers.meta = true,
                        other => return Err(CommandError::InvalidValue(other.to_string())),
                    }
                }
                Command::Key { key, modifiers }
            }
            "text" => Command::Text(rest(line, "text <content>")?),
            "undo" => Command::Action(UiAction::Undo),
            "redo" => Command::Action(UiAction::Redo),
            "forward" => Command::Action(UiAction::BringForward),
            "backward" => Command::Action(UiAction::SendBackward),
            "page" => match words.next() {
                Some("prev") => Command::Page(PageCommand::Prev),
                Some("next") => Command::Page(PageCommand::Next),
                Some("add") => Command::Page(PageCommand::Add),
                _ => return Err(CommandError::Usage("page prev|next|add")),
            },
            "drop" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(CommandError::Usage("drop <file>..."));
                }
                Command::Drop(paths)
            }
            "scene" => Command::Scene,
            "status" => Command::Status,
            "help" | "shortcuts" => Command::Shortcuts,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl<S: Storage> App<S> {
    /// Run one command and return the text to show.
    pub fn execute(&mut self, command: Command) -> AppResult<String> {
        match command {
            Command::Login { username, password } => self.login(&username, &password)?,
            Command::Logout => self.logout(),
            Command::Projects => self.apply_action(UiAction::BackToProjects)?,
            Command::New(title) => self.apply_action(UiAction::CreateProject(title))?,
            Command::Open(id) => self.apply_action(UiAction::OpenProject(id))?,
            Command::Navigate(route) => self.navigate(route),
            Command::Clear { confirmed } => {
                if !self.clear_all(confirmed)? {
                    return Ok("Type `clear yes` to delete all projects".to_string());
                }
            }
            Command::Action(action) => self.apply_action(action)?,
            Command::Pointer(event) => {
                if let EditOutcome::TextPrompt(point) = self.handle_event(event)? {
                    return Ok(format!(
                        "Enter text for ({:.0}, {:.0}) with `text <content>`",
                        point.x, point.y
                    ));
                }
            }
            Command::Key { key, modifiers } => {
                self.handle_event(InputEvent::Key { key, modifiers })?;
            }
            Command::Text(content) => {
                self.submit_text(&content)?;
            }
            Command::Page(PageCommand::Prev) => self.prev_page()?,
            Command::Page(PageCommand::Next) => self.next_page()?,
            Command::Page(PageCommand::Add) => self.add_page()?,
            Command::Drop(paths) => {
                let mut files = Vec::new();
                for path in paths {
                    match std::fs::read(&path) {
                        Ok(bytes) => files.push(DroppedFile::from_name(
                            path.file_name()
                                .map(|name| name.to_string_lossy().into_owned())
                                .unwrap_or_default(),
                            bytes,
                        )),
                        Err(e) => log::warn!("Cannot read {}: {e}", path.display()),
                    }
                }
                self.handle_event(InputEvent::Drop(files))?;
            }
            Command::Scene => {
                return Ok(self.render()?.to_json()?);
            }
            Command::Status => {}
            Command::Shortcuts => {
                ShortcutRegistry::print_all();
                return Ok(String::new());
            }
            Command::Quit => return Ok(String::new()),
        }
        Ok(render_ui(self).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawboard_core::config::AppConfig;
    use drawboard_core::storage::{FileStorage, MemoryStorage};

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_parse_login_and_titles() {
        assert_eq!(
            parse("login admin 1234"),
            Ok(Command::Login {
                username: "admin".to_string(),
                password: "1234".to_string()
            })
        );
        assert_eq!(parse("new  My first sketch "), Ok(Command::New("My first sketch".to_string())));
        assert_eq!(parse("new"), Err(CommandError::Usage("new <title>")));
    }

    #[test]
    fn test_parse_toolbar() {
        assert_eq!(
            parse("tool rect"),
            Ok(Command::Action(UiAction::SetTool(ToolKind::Rectangle)))
        );
        assert_eq!(
            parse("font courier new"),
            Ok(Command::Action(UiAction::SetFontFamily(FontFamily::CourierNew)))
        );
        assert!(matches!(parse("color red"), Err(CommandError::InvalidValue(_))));
        assert!(matches!(parse("zoom fast"), Err(CommandError::InvalidValue(_))));
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for line in ["thickness NaN", "zoom inf", "font-size -inf", "down inf 0", "move 0 nan"] {
            assert!(
                matches!(parse(line), Err(CommandError::InvalidValue(_))),
                "{line} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_open_path() {
        assert_eq!(parse("open abc"), Ok(Command::Open("abc".to_string())));
        assert_eq!(
            parse("open /project/abc"),
            Ok(Command::Navigate(Route::Editor {
                project_id: "abc".to_string()
            }))
        );
        assert_eq!(parse("open /login"), Ok(Command::Navigate(Route::Login)));
        assert!(matches!(parse("open /nowhere"), Err(CommandError::InvalidValue(_))));
    }

    #[test]
    fn test_parse_pointer_and_keys() {
        assert_eq!(
            parse("down 10 20.5"),
            Ok(Command::Pointer(InputEvent::PointerDown(Point::new(10.0, 20.5))))
        );
        assert_eq!(
            parse("key z ctrl shift"),
            Ok(Command::Key {
                key: Key::Char('z'),
                modifiers: Modifiers::CTRL_SHIFT
            })
        );
        assert_eq!(parse("page next"), Ok(Command::Page(PageCommand::Next)));
        assert_eq!(parse("  "), Err(CommandError::Empty));
        assert_eq!(parse("paint"), Err(CommandError::Unknown("paint".to_string())));
    }

    #[test]
    fn test_execute_session_flow() {
        let mut app = App::new(AppConfig::default(), MemoryStorage::new()).unwrap();
        let screen = app.execute(parse("login admin 1234").unwrap()).unwrap();
        assert!(screen.contains("No projects yet"));

        let screen = app.execute(parse("new Sketch 1").unwrap()).unwrap();
        assert!(screen.contains("Sketch 1"));
        assert!(screen.contains("Page 1 / 1"));

        for line in ["down 10 10", "move 30 30", "up 30 30"] {
            app.execute(parse(line).unwrap()).unwrap();
        }
        let scene = app.execute(Command::Scene).unwrap();
        assert!(scene.contains("\"node\": \"Line\""));

        let prompt = app.execute(parse("clear").unwrap()).unwrap();
        assert!(prompt.contains("clear yes"));

        app.execute(parse("open /login").unwrap()).unwrap();
        assert_eq!(app.route(), &Route::Projects);
        app.execute(parse("open /project/missing").unwrap()).unwrap();
        assert_eq!(app.ui().message.as_deref(), Some("Project not found."));

        app.execute(Command::Logout).unwrap();
        assert_eq!(app.route(), &Route::Login);
    }

    #[test]
    fn test_non_finite_input_keeps_saved_projects() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
            App::new(AppConfig::default(), storage).unwrap()
        };

        {
            let mut app = open();
            app.execute(parse("login admin 1234").unwrap()).unwrap();
            app.execute(parse("new Keep").unwrap()).unwrap();
            for line in ["down 10 10", "move 50 50", "up 50 50"] {
                app.execute(parse(line).unwrap()).unwrap();
            }
            assert!(parse("thickness NaN").is_err());
            app.apply_action(UiAction::SetThickness(f64::NAN)).unwrap();
            app.apply_action(UiAction::SetZoom(f64::INFINITY)).unwrap();
            app.handle_event(InputEvent::PointerDown(Point::new(f64::INFINITY, 0.0)))
                .unwrap();
            for line in ["down 100 100", "move 120 120", "up 120 120"] {
                app.execute(parse(line).unwrap()).unwrap();
            }
            assert_eq!(app.current_page().map(|page| page.len()), Some(2));
        }

        let app = open();
        let projects = app.projects().unwrap();
        assert_eq!(projects.len(), 1);
        let project = projects.iter().next().unwrap();
        assert_eq!(project.pages[0].len(), 2);
    }
}
