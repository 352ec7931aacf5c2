//! CLI logic for the UMLKit class diagram editor.
//!
//! The binary is a line-oriented REPL. Each line is parsed into a
//! [`Command`] and dispatched to the diagram or the storage directory by a
//! [`Session`]. A failing command is reported and leaves the diagram as it
//! was; only I/O failures on the output stop the loop.

pub mod error_adapter;

mod args;
mod command;
mod config;
mod display;

pub use args::Args;
pub use command::{COMMANDS, Command, CommandError};

use std::{
    fs,
    io::{self, BufRead, BufReader, Write},
};

use log::{debug, info, warn};

use umlkit::{
    DiagramManager, RelationshipKind, UmlError,
    config::{AppConfig, DisplayConfig},
    persistence::Storage,
};

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One editing session: the in-memory diagram, the storage directory it is
/// saved to, and presentation settings.
#[derive(Debug)]
pub struct Session {
    manager: DiagramManager,
    storage: Storage,
    display: DisplayConfig,
}

impl Session {
    /// Opens the configured storage directory and starts with a blank diagram.
    ///
    /// # Errors
    ///
    /// Returns `UmlError` if the storage directory cannot be opened.
    pub fn new(config: &AppConfig) -> Result<Self, UmlError> {
        Ok(Self {
            manager: DiagramManager::new(),
            storage: Storage::open(config.storage())?,
            display: config.display().clone(),
        })
    }

    pub fn manager(&self) -> &DiagramManager {
        &self.manager
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Parses and runs one line, reporting the outcome to `out`.
    ///
    /// # Errors
    ///
    /// Returns `UmlError::Io` only if writing to `out` fails. Command
    /// failures are written to `out` as `error: ...` lines.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow, UmlError> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        debug!(command:?; "Executing command");
        match self.execute(&command, out) {
            Ok(flow) => Ok(flow),
            Err(UmlError::Io(err)) => Err(UmlError::Io(err)),
            Err(err) => {
                info!(command:?, error:% = err; "Command rejected");
                writeln!(out, "error: {err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs one parsed command.
    ///
    /// # Errors
    ///
    /// Returns the model, storage or I/O error that stopped the command.
    pub fn execute(&mut self, command: &Command, out: &mut impl Write) -> Result<Flow, UmlError> {
        let manager = &mut self.manager;
        let message = match command {
            Command::AddClass { class } => {
                manager.add_class(class)?;
                format!("Added class '{class}'")
            }
            Command::DeleteClass { class } => {
                manager.delete_class(class)?;
                format!("Deleted class '{class}'")
            }
            Command::RenameClass { class, new_name } => {
                manager.rename_class(class, new_name)?;
                format!("Renamed class '{class}' to '{new_name}'")
            }

            Command::AddField {
                class,
                field,
                field_type,
            } => {
                manager.add_field(class, field, field_type)?;
                format!("Added field '{field}' to class '{class}'")
            }
            Command::DeleteField { class, field } => {
                manager.delete_field(class, field)?;
                format!("Deleted field '{field}' from class '{class}'")
            }
            Command::RenameField {
                class,
                field,
                new_name,
            } => {
                manager.rename_field(class, field, new_name)?;
                format!("Renamed field '{field}' to '{new_name}' in class '{class}'")
            }
            Command::FieldType {
                class,
                field,
                field_type,
            } => {
                manager.change_field_type(class, field, field_type)?;
                format!("Changed type of field '{field}' in class '{class}' to '{field_type}'")
            }

            Command::AddMethod { class, method } => {
                manager.add_method(class, method)?;
                format!("Added method '{method}' to class '{class}'")
            }
            Command::DeleteMethod { class, method } => {
                manager.delete_method(class, method)?;
                format!("Deleted method '{method}' from class '{class}'")
            }
            Command::RenameMethod {
                class,
                method,
                new_name,
            } => {
                manager.rename_method(class, method, new_name)?;
                format!("Renamed method '{method}' to '{new_name}' in class '{class}'")
            }

            Command::AddParam {
                class,
                method,
                param,
            } => {
                manager.add_parameter(class, method, param)?;
                format!("Added parameter '{param}' to method '{class}.{method}'")
            }
            Command::DeleteParam {
                class,
                method,
                param,
            } => {
                manager.delete_parameter(class, method, param)?;
                format!("Deleted parameter '{param}' from method '{class}.{method}'")
            }
            Command::RenameParam {
                class,
                method,
                param,
                new_name,
            } => {
                manager.rename_parameter(class, method, param, new_name)?;
                format!("Renamed parameter '{param}' to '{new_name}' in method '{class}.{method}'")
            }
            Command::ReplaceParams {
                class,
                method,
                params,
            } => {
                manager.replace_parameters(class, method, params.as_slice())?;
                format!("Replaced parameters of method '{class}.{method}'")
            }

            Command::AddRel {
                source,
                destination,
                kind,
            } => {
                let kind: RelationshipKind = kind.parse()?;
                manager.add_relationship(source, destination, kind)?;
                format!("Added {kind} relationship from '{source}' to '{destination}'")
            }
            Command::DeleteRel {
                source,
                destination,
            } => {
                manager.delete_relationship(source, destination)?;
                format!("Deleted relationship from '{source}' to '{destination}'")
            }
            Command::TypeMod {
                source,
                destination,
                kind,
            } => {
                let kind: RelationshipKind = kind.parse()?;
                manager.change_relationship_kind(source, destination, kind)?;
                format!("Changed relationship from '{source}' to '{destination}' to {kind}")
            }

            Command::ListClasses => {
                display::write_class_list(out, manager, self.display.sort_classes())?;
                return Ok(Flow::Continue);
            }
            Command::ClassDetail { class } => {
                let class = manager.validator().require_class(class)?;
                display::write_class_detail(out, class)?;
                return Ok(Flow::Continue);
            }
            Command::ListRelationships => {
                display::write_relationships(out, manager)?;
                return Ok(Flow::Continue);
            }
            Command::SavedList => {
                display::write_saved_list(out, self.storage.list_saved())?;
                return Ok(Flow::Continue);
            }

            Command::Save { name } => {
                let path = match name {
                    Some(name) => self.storage.save(manager, name)?,
                    None => self.storage.save_active(manager)?,
                };
                format!("Saved to {}", path.display())
            }
            Command::Load { name } => {
                let (loaded, report) = self.storage.load(name)?;
                *manager = loaded;
                for skipped in report.skipped() {
                    writeln!(out, "warning: skipped {skipped}")?;
                }
                format!("Loaded '{name}'")
            }
            Command::DeleteSaved { name } => {
                self.storage.delete_saved(name)?;
                format!("Deleted saved file '{name}'")
            }
            Command::ClearData => {
                self.storage.clear_active_data(manager);
                "Cleared all data in the current diagram".to_string()
            }
            Command::Default => {
                self.storage.end_session(manager);
                "Back to a blank program".to_string()
            }

            Command::Sort => {
                manager.sort_classes();
                "Sorted the class list".to_string()
            }
            Command::Help => {
                display::write_help(out)?;
                return Ok(Flow::Continue);
            }
            Command::Exit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
        };

        writeln!(out, "{message}")?;
        Ok(Flow::Continue)
    }
}

/// Runs every line of `input` through the session, without prompts.
///
/// Stops at end of input or at an `exit` command.
///
/// # Errors
///
/// Returns `UmlError::Io` if reading `input` or writing `output` fails.
pub fn run_script<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> Result<(), UmlError> {
    for line in input.lines() {
        if session.handle_line(&line?, output)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs the interactive prompt until `exit` or end of input.
///
/// Before each command the active file is shown, or a marker when there is
/// none.
///
/// # Errors
///
/// Returns `UmlError::Io` if reading `input` or writing `output` fails.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    output: &mut W,
) -> Result<(), UmlError> {
    writeln!(output, "Welcome to UMLKit! Type 'help' to see the instructions.")?;

    let mut line = String::new();
    loop {
        write!(
            output,
            "\n(Current active file: {})\n==> ",
            session.storage().session()
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        if session.handle_line(&line, output)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Run the UMLKit CLI application
///
/// Loads the configuration, opens the storage directory, and then reads
/// commands from the script file if one was given, otherwise from the
/// interactive prompt.
///
/// # Errors
///
/// Returns `UmlError` for:
/// - Configuration loading errors
/// - Storage directory errors
/// - Script file and terminal I/O errors
pub fn run(args: &Args) -> Result<(), UmlError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(directory) = &args.storage_dir {
        app_config = app_config.with_storage_directory(directory);
    }

    info!(
        storage_dir = app_config.storage().directory().display().to_string();
        "Starting session"
    );
    let mut session = Session::new(&app_config)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match &args.script {
        Some(path) => {
            let file = fs::File::open(path)?;
            run_script(&mut session, BufReader::new(file), &mut output)?;
        }
        None => run_interactive(&mut session, io::stdin().lock(), &mut output)?,
    }

    if !session.manager().is_empty() && session.storage().active_file().is_none() {
        warn!("Exiting with unsaved diagram data");
    }
    Ok(())
}
