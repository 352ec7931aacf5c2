//! Plain-text rendering of diagram contents for the REPL.

use std::io::{self, Write};

use umlkit::{DiagramManager, model::Class};

use crate::command::COMMANDS;

/// Writes class names, one per line, in list order or sorted by name.
pub fn write_class_list(
    out: &mut impl Write,
    manager: &DiagramManager,
    sorted: bool,
) -> io::Result<()> {
    if manager.store().is_empty() {
        return writeln!(out, "No classes.");
    }

    let classes: Vec<&Class> = if sorted {
        manager.sorted_classes()
    } else {
        manager.classes().collect()
    };

    writeln!(out, "Classes:")?;
    for class in classes {
        writeln!(out, "  {}", class.name())?;
    }
    Ok(())
}

/// Writes one class with its fields and methods.
pub fn write_class_detail(out: &mut impl Write, class: &Class) -> io::Result<()> {
    writeln!(out, "Class: {}", class.name())?;

    if class.fields().len() == 0 {
        writeln!(out, "  Fields: none")?;
    } else {
        writeln!(out, "  Fields:")?;
        for field in class.fields() {
            writeln!(out, "    {field}")?;
        }
    }

    if class.methods().len() == 0 {
        writeln!(out, "  Methods: none")?;
    } else {
        writeln!(out, "  Methods:")?;
        for method in class.methods() {
            writeln!(out, "    {method}")?;
        }
    }
    Ok(())
}

/// Writes every relationship as `source -> destination (Kind)`.
pub fn write_relationships(out: &mut impl Write, manager: &DiagramManager) -> io::Result<()> {
    if manager.graph().is_empty() {
        return writeln!(out, "No relationships.");
    }

    writeln!(out, "Relationships:")?;
    for rel in manager.relationships() {
        writeln!(out, "  {} -> {} ({})", rel.source, rel.destination, rel.kind)?;
    }
    Ok(())
}

pub fn write_saved_list(out: &mut impl Write, names: &[String]) -> io::Result<()> {
    if names.is_empty() {
        return writeln!(out, "No saved files.");
    }

    writeln!(out, "Saved files:")?;
    for name in names {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    let width = COMMANDS
        .iter()
        .map(|(verb, args, _)| verb.len() + args.len() + 1)
        .max()
        .unwrap_or_default();

    writeln!(out, "Commands:")?;
    for (verb, args, description) in COMMANDS {
        let synopsis = if args.is_empty() {
            verb.to_string()
        } else {
            format!("{verb} {args}")
        };
        writeln!(out, "  {synopsis:<width$}  {description}")?;
    }
    Ok(())
}
