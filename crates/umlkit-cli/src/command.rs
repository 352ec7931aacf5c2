//! Parsing of REPL command lines.
//!
//! A line is split on whitespace; the first token names the command and the
//! rest are its positional arguments. Parsing only checks the argument count.
//! Whether the named classes and members exist is left to the diagram.

use thiserror::Error;

/// A parse failure for one command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' to see the instructions")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(String),
}

/// One REPL command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddClass { class: String },
    DeleteClass { class: String },
    RenameClass { class: String, new_name: String },

    AddField {
        class: String,
        field: String,
        field_type: String,
    },
    DeleteField { class: String, field: String },
    RenameField {
        class: String,
        field: String,
        new_name: String,
    },
    FieldType {
        class: String,
        field: String,
        field_type: String,
    },

    AddMethod { class: String, method: String },
    DeleteMethod { class: String, method: String },
    RenameMethod {
        class: String,
        method: String,
        new_name: String,
    },

    AddParam {
        class: String,
        method: String,
        param: String,
    },
    DeleteParam {
        class: String,
        method: String,
        param: String,
    },
    RenameParam {
        class: String,
        method: String,
        param: String,
        new_name: String,
    },
    ReplaceParams {
        class: String,
        method: String,
        params: Vec<String>,
    },

    AddRel {
        source: String,
        destination: String,
        kind: String,
    },
    DeleteRel { source: String, destination: String },
    TypeMod {
        source: String,
        destination: String,
        kind: String,
    },

    ListClasses,
    ClassDetail { class: String },
    ListRelationships,
    SavedList,

    /// Save under a name, or back to the active file when none is given.
    Save { name: Option<String> },
    Load { name: String },
    DeleteSaved { name: String },
    ClearData,
    Default,

    Sort,
    Help,
    Exit,
}

/// Verb, argument synopsis and description for every command.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("add_class", "<class>", "add a class"),
    ("delete_class", "<class>", "delete a class and its relationships"),
    ("rename_class", "<class> <new_name>", "rename a class"),
    ("add_field", "<class> <field> [type]", "add a field"),
    ("delete_field", "<class> <field>", "delete a field"),
    ("rename_field", "<class> <field> <new_name>", "rename a field"),
    ("field_type", "<class> <field> <type>", "change the type of a field"),
    ("add_method", "<class> <method>", "add a method"),
    ("delete_method", "<class> <method>", "delete a method and its parameters"),
    ("rename_method", "<class> <method> <new_name>", "rename a method"),
    ("add_param", "<class> <method> <param>", "add a parameter"),
    ("delete_param", "<class> <method> <param>", "delete a parameter"),
    ("rename_param", "<class> <method> <param> <new_name>", "rename a parameter"),
    ("replace_param", "<class> <method> [params...]", "replace a method's parameter list"),
    ("add_rel", "<source> <destination> <type>", "add a relationship"),
    ("delete_rel", "<source> <destination>", "delete a relationship"),
    ("type_mod", "<source> <destination> <type>", "change the type of a relationship"),
    ("list_class", "", "list all classes"),
    ("class_detail", "<class>", "show the fields and methods of a class"),
    ("class_rel", "", "list all relationships"),
    ("saved_list", "", "list saved files"),
    ("save", "[name]", "save the diagram, to the active file if no name is given"),
    ("load", "<name>", "load a saved file, replacing the current diagram"),
    ("delete_saved", "<name>", "delete a saved file"),
    ("clear_data", "", "delete all data in the current diagram"),
    ("default", "", "go back to a blank program with no active file"),
    ("sort", "", "sort the class list alphabetically"),
    ("help", "", "show these instructions"),
    ("exit", "", "quit the program"),
];

impl Command {
    /// Parses one line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Unknown` for an unrecognized verb and
    /// `CommandError::Usage` when the argument count is wrong.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let command = match (verb, args.as_slice()) {
            ("add_class", [class]) => Self::AddClass {
                class: class.clone(),
            },
            ("delete_class", [class]) => Self::DeleteClass {
                class: class.clone(),
            },
            ("rename_class", [class, new_name]) => Self::RenameClass {
                class: class.clone(),
                new_name: new_name.clone(),
            },

            ("add_field", [class, field]) => Self::AddField {
                class: class.clone(),
                field: field.clone(),
                field_type: String::new(),
            },
            ("add_field", [class, field, field_type]) => Self::AddField {
                class: class.clone(),
                field: field.clone(),
                field_type: field_type.clone(),
            },
            ("delete_field", [class, field]) => Self::DeleteField {
                class: class.clone(),
                field: field.clone(),
            },
            ("rename_field", [class, field, new_name]) => Self::RenameField {
                class: class.clone(),
                field: field.clone(),
                new_name: new_name.clone(),
            },
            ("field_type", [class, field, field_type]) => Self::FieldType {
                class: class.clone(),
                field: field.clone(),
                field_type: field_type.clone(),
            },

            ("add_method", [class, method]) => Self::AddMethod {
                class: class.clone(),
                method: method.clone(),
            },
            ("delete_method", [class, method]) => Self::DeleteMethod {
                class: class.clone(),
                method: method.clone(),
            },
            ("rename_method", [class, method, new_name]) => Self::RenameMethod {
                class: class.clone(),
                method: method.clone(),
                new_name: new_name.clone(),
            },

            ("add_param", [class, method, param]) => Self::AddParam {
                class: class.clone(),
                method: method.clone(),
                param: param.clone(),
            },
            ("delete_param", [class, method, param]) => Self::DeleteParam {
                class: class.clone(),
                method: method.clone(),
                param: param.clone(),
            },
            ("rename_param", [class, method, param, new_name]) => Self::RenameParam {
                class: class.clone(),
                method: method.clone(),
                param: param.clone(),
                new_name: new_name.clone(),
            },
            ("replace_param", [class, method, params @ ..]) => Self::ReplaceParams {
                class: class.clone(),
                method: method.clone(),
                params: params.to_vec(),
            },

            ("add_rel", [source, destination, kind]) => Self::AddRel {
                source: source.clone(),
                destination: destination.clone(),
                kind: kind.clone(),
            },
            ("delete_rel", [source, destination]) => Self::DeleteRel {
                source: source.clone(),
                destination: destination.clone(),
            },
            ("type_mod", [source, destination, kind]) => Self::TypeMod {
                source: source.clone(),
                destination: destination.clone(),
                kind: kind.clone(),
            },

            ("list_class", []) => Self::ListClasses,
            ("class_detail", [class]) => Self::ClassDetail {
                class: class.clone(),
            },
            ("class_rel", []) => Self::ListRelationships,
            ("saved_list", []) => Self::SavedList,

            ("save", []) => Self::Save { name: None },
            ("save", [name]) => Self::Save {
                name: Some(name.clone()),
            },
            ("load", [name]) => Self::Load { name: name.clone() },
            ("delete_saved", [name]) => Self::DeleteSaved { name: name.clone() },
            ("clear_data", []) => Self::ClearData,
            ("default", []) => Self::Default,

            ("sort", []) => Self::Sort,
            ("help", []) => Self::Help,
            ("exit", []) => Self::Exit,

            (verb, _) => return Err(usage_error(verb)),
        };

        Ok(Some(command))
    }
}

fn usage_error(verb: &str) -> CommandError {
    match COMMANDS.iter().find(|(name, _, _)| *name == verb) {
        Some((name, args, _)) if args.is_empty() => CommandError::Usage(name.to_string()),
        Some((name, args, _)) => CommandError::Usage(format!("{name} {args}")),
        None => CommandError::Unknown(verb.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_parse_with_extra_whitespace() {
        assert_eq!(
            Command::parse("  rename_class   Animal  Creature ").unwrap(),
            Some(Command::RenameClass {
                class: "Animal".to_string(),
                new_name: "Creature".to_string(),
            })
        );
    }

    #[test]
    fn test_add_field_type_is_optional() {
        assert_eq!(
            Command::parse("add_field Dog name").unwrap(),
            Some(Command::AddField {
                class: "Dog".to_string(),
                field: "name".to_string(),
                field_type: String::new(),
            })
        );
        assert_eq!(
            Command::parse("add_field Dog name String").unwrap(),
            Some(Command::AddField {
                class: "Dog".to_string(),
                field: "name".to_string(),
                field_type: "String".to_string(),
            })
        );
    }

    #[test]
    fn test_replace_param_takes_any_count() {
        assert_eq!(
            Command::parse("replace_param Dog bark").unwrap(),
            Some(Command::ReplaceParams {
                class: "Dog".to_string(),
                method: "bark".to_string(),
                params: vec![],
            })
        );
        let Some(Command::ReplaceParams { params, .. }) =
            Command::parse("replace_param Dog bark a b c").unwrap()
        else {
            panic!("Expected ReplaceParams");
        };
        assert_eq!(params, ["a", "b", "c"]);
    }

    #[test]
    fn test_save_name_is_optional() {
        assert_eq!(
            Command::parse("save").unwrap(),
            Some(Command::Save { name: None })
        );
        assert_eq!(
            Command::parse("save zoo").unwrap(),
            Some(Command::Save {
                name: Some("zoo".to_string())
            })
        );
    }

    #[test]
    fn test_wrong_arity_reports_usage() {
        assert_eq!(
            Command::parse("add_class").unwrap_err(),
            CommandError::Usage("add_class <class>".to_string())
        );
        assert_eq!(
            Command::parse("list_class now").unwrap_err(),
            CommandError::Usage("list_class".to_string())
        );
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            Command::parse("fly Dog").unwrap_err(),
            CommandError::Unknown("fly".to_string())
        );
    }

    #[test]
    fn test_every_listed_verb_parses() {
        for (verb, _, _) in COMMANDS {
            let err = Command::parse(&format!("{verb} a b c d e")).err();
            assert!(
                !matches!(err, Some(CommandError::Unknown(_))),
                "{verb} is listed but not parsed"
            );
        }
    }
}
