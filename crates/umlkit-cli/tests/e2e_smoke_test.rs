use std::{fs, io::Cursor, path::Path};

use tempfile::tempdir;

use umlkit::{RelationshipKind, config::AppConfig};
use umlkit_cli::{Args, Session, run, run_interactive, run_script};

fn session_in(dir: &Path) -> Session {
    let config = AppConfig::default().with_storage_directory(dir);
    Session::new(&config).expect("Failed to open session")
}

fn run_lines(session: &mut Session, script: &str) -> String {
    let mut output = Vec::new();
    run_script(session, Cursor::new(script), &mut output).expect("Script failed");
    String::from_utf8(output).expect("Output is not UTF-8")
}

#[test]
fn e2e_build_rename_and_inspect() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut session = session_in(temp_dir.path());

    let output = run_lines(
        &mut session,
        "add_class Animal
         add_class Dog
         add_field Dog name String
         add_method Dog bark
         replace_param Dog bark times loudness
         add_rel Dog Animal inheritance
         rename_class Animal Creature
         class_rel
         class_detail Dog
        ",
    );

    assert!(output.contains("Renamed class 'Animal' to 'Creature'"));
    assert!(output.contains("  Dog -> Creature (Inheritance)"));
    assert!(output.contains("    String name"));
    assert!(output.contains("    bark(times, loudness)"));
    assert!(!output.contains("error:"), "unexpected error in:\n{output}");

    let rel = session.manager().relationship("Dog", "Creature").unwrap();
    assert_eq!(rel.kind, RelationshipKind::Inheritance);
}

#[test]
fn e2e_failures_are_reported_and_change_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut session = session_in(temp_dir.path());

    let output = run_lines(
        &mut session,
        "add_class A
         add_class A
         add_field Ghost x int
         add_method A run
         replace_param A run x x
         add_rel A A Friendship
         fly away
         add_class
        ",
    );

    assert_eq!(output.matches("error:").count(), 6, "output:\n{output}");
    assert!(output.contains("error: class 'A' already exists"));
    assert!(output.contains("error: class 'Ghost' does not exist"));
    assert!(output.contains("error: usage: add_class <class>"));

    assert_eq!(session.manager().store().len(), 1);
    let run = session.manager().class("A").unwrap().method("run").unwrap();
    assert!(run.parameters().is_empty());
    assert!(session.manager().graph().is_empty());
}

#[test]
fn e2e_save_load_and_session_reset() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut session = session_in(temp_dir.path());

    let output = run_lines(
        &mut session,
        "add_class A
         add_class B
         add_rel A B Composition
         save zoo
         add_class C
         save
         default
         list_class
         load zoo
         saved_list
        ",
    );

    assert!(!output.contains("error:"), "unexpected error in:\n{output}");
    assert!(temp_dir.path().join("zoo.json").is_file());
    assert!(output.contains("No classes."));
    assert!(output.contains("Saved files:\n  zoo\n"));

    assert!(session.manager().class("C").is_some());
    assert!(session.manager().relationship("A", "B").is_some());
    assert_eq!(session.storage().active_file(), Some("zoo"));

    let output = run_lines(&mut session, "delete_saved zoo\nload zoo\n");
    assert!(output.contains("error: Storage error: no saved diagram named 'zoo'"));
    assert_eq!(session.storage().active_file(), None);
}

#[test]
fn e2e_exit_stops_reading() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut session = session_in(temp_dir.path());

    let output = run_lines(&mut session, "add_class A\nexit\nadd_class B\n");

    assert!(output.ends_with("Goodbye!\n"));
    assert!(session.manager().class("B").is_none());
}

#[test]
fn e2e_interactive_prompt_shows_active_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut session = session_in(temp_dir.path());

    let mut output = Vec::new();
    run_interactive(
        &mut session,
        Cursor::new("add_class A\nsave zoo\n"),
        &mut output,
    )
    .expect("Interactive run failed");
    let output = String::from_utf8(output).expect("Output is not UTF-8");

    assert!(output.contains("(Current active file: No active file!)"));
    assert!(output.contains("(Current active file: zoo.json)"));
}

#[test]
fn e2e_run_script_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storage_dir = temp_dir.path().join("diagrams");
    let script_path = temp_dir.path().join("build.txt");
    fs::write(
        &script_path,
        "add_class Shape\nadd_class Circle\nadd_rel Circle Shape Realization\nsave shapes\n",
    )
    .expect("Failed to write script");

    let args = Args {
        script: Some(script_path.to_string_lossy().to_string()),
        config: None,
        storage_dir: Some(storage_dir.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };

    run(&args).expect("CLI run failed");

    let saved = fs::read_to_string(storage_dir.join("shapes.json")).expect("Missing saved file");
    assert!(saved.contains("\"Realization\""));
    assert!(storage_dir.join("saved_list.json").is_file());
}
