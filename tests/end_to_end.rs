use myshell::{
    CommandRegistry, CompletionOutcome, Config, Dispatcher, Flow, LineEditor, ReadOutcome,
    ShellCompleter, ShellError, parse_command, tokenize,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Feeds `keys` through the editor and runs the resulting line inside `dir`.
fn run_keys(dir: &Path, registry: &CommandRegistry, keys: &str) -> Result<Flow, ShellError> {
    let editor = LineEditor::new(ShellCompleter::new(registry), "$ ");
    let mut echo = Vec::<u8>::new();
    let line = match editor.read_from(&mut Cursor::new(keys.as_bytes().to_vec()), &mut echo)? {
        ReadOutcome::Line(line) => line,
        ReadOutcome::Interrupted => panic!("unexpected interrupt"),
    };

    let mut cmd = parse_command(tokenize(line.trim()));
    cmd.stdout_target = cmd.stdout_target.map(|p| dir.join(p));
    cmd.stderr_target = cmd.stderr_target.map(|p| dir.join(p));

    let config = Config::from_env();
    Dispatcher::new(&config).execute(&cmd)
}

#[test]
fn echo_with_stderr_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CommandRegistry::from_names(["echo"]);
    run_keys(dir.path(), &registry, "echo foo bar > out.txt 2> err.txt\r").unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "foo bar\n");
    assert_eq!(fs::read_to_string(dir.path().join("err.txt")).unwrap(), "");
}

#[test]
fn completed_command_runs() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CommandRegistry::from_names(["echo", "exit", "type"]);
    run_keys(dir.path(), &registry, "ech\t'a  b' \"c\\\"d\" >> log.txt\r").unwrap();
    run_keys(dir.path(), &registry, "ech\tagain 1>> log.txt\r").unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("log.txt")).unwrap(),
        "a  b c\"d\nagain\n"
    );
}

#[test]
fn type_reports_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CommandRegistry::from_names(["type"]);
    run_keys(dir.path(), &registry, "type exit > type.txt\r").unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("type.txt")).unwrap(),
        "exit is a shell builtin\n"
    );
}

#[test]
fn unknown_command_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CommandRegistry::default();
    let err = run_keys(dir.path(), &registry, "zzzznotacommand\r").unwrap_err();
    assert_eq!(err.to_string(), "zzzznotacommand: command not found");

    // The shell carries on with the next line.
    let flow = run_keys(dir.path(), &registry, "exit\r").unwrap();
    assert_eq!(flow, Flow::Exit);
}

#[test]
fn blank_line_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CommandRegistry::default();
    assert_eq!(run_keys(dir.path(), &registry, "   \r").unwrap(), Flow::Continue);
}

#[test]
fn scanned_registry_completes_builtins() {
    let registry = CommandRegistry::scan(&[]);
    let completer = ShellCompleter::new(&registry);
    assert_eq!(
        completer.complete("ech"),
        CompletionOutcome::DirectMatch("o ".into())
    );
    assert_eq!(
        completer.complete("e"),
        CompletionOutcome::MultiMatch(vec!["echo".into(), "exit".into()])
    );
}
