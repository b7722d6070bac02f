use anyhow::{Context, Result};
use myshell::{
    CommandRegistry, Config, Dispatcher, Flow, LineEditor, ReadOutcome, ShellCompleter,
    logging, parse_command, tokenize,
};

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config.log)?;

    let registry = CommandRegistry::scan(&config.search_path);
    let editor = LineEditor::new(ShellCompleter::new(&registry), config.prompt.as_str());
    let dispatcher = Dispatcher::new(&config);

    loop {
        let line = match editor.read_line() {
            Ok(ReadOutcome::Line(line)) => line,
            Ok(ReadOutcome::Interrupted) => {
                log::info!("interrupted, exiting");
                std::process::exit(0);
            }
            Err(e) if e.is_fatal() => return Err(e).context("line editor"),
            Err(e) => {
                log::warn!("line editor: {}", e);
                eprintln!("{}", e);
                continue;
            }
        };

        let command = parse_command(tokenize(line.trim()));
        match dispatcher.execute(&command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                log::info!("exit");
                std::process::exit(0);
            }
            Err(e) if e.is_fatal() => return Err(e).context("running command"),
            Err(e) => eprintln!("{}", e),
        }
    }
}
