use detective_quest::case_file::resolve_case;
use detective_quest::cli::{CliInterface, parse_cli};
use detective_quest::game_state::game_loop;
use detective_quest::logging::init_logging;
use detective_quest::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.verbose, cli.tui) {
        eprintln!("Failed to set up logging: {e}");
    }

    let case = match resolve_case(cli.case_path.as_deref()) {
        Ok(case) => case,
        Err(e) => {
            match &cli.case_path {
                Some(path) => eprintln!("Failed to load case from '{}': {e}", path.display()),
                None => eprintln!("Failed to load case: {e}"),
            }
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Loaded case: {} rooms, {} clue mappings",
        case.graph.len(),
        case.directory.len()
    );

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&case, &mut interface);
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&case, &mut interface);
    }
    ExitCode::SUCCESS
}
