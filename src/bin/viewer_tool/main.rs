use std::io::{self, Write};

use dialoguer::console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use jxl_dopus_viewer::log::log_cli;

mod actions;
mod paths;

use actions::inspect::inspect;
use actions::install::install;
use actions::status::status;
use actions::toggle_logging::toggle_logging;
use actions::uninstall::uninstall;

fn main() -> io::Result<()> {
    log_cli("Viewer tool started");
    loop {
        let action = choose_action()?;
        log_cli(format!("Menu selection: {}", action.title()));

        if action == Action::Exit {
            log_cli("Viewer tool exiting");
            break;
        }

        match execute_action(action) {
            Ok(()) => log_cli(format!(
                "Action '{}' completed successfully",
                action.title()
            )),
            Err(err) => {
                log_cli(format!("Action '{}' failed: {}", action.title(), err));
                println!("{} {}", style("!").red(), err);
            }
        }

        pause("\nPress Enter to return to the menu...");
    }
    Ok(())
}

/* ---------- Menu ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Install,
    Uninstall,
    Status,
    ToggleLogging,
    Inspect,
    Exit,
}

const ACTIONS: [Action; 6] = [
    Action::Install,
    Action::Uninstall,
    Action::Status,
    Action::ToggleLogging,
    Action::Inspect,
    Action::Exit,
];

impl Action {
    fn title(self) -> &'static str {
        match self {
            Action::Install => "Install into Directory Opus",
            Action::Uninstall => "Uninstall from Directory Opus",
            Action::Status => "Status",
            Action::ToggleLogging => "Toggle logging",
            Action::Inspect => "Inspect a .jxl file",
            Action::Exit => "Exit",
        }
    }
}

fn menu_theme() -> ColorfulTheme {
    let mut t = ColorfulTheme::default();
    t.active_item_prefix = style(">".to_string());
    t.inactive_item_prefix = style(" ".to_string());
    t.picked_item_prefix = style(">".to_string());
    t.unpicked_item_prefix = style(" ".to_string());
    t.prompt_prefix = style("$".to_string());
    t.success_prefix = style(">".to_string());
    t.error_prefix = style("!".to_string());
    t
}

fn choose_action() -> io::Result<Action> {
    let items: Vec<&str> = ACTIONS.iter().map(|a| a.title()).collect();

    let idx = Select::with_theme(&menu_theme())
        .with_prompt("JPEG XL viewer plugin")
        .items(&items)
        .default(0)
        .interact_on(&Term::stdout())
        .map_err(io::Error::other)?;

    Ok(ACTIONS.get(idx).copied().unwrap_or(Action::Exit))
}

fn execute_action(action: Action) -> io::Result<()> {
    match action {
        Action::Install => install(),
        Action::Uninstall => uninstall(),
        Action::Status => status(),
        Action::ToggleLogging => toggle_logging(),
        Action::Inspect => inspect(),
        Action::Exit => Ok(()),
    }
}

fn pause(msg: &str) {
    print!("{msg}");
    let _ = io::stdout().flush();
    let mut _buf = String::new();
    let _ = io::stdin().read_line(&mut _buf);
}
