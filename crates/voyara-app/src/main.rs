// SPDX-License-Identifier: AGPL-3.0
// Voyara - Headless command-line frontend

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use voyara_app::{AppContext, SuggestionForm, TripForm, UiState};
use voyara_core::format_picker_date;

#[derive(Debug, Parser)]
#[command(name = "voyara", version, about = "Voyara travel planner")]
struct Args {
    /// Directory holding config.json and the local stores
    #[arg(long, env = "VOYARA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session
    Login { email: String, password: String },
    /// Create an account
    Signup {
        full_name: String,
        email: String,
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List trips, optionally switching the status filter
    Trips { status: Option<String> },
    /// Submit a new trip; dates are DD/MM/YYYY
    CreateTrip {
        name: String,
        start: String,
        end: String,
        description: String,
        budget: Option<String>,
    },
    /// List saved drafts, newest first
    Drafts,
    /// Save a draft without validating it
    DraftSave {
        name: String,
        destination: String,
        start: String,
        end: String,
        description: String,
    },
    DraftDelete { id: String },
    DraftClear,
    /// Ask Vega for suggestions
    Suggest {
        trip_id: String,
        city: String,
        country: String,
        day: String,
        slot: String,
        budget: String,
        remaining: String,
        preferences: Vec<String>,
    },
}

/// Print the final state of a screen; true on success
fn report<T>(state: UiState<T>, on_success: impl FnOnce(T)) -> bool {
    match state {
        UiState::Success(value) => {
            on_success(value);
            true
        }
        UiState::Error(message) => {
            eprintln!("Error: {}", message);
            false
        }
        UiState::Idle | UiState::Loading => {
            eprintln!("Error: request did not complete");
            false
        }
    }
}

async fn run(ctx: &AppContext, command: Command) -> bool {
    match command {
        Command::Login { email, password } => {
            let vm = ctx.login_view_model();
            vm.login(&email, &password);
            report(vm.state().settled().await, |message| println!("{}", message))
        }
        Command::Signup {
            full_name,
            email,
            password,
        } => {
            let vm = ctx.signup_view_model();
            vm.signup(&full_name, &email, &password);
            report(vm.state().settled().await, |user| {
                println!("Account created for {} ({}). You can now log in.", user.full_name, user.email)
            })
        }
        Command::Logout => match ctx.session.logout() {
            Ok(()) => {
                println!("Logged out");
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                false
            }
        },
        Command::Whoami => match (ctx.session.has_valid_token(), ctx.session.user_email()) {
            (true, Some(email)) => {
                let name = ctx.session.user_full_name().unwrap_or_default();
                println!("{} <{}>", name, email);
                true
            }
            _ => {
                eprintln!("Not logged in");
                false
            }
        },
        Command::Trips { status } => {
            let vm = ctx.trips_list_view_model();
            match status {
                Some(status) => vm.fetch_trips(&status),
                None => vm.refresh(),
            }
            report(vm.state().settled().await, |trips| {
                if trips.is_empty() {
                    println!("No {} trips", vm.selected_status());
                }
                for trip in trips {
                    println!(
                        "{}  {}  {} to {}  [{}]",
                        trip.id.as_deref().unwrap_or("-"),
                        trip.name,
                        trip.start_date,
                        trip.end_date,
                        trip.status.as_deref().unwrap_or("unknown")
                    );
                }
            })
        }
        Command::CreateTrip {
            name,
            start,
            end,
            description,
            budget,
        } => {
            let vm = ctx.create_trip_view_model();
            vm.create_trip(&name, &description, &start, &end, None, budget.as_deref());
            report(vm.state().settled().await, |created| {
                println!("{} (id {})", created.message, created.response.id)
            })
        }
        Command::Drafts => {
            let vm = ctx.drafts_view_model();
            vm.load();
            report(vm.state().get(), |drafts| {
                if drafts.is_empty() {
                    println!("No drafts");
                }
                for draft in drafts {
                    let edited = format_picker_date(draft.updated_at).unwrap_or_default();
                    println!(
                        "{}  {}  {}  {} to {}  (edited {})",
                        draft.id,
                        draft.name,
                        draft.destination,
                        draft.start_date,
                        draft.end_date,
                        edited
                    );
                }
            })
        }
        Command::DraftSave {
            name,
            destination,
            start,
            end,
            description,
        } => {
            let form = TripForm {
                name,
                destination,
                start_date: start,
                end_date: end,
                description,
                ..TripForm::default()
            };
            let vm = ctx.drafts_view_model();
            match vm.save(&form, None) {
                Some(id) => {
                    println!("Draft saved: {}", id);
                    true
                }
                None => report(vm.state().get(), |_| ()),
            }
        }
        Command::DraftDelete { id } => {
            let vm = ctx.drafts_view_model();
            if vm.delete(&id) {
                println!("Draft deleted");
                true
            } else {
                eprintln!("Error: no draft with id {}", id);
                false
            }
        }
        Command::DraftClear => {
            let vm = ctx.drafts_view_model();
            let cleared = vm.delete_all();
            if cleared {
                println!("All drafts deleted");
            }
            cleared
        }
        Command::Suggest {
            trip_id,
            city,
            country,
            day,
            slot,
            budget,
            remaining,
            preferences,
        } => {
            let form = SuggestionForm {
                trip_id,
                city,
                country,
                day,
                time_slot: slot,
                total_budget: budget,
                remaining_budget: remaining,
                preferences,
                ..SuggestionForm::default()
            };
            let vm = ctx.vega_view_model();
            vm.submit(&form);
            report(vm.state().settled().await, |response| {
                println!("{}", response.message);
                for suggestion in &response.suggestions {
                    print!("- {}", suggestion.display_name());
                    if let Some(cost) = suggestion.display_cost() {
                        print!(" ({:.0})", cost);
                    }
                    if let Some(duration) = suggestion.display_duration() {
                        print!(", {}", duration);
                    }
                    println!();
                    if let Some(reason) = suggestion.display_reason() {
                        println!("    {}", reason);
                    }
                }
            })
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("voyara=warn,voyara_app=warn,voyara_core=warn,voyara_network=warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Voyara v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let ctx = match AppContext::open(args.data_dir.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if ctx.runtime().block_on(run(&ctx, args.command)) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_known_commands() {
        let args = Args::try_parse_from(["voyara", "login", "a@b.co", "pw"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Login { ref email, ref password } if email == "a@b.co" && password == "pw"
        ));

        let args = Args::try_parse_from(["voyara", "trips", "completed"]).unwrap();
        assert!(matches!(args.command, Command::Trips { status: Some(ref s) } if s == "completed"));

        let args = Args::try_parse_from(["voyara", "--data-dir", "/tmp/v", "whoami"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/v")));
        assert!(matches!(args.command, Command::Whoami));
    }

    #[test]
    fn test_parse_optional_trailing_args() {
        let args = Args::try_parse_from([
            "voyara", "create-trip", "Goa", "01/02/2025", "08/02/2025", "sun", "900",
        ])
        .unwrap();
        let Command::CreateTrip { budget, .. } = args.command else {
            panic!("create-trip not parsed");
        };
        assert_eq!(budget.as_deref(), Some("900"));

        let args = Args::try_parse_from([
            "voyara", "suggest", "t1", "Jaipur", "India", "2", "Morning", "100", "50", "food",
            "history",
        ])
        .unwrap();
        let Command::Suggest { preferences, .. } = args.command else {
            panic!("suggest not parsed");
        };
        assert_eq!(preferences, vec!["food", "history"]);
    }

    #[test]
    fn test_parse_rejects_bad_arity() {
        assert!(Args::try_parse_from(["voyara"]).is_err());
        assert!(Args::try_parse_from(["voyara", "login", "a@b.co"]).is_err());
        assert!(Args::try_parse_from([
            "voyara", "create-trip", "Goa", "a", "b", "c", "1", "extra"
        ])
        .is_err());
        assert!(Args::try_parse_from(["voyara", "teleport"]).is_err());
    }
}
