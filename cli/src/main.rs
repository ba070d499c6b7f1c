use clap::Parser;
use config::{PathManager, Settings, load_env_file};
use conversation::{ChatController, ConciergeModel, DisplayTurn, SubmitOutcome};
use llm::ChatModel;
use llm::providers::OpenAIProvider;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type Chat = ChatController<Box<dyn ChatModel + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "TimeTravel Agency concierge chat", long_about = None)]
struct Args {
    /// Model name sent to the chat-completions endpoint
    #[arg(long)]
    model: Option<String>,

    /// Custom base URL for the OpenAI-compatible API (e.g., for proxy or compatible services)
    #[arg(long, env = "GROQ_BASE_URL")]
    base_url: Option<String>,

    /// Answer with the built-in keyword concierge instead of calling the API
    #[arg(long)]
    offline: bool,

    /// Directory holding settings.toml
    #[arg(long, env = "TIMETRAVEL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[arg(long, short)]
    tracing: bool,
}

/// With tracing on, logs go to the log file (stderr if it cannot be opened)
/// so they do not interleave with the chat.
fn setup_tracing(enable: bool) -> anyhow::Result<()> {
    if !enable {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::ERROR)
            .with_writer(io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,llm=trace,conversation=debug"));

    match open_log_file() {
        Some(file) => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn open_log_file() -> Option<File> {
    let path = PathManager::log_file_path()?;
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {:?}: {}", parent, e);
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            eprintln!("Logging to {}", path.display());
            Some(file)
        }
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", path, e);
            None
        }
    }
}

/// Pick the completion provider; returns it with a label for the status bar.
fn build_model(args: &Args, settings: &Settings) -> (Box<dyn ChatModel + Send + Sync>, String) {
    if args.offline {
        return (Box::new(ConciergeModel::new()), "offline".to_string());
    }

    let base_url = args.base_url.as_deref().unwrap_or(&settings.base_url);
    let model_name = args.model.as_deref().unwrap_or(&settings.model);
    let provider = OpenAIProvider::new(base_url, settings.api_key().as_deref());
    info!(base_url = provider.base_url(), model = model_name, "using remote provider");

    let model = provider.create_chat_model(model_name, settings.sampling());
    (Box::new(model), model_name.to_string())
}

fn print_status_bar(chat: &Chat, model_label: &str) {
    let terminal_width: usize = 80;
    let status = chat.status();
    let text = match status.error {
        Some(_) => format!(" TimeTravel Agency • {} • erreur ", model_label),
        None => format!(" TimeTravel Agency • {} • {} messages ", model_label, status.turns),
    };
    let padding = terminal_width.saturating_sub(text.chars().count());
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;

    println!("┌{}┐", "─".repeat(terminal_width - 2));
    println!("│{}{}{}│", " ".repeat(left_pad), text, " ".repeat(right_pad));
    println!("└{}┘", "─".repeat(terminal_width - 2));
}

fn print_turn(turn: &DisplayTurn) {
    let speaker = if turn.is_user() { "Vous" } else { "Concierge" };
    println!("[{}] {}: {}", turn.time_label(), speaker, turn.content);
}

fn print_transcript(chat: &Chat) {
    for turn in chat.snapshot() {
        print_turn(&turn);
    }
    println!();
}

fn print_new_turns(turns: &mut UnboundedReceiver<DisplayTurn>) {
    while let Ok(turn) = turns.try_recv() {
        print_turn(&turn);
    }
}

// Slash command parsing and handling
mod commands {
    use super::*;

    pub enum Command {
        Quit,
        Help,
        Open,
        Close,
        History,
        Status,
    }

    pub enum CommandResult {
        Continue,
        Exit,
    }

    impl Command {
        pub fn parse(input: &str) -> Result<Self, String> {
            let Some(rest) = input.strip_prefix('/') else {
                return Err("Not a command".to_string());
            };

            let parts: Vec<&str> = rest.split_whitespace().collect();
            let Some(name) = parts.first() else {
                return Err("Empty command".to_string());
            };

            match *name {
                "quit" | "exit" => Ok(Command::Quit),
                "help" => Ok(Command::Help),
                "open" => Ok(Command::Open),
                "close" => Ok(Command::Close),
                "history" => Ok(Command::History),
                "status" => Ok(Command::Status),
                _ => Err(format!("Unknown command: /{}. Type /help for available commands.", name)),
            }
        }

        pub fn execute(self, chat: &Chat) -> CommandResult {
            match self {
                Command::Quit => {
                    println!("Au revoir !");
                    return CommandResult::Exit;
                }
                Command::Help => print_help(),
                Command::Open => {
                    if !chat.is_open() {
                        chat.open();
                        print_transcript(chat);
                    }
                }
                Command::Close => {
                    chat.close();
                    println!("Chat closed. Type /open to resume.");
                }
                Command::History => print_transcript(chat),
                Command::Status => {
                    let status = chat.status();
                    println!("phase: {:?}", status.phase);
                    println!("turns: {}", status.turns);
                    println!("open: {}", status.open);
                    if let Some(path) = PathManager::settings_path() {
                        println!("settings: {}", path.display());
                    }
                    if let Some(error) = status.error {
                        println!("last error: {}", error);
                    }
                }
            }
            println!();
            CommandResult::Continue
        }
    }

    fn print_help() {
        println!("Available commands:");
        println!("  /quit, /exit           - Exit the chat");
        println!("  /open                  - Open the chat panel and show the conversation");
        println!("  /close                 - Close the chat panel");
        println!("  /history               - Show the whole conversation");
        println!("  /status                - Show the session state");
        println!("  /help                  - Show this help message");
        println!("  Ctrl+D                 - Exit the chat");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_file();
    let args = Args::parse();

    if let Some(dir) = &args.config_dir {
        PathManager::set_config_dir(dir.clone());
    }
    setup_tracing(args.tracing)?;

    let settings = Settings::load();
    let (model, model_label) = build_model(&args, &settings);
    let chat: Chat = ChatController::with_agency_persona(model);
    let mut turns = chat.subscribe();

    println!();
    println!("Type /help for commands, Ctrl+D or /quit to exit.");
    println!();

    chat.open();
    print_transcript(&chat);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if chat.is_open() {
            print_status_bar(&chat, &model_label);
        }
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
            None => {
                println!();
                println!("Au revoir !");
                break;
            }
        };

        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        if input.starts_with('/') {
            match commands::Command::parse(input) {
                Ok(cmd) => match cmd.execute(&chat) {
                    commands::CommandResult::Exit => break,
                    commands::CommandResult::Continue => continue,
                },
                Err(err) => {
                    println!("{}", err);
                    println!();
                    continue;
                }
            }
        }

        if !chat.is_open() {
            println!("The chat is closed. Type /open to talk to the concierge.");
            println!();
            continue;
        }

        println!("…");
        let outcome = chat.submit(input).await;
        print_new_turns(&mut turns);

        if let SubmitOutcome::Failed { error, .. } = &outcome {
            info!(?error, "round failed");
        }
        println!();
    }

    println!("Conversation had {} messages", chat.len());
    Ok(())
}
