use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lib::library::{Library, Startup};
use lib::records::LoadedChat;
use lib::scan::{ScanOptions, PROBE_KEYS};

#[derive(Parser)]
#[command(name = "tavern")]
#[command(about = "Tavern CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the save layout (Save/, Save/Chat/, an empty session pointer). Existing files are kept.
    Init {
        /// Application root (default: TAVERN_HOME or ~/.tavern)
        #[arg(long, short, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Report whether any chat exists and which chat was opened last.
    Status {
        /// Application root (default: TAVERN_HOME or ~/.tavern)
        #[arg(long, short, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Open a chat and its bot, print a summary and record it as the last chat. Without a path, opens the last chat (or the first one found).
    Open {
        /// Chat file to open
        path: Option<PathBuf>,

        /// Application root (default: TAVERN_HOME or ~/.tavern)
        #[arg(long, short, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Print the chat transcript as well
        #[arg(long)]
        transcript: bool,
    },

    /// Print the last opened chat path.
    Last {
        /// Application root (default: TAVERN_HOME or ~/.tavern)
        #[arg(long, short, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Print the bot record in a bot directory.
    Bot {
        /// Bot directory (contains "Bot Description.json")
        dir: PathBuf,
    },

    /// Find the first JSON file in a directory carrying the given keys (default: the chat probe keys).
    Find {
        dir: PathBuf,

        /// Required key; repeat for several
        #[arg(long = "key", short, value_name = "KEY")]
        keys: Vec<String>,

        /// Descend into subdirectories
        #[arg(long, short)]
        recursive: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Version) => {
            println!("tavern {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Init { root }) => run_init(root),
        Some(Commands::Status { root }) => run_status(root),
        Some(Commands::Open {
            path,
            root,
            transcript,
        }) => run_open(root, path, transcript),
        Some(Commands::Last { root }) => run_last(root),
        Some(Commands::Bot { dir }) => run_bot(dir),
        Some(Commands::Find {
            dir,
            keys,
            recursive,
        }) => run_find(dir, keys, recursive),
        None => {
            println!("Run with --help for usage");
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_init(root: Option<PathBuf>) -> anyhow::Result<()> {
    let root = root.unwrap_or_else(lib::config::default_root);
    let layout = lib::init::init_root(&root)?;
    println!("initialized {}", layout.save_dir.display());
    Ok(())
}

fn run_status(root: Option<PathBuf>) -> anyhow::Result<()> {
    let library = Library::open(root)?;
    lib::init::require_initialized(library.layout())?;
    println!("chat directory: {}", library.layout().chat_dir.display());
    println!("chats: {}", if library.has_chats() { "yes" } else { "none" });
    match library.last_chat() {
        Ok(Some(path)) => println!("last chat: {}", path.display()),
        Ok(None) => println!("last chat: (none)"),
        Err(e) => println!("last chat: unreadable ({})", e),
    }
    Ok(())
}

fn run_open(root: Option<PathBuf>, path: Option<PathBuf>, transcript: bool) -> anyhow::Result<()> {
    let library = Library::open(root)?;
    let opened = match path {
        Some(p) => {
            // The pointer outlives this process; store chat paths independent of the cwd.
            let cwd = std::env::current_dir()?;
            let p = lib::config::resolve_against(&cwd, &p);
            library.open_chat(Some(p.as_path()))?
        }
        None => match library.startup() {
            Startup::Ready(chat) => Some(chat),
            Startup::Empty => None,
            Startup::Failed(e) => return Err(e.into()),
        },
    };
    match opened {
        Some(chat) => print_chat(&chat, transcript),
        None => println!("no chats yet; create one in {}", library.layout().chat_dir.display()),
    }
    Ok(())
}

fn print_chat(chat: &LoadedChat, transcript: bool) {
    println!("chat:        {}", chat.chat.name);
    println!("file:        {}", chat.path.display());
    println!("temperature: {}", chat.chat.temperature);
    println!("bot:         {}", chat.bot_dir.display());
    println!("model:       {}", chat.bot.model);
    println!(
        "images:      {}",
        if chat.bot.image_generation_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    if transcript {
        println!();
        println!("{}", chat.chat.chat);
    }
}

fn run_last(root: Option<PathBuf>) -> anyhow::Result<()> {
    let library = Library::open(root)?;
    match library.last_chat()? {
        Some(path) => println!("{}", path.display()),
        None => println!("(none)"),
    }
    Ok(())
}

fn run_bot(dir: PathBuf) -> anyhow::Result<()> {
    let bot = lib::records::load_bot(&dir)?;
    println!("{}", serde_json::to_string_pretty(&bot)?);
    Ok(())
}

fn run_find(dir: PathBuf, keys: Vec<String>, recursive: bool) -> anyhow::Result<()> {
    let keys: Vec<&str> = if keys.is_empty() {
        PROBE_KEYS.to_vec()
    } else {
        keys.iter().map(String::as_str).collect()
    };
    let options = ScanOptions::default().recursive(recursive);
    match lib::scan::find_first_matching(&dir, &keys, &options) {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("no match in {}", dir.display());
        }
    }
    Ok(())
}
