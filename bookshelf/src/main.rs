use anyhow::{Context, Result};
use bookshelf::router::Navigation;
use bookshelf::{logging, App, ProfileView};
use bookshelf_api::Request;
use bookshelf_auth::{ProfileRefresh, Settings, Signup};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version, about = "Bookshelf community client", long_about = None)]
struct Cli {
    /// Directory for log files
    #[arg(long, global = true, env = "BOOKSHELF_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session for later commands
    Login {
        username: String,
        #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a new account (does not log in)
    Signup {
        username: String,
        #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Show a profile. Your own is also refreshed in the session.
    Profile {
        /// Defaults to the logged in user
        username: Option<String>,
    },

    /// Follow a user, or unfollow if already following
    Follow { user_id: u64 },

    /// Check whether a view may be opened with the current session
    Open { path: String },

    /// List books
    Books,

    /// List community threads
    Threads,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (log_path, _guard) = logging::init_logging(cli.log_dir.as_deref())?;

    let settings = Settings::new().context("Failed to load configuration")?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
    tracing::info!(log = %log_path.display(), host = %settings.host, "Starting bookshelf");

    let app = App::open(&settings)?;

    match cli.command {
        Commands::Login { username, password } => {
            let outcome = app.store().login(&username, password).await?;
            match outcome.profile {
                ProfileRefresh::Loaded(profile) => println!("✓ Logged in as {}", profile.username),
                ProfileRefresh::Failed(e) => {
                    println!("✓ Logged in as {}", username);
                    eprintln!("Profile could not be loaded: {}", e);
                }
                ProfileRefresh::Stale => println!("✓ Logged in as {}", username),
            }
        }
        Commands::Signup { username, password } => {
            app.store().signup(Signup::new(username.clone(), password)).await?;
            println!("✓ Account {} created. Log in to continue.", username);
        }
        Commands::Logout => {
            app.store().logout();
            println!("Logged out");
        }
        Commands::Whoami => {
            let session = app.session().snapshot();
            match (session.is_authenticated(), session.user) {
                (true, Some(user)) => println!("{}", serde_json::to_string_pretty(&user)?),
                (true, None) => println!("Logged in (profile not loaded)"),
                (false, _) => println!("Not logged in"),
            }
        }
        Commands::Profile { username } => {
            let username = username
                .or_else(|| app.session().user().map(|u| u.username))
                .context("No username given and no profile cached")?;
            match app.view_profile(&username).await? {
                ProfileView::Own(ProfileRefresh::Loaded(profile)) | ProfileView::Other(profile) => {
                    println!("{}", serde_json::to_string_pretty(&profile)?)
                }
                ProfileView::Own(ProfileRefresh::Failed(e)) => {
                    eprintln!("Fetch profile failed: {}", e)
                }
                ProfileView::Own(ProfileRefresh::Stale) => eprintln!("Not logged in"),
            }
        }
        Commands::Follow { user_id } => {
            let status = app.client().send(Request::accounts().follow(user_id)).await?;
            if status.followed {
                println!("Following user {}", user_id);
            } else {
                println!("Unfollowed user {}", user_id);
            }
        }
        Commands::Open { path } => match app.navigate(&path) {
            Navigation::Proceed(route) => {
                println!("{} -> {}", route.path, route.name);
                for (name, value) in &route.params {
                    println!("  {} = {}", name, value);
                }
            }
            Navigation::Redirect { to, from } => {
                println!("{} requires login, redirecting to {}", from, to)
            }
            Navigation::NotFound(path) => println!("{}: no such view", path),
        },
        Commands::Books => {
            let books = app.client().send(Request::books().list()).await?;
            for book in books {
                println!("{}  {} ({})", book.isbn13, book.title, book.author);
            }
        }
        Commands::Threads => {
            let threads = app.client().send(Request::community().threads()).await?;
            for thread in threads {
                println!(
                    "#{} [{}] {} by {} ({} likes, {} comments)",
                    thread.id,
                    thread.book_title,
                    thread.title,
                    thread.user.username,
                    thread.like_count,
                    thread.comment_count
                );
            }
        }
    }

    Ok(())
}
