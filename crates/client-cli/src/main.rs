use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use shared::{MeetingStatus, ProgressStage, TaskPriority, TaskStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod commands;
mod config;
mod guard;
mod session;
mod tui;
mod view;

use api::ApiClient;
use commands::meetings::TimeWindow;
use guard::{Route, RouteDecision};
use session::{Session, SessionStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Admin console for the Huddle meeting backend")]
#[command(version)]
struct Cli {
    /// Server URL (overrides config)
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Log in to the backend
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and discard the stored session
    Logout,
    /// Show current login status
    Whoami,
    /// Create a password for a provisioned account
    CreatePassword {
        #[arg(long)]
        email: Option<String>,
    },
    /// Change the current account's password
    ChangePassword,
    /// Overview: counts, upcoming meetings, latest notifications
    Dashboard,
    /// Meetings grouped by day for one month
    Calendar {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Meetings
    Meetings {
        #[command(subcommand)]
        action: MeetingsAction,
    },
    /// Action items
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },
    /// Participants
    Participants {
        #[command(subcommand)]
        action: ParticipantsAction,
    },
    /// Meeting recordings
    Recordings {
        #[command(subcommand)]
        action: RecordingsAction,
    },
    /// Reminders
    Reminders {
        #[command(subcommand)]
        action: RemindersAction,
    },
    /// Notifications
    Notifications {
        /// Free-text filter over message, status and type
        #[arg(long)]
        search: Option<String>,
    },
    /// Agenda items
    Agendas,
    /// Chats
    Chats {
        #[command(subcommand)]
        action: ChatsAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// Configuration key (server)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Show all configuration
    Show,
    /// Get the config file path
    Path,
}

#[derive(Subcommand)]
enum MeetingsAction {
    /// All meetings
    List,
    /// Meetings at or after now
    Upcoming,
    /// Past meetings (shown COMPLETED unless CANCELLED)
    Previous,
    /// Schedule a meeting
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Start as YYYY-MM-DDTHH:MM:SS (backend-local, no zone)
        #[arg(long)]
        date_time: NaiveDateTime,
        /// Duration as HH:MM
        #[arg(long)]
        duration: String,
    },
    /// Delete a meeting
    Delete { meeting_id: String },
    /// Set a meeting's status
    SetStatus {
        meeting_id: String,
        #[arg(value_parser = parse_meeting_status)]
        status: MeetingStatus,
    },
}

#[derive(Subcommand)]
enum TasksAction {
    /// All tasks, with optional local filters
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_task_priority)]
        priority: Option<TaskPriority>,
    },
    /// Server-side search
    Search { query: String },
    /// Server-side status/priority filter
    Filter {
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_task_priority)]
        priority: Option<TaskPriority>,
    },
    /// Tasks assigned to an email address
    Assignee { email: String },
    /// Create a task
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Assignee email
        #[arg(long)]
        assignee: String,
        #[arg(long, value_parser = parse_task_priority, default_value = "MEDIUM")]
        priority: TaskPriority,
        #[arg(long, value_parser = parse_task_status, default_value = "TODO")]
        status: TaskStatus,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due_date: NaiveDate,
        #[arg(long)]
        timeline_start: NaiveDate,
        #[arg(long)]
        timeline_end: NaiveDate,
        #[arg(long)]
        goal_notes: Option<String>,
    },
    /// Update fields of a task
    Update {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long, value_parser = parse_task_priority)]
        priority: Option<TaskPriority>,
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// Delete a task
    Delete { task_id: String },
    /// Advance a task to a progress stage
    Progress {
        task_id: String,
        #[arg(value_parser = parse_progress_stage)]
        stage: ProgressStage,
    },
    /// Interactive browser
    Browse,
}

#[derive(Subcommand)]
enum ParticipantsAction {
    /// All participants, roles resolved to names
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a participant
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Role id from the /roles collection
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        department: String,
    },
    /// Delete a participant
    Delete { user_id: String },
}

#[derive(Subcommand)]
enum RecordingsAction {
    /// All recordings
    List,
    /// Upload a recording file
    Upload {
        #[arg(long)]
        name: String,
        #[arg(long)]
        meeting_id: String,
        /// Path to the media file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum RemindersAction {
    /// All reminders
    List,
    /// Post alerts for reminders inside the 1h/30min windows
    Due,
}

#[derive(Subcommand)]
enum ChatsAction {
    /// Your chats, most recently updated first
    List,
    /// Messages in a chat
    Messages { chat_id: String },
    /// Send a message
    Send { chat_id: String, content: String },
    /// Create a chat (you are added automatically)
    Create {
        /// Other participants' user ids
        #[arg(long = "with", required = true)]
        participant_ids: Vec<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

fn parse_task_status(raw: &str) -> Result<TaskStatus, String> {
    let wanted = raw.to_uppercase();
    TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == wanted)
        .ok_or_else(|| format!("unknown status {raw:?} (TODO, IN_PROGRESS, REVIEW, COMPLETED)"))
}

fn parse_task_priority(raw: &str) -> Result<TaskPriority, String> {
    let wanted = raw.to_uppercase();
    TaskPriority::ALL
        .into_iter()
        .find(|p| p.as_str() == wanted)
        .ok_or_else(|| format!("unknown priority {raw:?} (LOW, MEDIUM, HIGH, URGENT)"))
}

fn parse_progress_stage(raw: &str) -> Result<ProgressStage, String> {
    let wanted = raw.to_uppercase();
    ProgressStage::ALL
        .into_iter()
        .find(|s| s.as_str() == wanted)
        .ok_or_else(|| {
            format!(
                "unknown stage {raw:?} (NOT_STARTED, INFORMATION_GATHERING, \
                 REQUIREMENTS_ANALYSIS, IMPLEMENTATION, TESTING, DEPLOYMENT)"
            )
        })
}

fn parse_meeting_status(raw: &str) -> Result<MeetingStatus, String> {
    let wanted = raw.to_uppercase();
    [
        MeetingStatus::Scheduled,
        MeetingStatus::Ongoing,
        MeetingStatus::Completed,
        MeetingStatus::Cancelled,
    ]
    .into_iter()
    .find(|s| s.as_str() == wanted)
    .ok_or_else(|| format!("unknown status {raw:?} (SCHEDULED, ONGOING, COMPLETED, CANCELLED)"))
}

/// The view a subcommand corresponds to, for the guard. `None` means the
/// command is not a navigation at all (config, login, logout, whoami).
fn route_for(command: &Commands) -> Option<Route> {
    match command {
        Commands::Config { .. }
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami => None,
        // Public route; change-password fails loudly through the session
        // accessor instead of the guard.
        Commands::CreatePassword { .. } | Commands::ChangePassword => Some(Route::CreatePassword),
        Commands::Dashboard => Some(Route::Dashboard),
        Commands::Calendar { .. } => Some(Route::Calendar),
        Commands::Meetings { .. } => Some(Route::Meetings),
        Commands::Tasks { .. } => Some(Route::ActionItems),
        Commands::Participants { .. } => Some(Route::Participants),
        Commands::Recordings { .. } => Some(Route::Recordings),
        Commands::Reminders { .. } => Some(Route::Reminders),
        Commands::Notifications { .. } => Some(Route::Notifications),
        Commands::Agendas => Some(Route::Meetings),
        Commands::Chats { .. } => Some(Route::Chats),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huddle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load().unwrap_or_default();
    let server = cli
        .server
        .or(config.remote.server)
        .unwrap_or_else(|| api::DEFAULT_SERVER.to_string());
    let api = ApiClient::new(&server);
    let mut session = Session::restore(SessionStore::new()?);

    // Guard check happens per invocation, against the just-restored
    // session, exactly like a navigation attempt.
    if let Some(route) = route_for(&cli.command) {
        if guard::can_enter(&route, &session) == RouteDecision::RedirectToLogin {
            eprintln!("\x1b[33m🔐 Not logged in.\x1b[0m");
            eprintln!("   Run '\x1b[1mhuddle login\x1b[0m' to authenticate.");
            return Ok(());
        }
    }

    match cli.command {
        Commands::Config { action } => handle_config_command(action),
        Commands::Login { email, password } => {
            commands::auth::login(&api, &mut session, email, password).await
        }
        Commands::Logout => commands::auth::logout(&mut session),
        Commands::Whoami => {
            commands::auth::whoami(&session, &server);
            Ok(())
        }
        Commands::CreatePassword { email } => commands::auth::create_password(&api, email).await,
        Commands::ChangePassword => commands::auth::change_password(&api, &session).await,
        Commands::Dashboard => commands::dashboard::show(&api).await,
        Commands::Calendar { month } => commands::calendar::show(&api, month).await,
        Commands::Meetings { action } => match action {
            MeetingsAction::List => commands::meetings::list(&api, None).await,
            MeetingsAction::Upcoming => {
                commands::meetings::list(&api, Some(TimeWindow::Upcoming)).await
            }
            MeetingsAction::Previous => {
                commands::meetings::list(&api, Some(TimeWindow::Previous)).await
            }
            MeetingsAction::Create {
                name,
                description,
                date_time,
                duration,
            } => {
                commands::meetings::create(&api, &session, name, description, date_time, duration)
                    .await
            }
            MeetingsAction::Delete { meeting_id } => {
                commands::meetings::delete(&api, &session, meeting_id).await
            }
            MeetingsAction::SetStatus { meeting_id, status } => {
                commands::meetings::set_status(&api, &session, meeting_id, status).await
            }
        },
        Commands::Tasks { action } => match action {
            TasksAction::List {
                search,
                status,
                priority,
            } => commands::tasks::list(&api, search, status, priority).await,
            TasksAction::Search { query } => commands::tasks::search(&api, query).await,
            TasksAction::Filter { status, priority } => {
                commands::tasks::filter(&api, status, priority).await
            }
            TasksAction::Assignee { email } => commands::tasks::by_assignee(&api, email).await,
            TasksAction::Create {
                title,
                description,
                assignee,
                priority,
                status,
                due_date,
                timeline_start,
                timeline_end,
                goal_notes,
            } => {
                commands::tasks::create(
                    &api,
                    &session,
                    title,
                    description,
                    assignee,
                    priority,
                    status,
                    due_date,
                    timeline_start,
                    timeline_end,
                    goal_notes,
                )
                .await
            }
            TasksAction::Update {
                task_id,
                title,
                description,
                assignee,
                priority,
                status,
                due_date,
            } => {
                commands::tasks::update(
                    &api,
                    &session,
                    task_id,
                    title,
                    description,
                    assignee,
                    priority,
                    status,
                    due_date,
                )
                .await
            }
            TasksAction::Delete { task_id } => {
                commands::tasks::delete(&api, &session, task_id).await
            }
            TasksAction::Progress { task_id, stage } => {
                commands::tasks::set_progress(&api, &session, task_id, stage).await
            }
            TasksAction::Browse => commands::tasks::browse(&api, &session).await,
        },
        Commands::Participants { action } => match action {
            ParticipantsAction::List { search } => {
                commands::participants::list(&api, search).await
            }
            ParticipantsAction::Add {
                name,
                email,
                role,
                department,
            } => commands::participants::create(&api, &session, name, email, role, department).await,
            ParticipantsAction::Delete { user_id } => {
                commands::participants::delete(&api, &session, user_id).await
            }
        },
        Commands::Recordings { action } => match action {
            RecordingsAction::List => commands::recordings::list(&api).await,
            RecordingsAction::Upload {
                name,
                meeting_id,
                file,
            } => commands::recordings::upload(&api, &session, name, meeting_id, file).await,
        },
        Commands::Reminders { action } => match action {
            RemindersAction::List => commands::reminders::list(&api).await,
            RemindersAction::Due => commands::reminders::due(&api).await,
        },
        Commands::Notifications { search } => commands::notifications::list(&api, search).await,
        Commands::Agendas => commands::agendas::list(&api).await,
        Commands::Chats { action } => match action {
            ChatsAction::List => commands::chat::list(&api, &session).await,
            ChatsAction::Messages { chat_id } => {
                commands::chat::messages(&api, &session, chat_id).await
            }
            ChatsAction::Send { chat_id, content } => {
                commands::chat::send(&api, &session, chat_id, content).await
            }
            ChatsAction::Create {
                participant_ids,
                name,
            } => commands::chat::create(&api, &session, participant_ids, name).await,
        },
    }
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = config::Config::load().unwrap_or_default();
            match key.as_str() {
                "server" => config.remote.server = Some(value),
                _ => anyhow::bail!("Unknown config key: {}. Valid keys: server", key),
            }
            config.save()?;
            println!("Configuration saved");
        }
        ConfigAction::Get { key } => {
            let config = config::Config::load()?;
            let value = match key.as_str() {
                "server" => config.remote.server.unwrap_or_default(),
                _ => anyhow::bail!("Unknown config key: {}", key),
            };
            println!("{}", value);
        }
        ConfigAction::Show => {
            let config = config::Config::load()?;
            println!("server: {}", config.remote.server.unwrap_or_default());
        }
        ConfigAction::Path => {
            let path = config::Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
