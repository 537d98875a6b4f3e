//! Flower Diary CLI
//!
//! Terminal front-end for the Flower Diary service:
//! - Browse your diaries and their flowers
//! - Write a new diary and watch its flower bloom
//! - Admin views: dashboard, users, per-user diaries, all diaries

use anyhow::Context;
use clap::{Parser, Subcommand};
use flower_diary::config::{generate_default_config, Config, LoadedConfig, LogFormat};
use flower_diary::pages::{
    follow_redirect, render_route, show, AdminDiariesPage, AdminUserDiariesPage, AdminUsersPage,
    DiaryListPage, FormPhase, Layout, NewDiaryForm, RenderedPage,
};
use flower_diary::{DiaryClient, Mood, Route};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flower-diary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Diary client that turns your feelings into flowers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and FLOWER_DIARY_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this user id
    #[arg(long, global = true)]
    pub user_id: Option<i64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the landing page
    Home,

    /// List your diaries
    Diaries {
        #[arg(long, default_value = "0")]
        skip: u32,
        /// Page size (default: from config)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one diary with its flower
    Show {
        /// Diary id
        id: i64,
    },

    /// Write a new diary; reads the content from stdin when not given
    Write {
        /// Diary text
        content: Option<String>,
        /// happy, sad, excited, calm, anxious or grateful
        #[arg(short, long)]
        mood: Option<Mood>,
        /// Stay on the success screen instead of moving to the diary list
        #[arg(long)]
        no_redirect: bool,
    },

    /// Generate a flower for an existing diary
    Generate {
        /// Diary id
        diary_id: i64,
    },

    /// Admin views
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Open a page by path (e.g. /user/diary/3, /admin/users)
    Open {
        path: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Aggregate counts
    Dashboard,

    /// All users
    Users {
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// One user's diaries
    User {
        /// User id
        id: i64,
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Every diary
    Diaries {
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let LoadedConfig {
        mut config,
        skipped,
    } = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(user_id) = cli.user_id {
        config.api.user_id = user_id;
    }

    init_logging(&config);
    for problem in &skipped {
        tracing::warn!("{}", problem);
    }
    tracing::debug!(base_url = %config.api.base_url, user_id = config.api.user_id, "Starting");

    let client = DiaryClient::new(config.api.client_config())?;
    let ui = &config.ui;

    let page = match cli.command {
        Commands::Home => render_route(Route::Home, &client, ui).await,

        Commands::Diaries { skip, limit } => {
            show(
                DiaryListPage::new(skip, limit.unwrap_or(ui.diary_page_size)),
                &client,
            )
            .await
        }

        Commands::Show { id } => render_route(Route::DiaryDetail(id), &client, ui).await,

        Commands::Write {
            content,
            mood,
            no_redirect,
        } => {
            let content = match content {
                Some(c) => c,
                None => read_content(std::io::stdin().lock())?,
            };
            return write_diary(&client, &config, content, mood, no_redirect).await;
        }

        Commands::Generate { diary_id } => {
            return match client.generate_flower_image(diary_id).await {
                Ok(image) => {
                    println!("🌸 {}", image.image_url);
                    if !image.prompt.is_empty() {
                        println!("プロンプト: {}", image.prompt);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("⚠️ {}", e);
                    Ok(ExitCode::FAILURE)
                }
            };
        }

        Commands::Admin(admin) => match admin {
            AdminCommands::Dashboard => {
                render_route(Route::AdminDashboard, &client, ui).await
            }
            AdminCommands::Users { skip, limit } => {
                show(
                    AdminUsersPage::new(skip, limit.unwrap_or(ui.admin_user_page_size)),
                    &client,
                )
                .await
            }
            AdminCommands::User { id, skip, limit } => {
                show(
                    AdminUserDiariesPage::new(
                        id,
                        skip,
                        limit.unwrap_or(ui.admin_user_diary_page_size),
                    ),
                    &client,
                )
                .await
            }
            AdminCommands::Diaries { skip, limit } => {
                show(
                    AdminDiariesPage::new(skip, limit.unwrap_or(ui.admin_diary_page_size)),
                    &client,
                )
                .await
            }
        },

        Commands::Open { path } => {
            let route: Route = path.parse()?;
            render_route(route, &client, ui).await
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(print_page(&page))
}

fn print_page(page: &RenderedPage) -> ExitCode {
    print!("{}", page.text);
    if page.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn write_diary(
    client: &DiaryClient,
    config: &Config,
    content: String,
    mood: Option<Mood>,
    no_redirect: bool,
) -> anyhow::Result<ExitCode> {
    let mut form = NewDiaryForm::new(config.api.user_id);
    form.set_content(content);
    if let Some(mood) = mood {
        form.toggle_mood(mood);
    }

    let request = match form.begin_submit() {
        Ok(request) => request,
        Err(refused) => {
            print!("{}", Layout::User.wrap(&form.render()));
            eprintln!("⚠️ {}", refused);
            return Ok(ExitCode::FAILURE);
        }
    };
    print!("{}", Layout::User.wrap(&form.render()));

    let result = client.create_diary(&request).await;
    form.finish_submit(result);
    println!();
    print!("{}", Layout::User.wrap(&form.render()));

    if let FormPhase::Editing { .. } = form.phase() {
        return Ok(ExitCode::FAILURE);
    }

    if no_redirect {
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(redirect) = form.redirect(config.ui.redirect_delay()) {
        let page = follow_redirect(redirect, client, &config.ui).await;
        println!();
        return Ok(print_page(&page));
    }

    Ok(ExitCode::SUCCESS)
}

/// Diary text piped in; the trailing newline from `echo` is not content
fn read_content(mut input: impl Read) -> anyhow::Result<String> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read diary content from stdin")?;
    buf.truncate(buf.trim_end().len());
    Ok(buf)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("flower_diary={}", config.logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
}
