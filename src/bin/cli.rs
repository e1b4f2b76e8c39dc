//! Websim Challenge CLI
//!
//! Command-line client for a running Websim Challenge server:
//! - Start and end sessions
//! - Log in and out
//! - Browse, join and cancel challenges
//! - Read and write comments
//! - Suggest challenges and review your participation

use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "websim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, join and suggest web development challenges")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Session id (from `websim new`)
    #[arg(short, long, env = "WEBSIM_SESSION", global = true)]
    pub session: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new session
    New,

    /// End the current session
    End,

    /// Log in (no password check)
    Login {
        name: String,
        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Log out, keeping your participations
    Logout,

    /// List challenges
    List {
        /// all, beginner, intermediate, advanced
        #[arg(short, long, default_value = "all")]
        difficulty: String,
    },

    /// Join a challenge
    Join { id: u32 },

    /// Cancel a participation
    Cancel { id: u32 },

    /// Comment on a challenge
    Comment { id: u32, text: String },

    /// Show comments on a challenge
    Comments { id: u32 },

    /// Suggest a new challenge
    Suggest {
        title: String,
        #[arg(short = 'D', long, default_value = "")]
        description: String,
        /// beginner, intermediate, advanced
        #[arg(short, long, default_value = "beginner")]
        difficulty: String,
        #[arg(short = 't', long, default_value = "1 week")]
        duration: String,
    },

    /// Show your participation and category breakdown
    Mine,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> anyhow::Result<Value> {
        let mut request = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.with_context(|| {
            format!(
                "Cannot connect to Websim Challenge API at {} (is `websim-challenge` running?)",
                self.base_url
            )
        })?;

        let status = response.status();
        let text = response.text().await?;
        let value: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            let message = value["error"]["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            anyhow::bail!("{} ({})", message, status);
        }

        Ok(value)
    }

    async fn session_send(
        &self,
        method: Method,
        session: &str,
        path: &str,
        body: Option<Value>,
    ) -> anyhow::Result<Value> {
        self.send(method, &format!("/api/v1/sessions/{}{}", session, path), body)
            .await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);
    let json_output = cli.format == "json";

    match &cli.command {
        Commands::New => {
            let body = client.send(Method::POST, "/api/v1/sessions", None).await?;
            let id = body["session_id"].as_str().unwrap_or_default();

            if json_output {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Session started: {}", id);
                println!();
                println!("Use it for the following commands with:");
                println!("  export WEBSIM_SESSION={}", id);
            }
        }

        Commands::End => {
            let session = require_session(&cli)?;
            client
                .session_send(Method::DELETE, session, "", None)
                .await?;
            println!("Session ended.");
        }

        Commands::Login { name, password } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::POST,
                    session,
                    "/login",
                    Some(json!({ "name": name, "password": password })),
                )
                .await?;
            print_action(&body, json_output)?;
        }

        Commands::Logout => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(Method::POST, session, "/logout", None)
                .await?;
            print_action(&body, json_output)?;
        }

        Commands::List { difficulty } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::GET,
                    session,
                    &format!("/views/catalog?difficulty={}", difficulty),
                    None,
                )
                .await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_catalog(&body);
            }
        }

        Commands::Join { id } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::POST,
                    session,
                    &format!("/challenges/{}/participation", id),
                    None,
                )
                .await?;
            print_action(&body, json_output)?;
        }

        Commands::Cancel { id } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::DELETE,
                    session,
                    &format!("/challenges/{}/participation", id),
                    None,
                )
                .await?;
            print_action(&body, json_output)?;
        }

        Commands::Comment { id, text } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::POST,
                    session,
                    &format!("/challenges/{}/comments", id),
                    Some(json!({ "text": text })),
                )
                .await?;
            print_action(&body, json_output)?;
        }

        Commands::Comments { id } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::GET,
                    session,
                    &format!("/challenges/{}/comments", id),
                    None,
                )
                .await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_comments(&body["comments"], "");
            }
        }

        Commands::Suggest {
            title,
            description,
            difficulty,
            duration,
        } => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(
                    Method::POST,
                    session,
                    "/challenges",
                    Some(json!({
                        "title": title,
                        "description": description,
                        "difficulty": difficulty,
                        "duration": duration,
                    })),
                )
                .await?;
            print_action(&body, json_output)?;

            if !json_output {
                if let Some(challenge) = body["state"]["challenges"]
                    .as_array()
                    .and_then(|c| c.last())
                {
                    println!(
                        "Added #{} with {} points",
                        challenge["id"].as_u64().unwrap_or(0),
                        challenge["points"].as_u64().unwrap_or(0)
                    );
                }
            }
        }

        Commands::Mine => {
            let session = require_session(&cli)?;
            let body = client
                .session_send(Method::GET, session, "/views/my-participation", None)
                .await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_participation(&body);
            }
        }

        Commands::Status => {
            let health = client.send(Method::GET, "/health", None).await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("Websim Challenge v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!(
                    "API Status: {}",
                    health["status"].as_str().unwrap_or("unknown")
                );
                println!(
                    "Sessions: {} / {}",
                    health["sessions"].as_u64().unwrap_or(0),
                    health["max_sessions"].as_u64().unwrap_or(0)
                );
                if let Some(uptime) = health["uptime_seconds"].as_u64() {
                    println!("Uptime: {}", format_duration(uptime));
                }
            }
        }

        Commands::Config { output } => {
            let config = websim_challenge::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn require_session(cli: &Cli) -> anyhow::Result<&str> {
    cli.session
        .as_deref()
        .context("No session. Run `websim new` and set WEBSIM_SESSION or pass --session")
}

fn print_action(body: &Value, json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(body)?);
        return Ok(());
    }

    println!("{}", body["notice"].as_str().unwrap_or("Done."));
    println!(
        "Points: {}",
        body["state"]["total_points"].as_u64().unwrap_or(0)
    );
    Ok(())
}

fn print_catalog(view: &Value) {
    let cards = match view["cards"].as_array() {
        Some(c) if !c.is_empty() => c,
        _ => {
            println!("No challenges match this filter.");
            return;
        }
    };

    println!(
        "{:<4} {:<32} {:<13} {:<16} {:<9} {:>6}  {}",
        "ID", "Title", "Difficulty", "Category", "Duration", "Points", "Joined"
    );
    println!("{}", "-".repeat(92));

    for card in cards {
        println!(
            "{:<4} {:<32} {:<13} {:<16} {:<9} {:>6}  {}",
            card["id"].as_u64().unwrap_or(0),
            card["title"].as_str().unwrap_or("-"),
            card["difficulty"].as_str().unwrap_or("-"),
            card["category"].as_str().unwrap_or("-"),
            card["duration"].as_str().unwrap_or("-"),
            card["points"].as_u64().unwrap_or(0),
            if card["joined"].as_bool().unwrap_or(false) { "yes" } else { "" }
        );
        print_comments(&card["comments"], "      ");
    }
}

fn print_comments(comments: &Value, indent: &str) {
    let Some(comments) = comments.as_array() else {
        return;
    };

    if comments.is_empty() && indent.is_empty() {
        println!("No comments yet.");
    }

    for comment in comments {
        println!(
            "{}{}: {}  ({})",
            indent,
            comment["author"].as_str().unwrap_or("-"),
            comment["text"].as_str().unwrap_or(""),
            comment["date"].as_str().unwrap_or("-")
        );
    }
}

fn print_participation(view: &Value) {
    println!(
        "Total points: {}",
        view["total_points"].as_u64().unwrap_or(0)
    );
    println!();

    if view["empty"].as_bool().unwrap_or(true) {
        println!("You have not joined any challenges yet.");
        return;
    }

    println!("By category:");
    if let Some(slices) = view["breakdown"]["slices"].as_array() {
        for slice in slices {
            let share = slice["share"].as_f64().unwrap_or(0.0);
            println!(
                "  {:<20} {:>3}  {:>5.1}%  {}",
                slice["category"].as_str().unwrap_or("-"),
                slice["count"].as_u64().unwrap_or(0),
                share * 100.0,
                "#".repeat((share * 20.0).round() as usize)
            );
        }
    }

    println!();
    println!("Joined challenges:");
    if let Some(entries) = view["entries"].as_array() {
        for entry in entries {
            println!(
                "  * {} [{}] {} points, joined {}",
                entry["title"].as_str().unwrap_or("-"),
                entry["category"].as_str().unwrap_or("-"),
                entry["points"].as_u64().unwrap_or(0),
                entry["joined_on"].as_str().unwrap_or("-")
            );
        }
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
