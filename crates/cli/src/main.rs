//! `todo-app` CLI entry-point.
//!
//! Thin operator front-end over the `db` repositories. Every sub-command
//! prints its result as JSON on stdout; logs go to stderr.
//!
//! Available sub-commands:
//! - `user`  — create or fetch a user.
//! - `list`  — create, list, fetch, update, or delete todo lists.
//! - `item`  — create, list, fetch, update, or delete todo items.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use db::repository::{todo_items, todo_lists, users};
use db::{DbConfig, DbPool};
use serde::Serialize;
use serde_json::json;
use todo::{CreateItemInput, CreateListInput, CreateUserInput, UpdateItemInput, UpdateListInput};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "todo-app",
    about = "Manage users, todo lists, and todo items in Postgres",
    version
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

/// Where to connect. `--database-url` wins over the discrete settings.
#[derive(Args)]
struct ConnectionArgs {
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,
    #[arg(long, env = "DB_HOST", default_value = "localhost", global = true)]
    db_host: String,
    #[arg(long, env = "DB_PORT", default_value_t = 5432, global = true)]
    db_port: u16,
    #[arg(long, env = "DB_USERNAME", default_value = "postgres", global = true)]
    db_username: String,
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true, global = true)]
    db_password: String,
    #[arg(long, env = "DB_NAME", default_value = "postgres", global = true)]
    db_name: String,
    #[arg(long, env = "DB_SSLMODE", default_value = "disable", global = true)]
    db_sslmode: String,
    #[arg(long, default_value_t = 5, global = true)]
    max_connections: u32,
}

impl ConnectionArgs {
    async fn connect(&self) -> Result<DbPool> {
        let pool = match &self.database_url {
            Some(url) => db::pool::create_pool(url, self.max_connections).await,
            None => {
                let config = DbConfig {
                    host: self.db_host.clone(),
                    port: self.db_port,
                    username: self.db_username.clone(),
                    password: self.db_password.clone(),
                    db_name: self.db_name.clone(),
                    ssl_mode: self.db_sslmode.clone(),
                };
                db::pool::create_pool_with_config(&config, self.max_connections).await
            }
        };
        pool.context("failed to connect to database")
    }
}

#[derive(Subcommand)]
enum Command {
    /// Manage users.
    #[command(subcommand)]
    User(UserCommand),
    /// Manage todo lists.
    #[command(subcommand)]
    List(ListCommand),
    /// Manage todo items.
    #[command(subcommand)]
    Item(ItemCommand),
}

#[derive(Subcommand)]
enum UserCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        /// Already-hashed password.
        #[arg(long)]
        password_hash: String,
    },
    Get {
        id: i32,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    Create {
        #[arg(long)]
        user_id: i32,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List every todo list the user owns.
    Ls {
        #[arg(long)]
        user_id: i32,
    },
    Get {
        #[arg(long)]
        user_id: i32,
        list_id: i32,
    },
    Update {
        #[arg(long)]
        user_id: i32,
        list_id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        #[arg(long)]
        user_id: i32,
        list_id: i32,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Create an item inside a list.
    Create {
        #[arg(long)]
        list_id: i32,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        done: bool,
    },
    /// List the items of one list.
    Ls {
        #[arg(long)]
        user_id: i32,
        #[arg(long)]
        list_id: i32,
    },
    Get {
        #[arg(long)]
        user_id: i32,
        item_id: i32,
    },
    /// Change only the given fields.
    Update {
        #[arg(long)]
        user_id: i32,
        item_id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        done: Option<bool>,
    },
    Delete {
        #[arg(long)]
        user_id: i32,
        item_id: i32,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_rows_affected(rows_affected: u64) -> Result<()> {
    print_json(&json!({ "rows_affected": rows_affected }))
}

async fn run_user(pool: &DbPool, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Create { name, username, password_hash } => {
            let input = CreateUserInput { name, username, password_hash };
            let id = users::create_user(pool, &input).await?;
            info!("Created user {id}");
            print_json(&json!({ "id": id }))
        }
        UserCommand::Get { id } => print_json(&users::get_user(pool, id).await?),
    }
}

async fn run_list(pool: &DbPool, command: ListCommand) -> Result<()> {
    match command {
        ListCommand::Create { user_id, title, description } => {
            let id = todo_lists::create(pool, user_id, &CreateListInput { title, description }).await?;
            info!("Created list {id} for user {user_id}");
            print_json(&json!({ "id": id }))
        }
        ListCommand::Ls { user_id } => print_json(&todo_lists::get_all(pool, user_id).await?),
        ListCommand::Get { user_id, list_id } => {
            print_json(&todo_lists::get_by_id(pool, user_id, list_id).await?)
        }
        ListCommand::Update { user_id, list_id, title, description } => {
            let input = UpdateListInput { title, description };
            print_rows_affected(todo_lists::update(pool, user_id, list_id, &input).await?)
        }
        ListCommand::Delete { user_id, list_id } => {
            print_rows_affected(todo_lists::delete(pool, user_id, list_id).await?)
        }
    }
}

async fn run_item(pool: &DbPool, command: ItemCommand) -> Result<()> {
    match command {
        ItemCommand::Create { list_id, title, description, done } => {
            let input = CreateItemInput { title, description, done };
            let id = todo_items::create(pool, list_id, &input).await?;
            info!("Created item {id} in list {list_id}");
            print_json(&json!({ "id": id }))
        }
        ItemCommand::Ls { user_id, list_id } => {
            print_json(&todo_items::get_all(pool, user_id, list_id).await?)
        }
        ItemCommand::Get { user_id, item_id } => {
            print_json(&todo_items::get_by_id(pool, user_id, item_id).await?)
        }
        ItemCommand::Update { user_id, item_id, title, description, done } => {
            let input = UpdateItemInput { title, description, done };
            print_rows_affected(todo_items::update(pool, user_id, item_id, &input).await?)
        }
        ItemCommand::Delete { user_id, item_id } => {
            print_rows_affected(todo_items::delete(pool, user_id, item_id).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pool = cli.connection.connect().await?;

    match cli.command {
        Command::User(command) => run_user(&pool, command).await,
        Command::List(command) => run_list(&pool, command).await,
        Command::Item(command) => run_item(&pool, command).await,
    }
}
