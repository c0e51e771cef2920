//! Rolegate terminal console.
//!
//! Administration console for a user/role/permission management API.
//!
//! # Quick Start
//!
//! ```bash
//! # Sign in (the session is stored locally)
//! rolegate login --email admin@example.com
//!
//! # Browse accounts
//! rolegate user list
//!
//! # Act on one
//! rolegate user change-role u-1042 premium_user
//! ```

mod commands;
mod context;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};
use context::App;
use rolegate_rbac::Role;

/// Rolegate - administration console for the user/role/permission API.
#[derive(Parser)]
#[command(name = "rolegate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Management API base URL (overrides configuration).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Sign in to the management API.
    Login {
        /// Email address (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Sign out and clear the stored session.
    Logout,

    /// Register a new account.
    Register {
        /// Email address.
        #[arg(short, long)]
        email: String,

        /// Username.
        #[arg(short, long)]
        username: String,
    },

    /// Show the signed-in account.
    Whoami {
        /// Re-fetch the account from the server and refresh the session.
        #[arg(long)]
        refresh: bool,
    },

    /// Request a password reset email.
    PasswordResetRequest {
        /// Email address of the account.
        email: String,
    },

    /// Complete a password reset with an emailed token.
    PasswordReset {
        /// Reset token from the email.
        token: String,
    },

    /// Resend the account verification email.
    ResendVerification {
        /// Email address of the account.
        email: String,
    },

    /// User administration.
    #[command(subcommand)]
    User(UserCommands),

    /// Role catalog administration.
    #[command(subcommand)]
    Role(RoleCommands),

    /// Permission catalog (read-only).
    #[command(subcommand)]
    Permission(PermissionCommands),
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all user accounts.
    List {
        /// Print raw JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one account.
    Show {
        /// User ID.
        id: String,
    },

    /// Update account profile fields.
    Update {
        /// User ID.
        id: String,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Delete an account.
    Delete {
        /// User ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Change an account's role (base tiers only).
    ChangeRole {
        /// User ID.
        id: String,

        /// New role: user, basic_user or premium_user.
        role: Role,
    },

    /// Promote an account to moderator.
    PromoteModerator {
        /// User ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Promote an account to admin (system admins only).
    PromoteAdmin {
        /// User ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Demote an account one tier down.
    Demote {
        /// User ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RoleCommands {
    /// List all roles.
    List {
        /// Print raw JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one role and its permissions.
    Show {
        /// Role ID.
        id: String,
    },

    /// Create a role.
    Create {
        /// Role name.
        name: String,

        /// Role description.
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Update a role's name or description.
    Update {
        /// Role ID.
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a role.
    Delete {
        /// Role ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PermissionCommands {
    /// List all permissions.
    List {
        /// Print raw JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one permission.
    Show {
        /// Permission ID.
        id: String,
    },
}

fn main() {
    if let Err(err) = run() {
        style::print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        style::set_no_color(true);
    }

    if let Commands::Version = cli.command {
        commands::version::run();
        return Ok(());
    }

    let app = App::load(cli.server.as_deref())?;

    match cli.command {
        Commands::Version => unreachable!("handled above"),
        Commands::Login { email } => commands::auth::login(&app, email),
        Commands::Logout => commands::auth::logout(&app),
        Commands::Register { email, username } => commands::auth::register(&app, email, username),
        Commands::Whoami { refresh } => commands::auth::whoami(&app, refresh),
        Commands::PasswordResetRequest { email } => {
            commands::auth::password_reset_request(&app, email)
        }
        Commands::PasswordReset { token } => commands::auth::password_reset(&app, token),
        Commands::ResendVerification { email } => commands::auth::resend_verification(&app, email),
        Commands::User(cmd) => match cmd {
            UserCommands::List { json } => commands::user::list(&app, json),
            UserCommands::Show { id } => commands::user::show(&app, id),
            UserCommands::Update {
                id,
                username,
                email,
                first_name,
                last_name,
            } => commands::user::update(&app, id, username, email, first_name, last_name),
            UserCommands::Delete { id, yes } => commands::user::delete(&app, id, yes),
            UserCommands::ChangeRole { id, role } => commands::user::change_role(&app, id, role),
            UserCommands::PromoteModerator { id, yes } => {
                commands::user::promote_moderator(&app, id, yes)
            }
            UserCommands::PromoteAdmin { id, yes } => commands::user::promote_admin(&app, id, yes),
            UserCommands::Demote { id, yes } => commands::user::demote(&app, id, yes),
        },
        Commands::Role(cmd) => match cmd {
            RoleCommands::List { json } => commands::role::list(&app, json),
            RoleCommands::Show { id } => commands::role::show(&app, id),
            RoleCommands::Create { name, description } => {
                commands::role::create(&app, name, description)
            }
            RoleCommands::Update {
                id,
                name,
                description,
            } => commands::role::update(&app, id, name, description),
            RoleCommands::Delete { id, yes } => commands::role::delete(&app, id, yes),
        },
        Commands::Permission(cmd) => match cmd {
            PermissionCommands::List { json } => commands::permission::list(&app, json),
            PermissionCommands::Show { id } => commands::permission::show(&app, id),
        },
    }
}
