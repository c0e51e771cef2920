//! User administration commands.
//!
//! Mutating commands fetch the target account first so the decision
//! function sees the target's current role, then act; this mirrors the
//! original console's two-step search-then-submit forms.

use crate::context::App;
use crate::style;
use anyhow::{bail, Result};
use dialoguer::Confirm;
use rolegate_client::{User, UserUpdate};
use rolegate_rbac::{Action, Role};
use rolegate_types::UserId;

pub fn list(app: &App, json: bool) -> Result<()> {
    app.authorize(Action::ListUsers, None)?;

    let users = app.client()?.list_users()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else {
        style::print_listing(&style::user_table(&users), users.len(), "user");
    }
    Ok(())
}

pub fn show(app: &App, id: String) -> Result<()> {
    app.authorize(Action::ViewUser, None)?;

    let user = app.client()?.get_user(&UserId::from(id))?;
    print_user(&user);
    Ok(())
}

pub fn update(
    app: &App,
    id: String,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    app.authorize(Action::UpdateUser, None)?;

    let update = UserUpdate {
        username,
        email,
        first_name,
        last_name,
    };
    if update.is_empty() {
        bail!("nothing to update; pass at least one of --username/--email/--first-name/--last-name");
    }

    let id = UserId::from(id);
    let message = app.client()?.update_user(&id, &update)?;
    style::print_success(message.as_deref().unwrap_or("User updated"));
    Ok(())
}

pub fn delete(app: &App, id: String, yes: bool) -> Result<()> {
    let id = UserId::from(id);
    let client = app.client()?;

    // Look the account up first: the decision needs the target's role.
    let user = client.get_user(&id)?;
    app.authorize(Action::DeleteUser, Some(user.user_type))?;

    if !yes && !confirm(&format!("Delete account '{}'? This cannot be undone", user.username))? {
        style::print_warn("cancelled");
        return Ok(());
    }

    let message = client.delete_user(&id)?;
    style::print_success(message.as_deref().unwrap_or("User deleted"));
    Ok(())
}

pub fn change_role(app: &App, id: String, role: Role) -> Result<()> {
    let id = UserId::from(id);
    let client = app.client()?;

    let user = client.get_user(&id)?;
    if user.user_type == role {
        bail!("'{}' already has role {role}", user.username);
    }
    app.authorize_role_change(user.user_type, role)?;

    let message = client.change_role(&id, role)?;
    style::print_success(message.as_deref().unwrap_or(&format!(
        "Role of '{}' changed from {} to {role}",
        user.username, user.user_type
    )));
    Ok(())
}

pub fn promote_moderator(app: &App, id: String, yes: bool) -> Result<()> {
    let id = UserId::from(id);
    let client = app.client()?;

    let user = client.get_user(&id)?;
    app.authorize(Action::PromoteToModerator, Some(user.user_type))?;

    if !yes
        && !confirm(&format!(
            "Promote '{}' to moderator? This grants additional privileges",
            user.username
        ))?
    {
        style::print_warn("cancelled");
        return Ok(());
    }

    let message = client.promote_to_moderator(&id)?;
    style::print_success(
        message
            .as_deref()
            .unwrap_or(&format!("'{}' promoted to moderator", user.username)),
    );
    Ok(())
}

pub fn promote_admin(app: &App, id: String, yes: bool) -> Result<()> {
    app.authorize(Action::PromoteToAdmin, None)?;

    if !yes && !confirm("Promote this account to admin?")? {
        style::print_warn("cancelled");
        return Ok(());
    }

    let id = UserId::from(id);
    let message = app.client()?.promote_to_admin(&id)?;
    style::print_success(message.as_deref().unwrap_or("User promoted to admin"));
    Ok(())
}

pub fn demote(app: &App, id: String, yes: bool) -> Result<()> {
    let id = UserId::from(id);
    let client = app.client()?;

    let user = client.get_user(&id)?;
    app.authorize(Action::DemoteUser, Some(user.user_type))?;

    // authorize guarantees a lower tier exists.
    let next = user
        .user_type
        .next_lower()
        .map_err(|err| anyhow::anyhow!(err))?;

    if !yes
        && !confirm(&format!(
            "Demote '{}' from {} to {next}?",
            user.username, user.user_type
        ))?
    {
        style::print_warn("cancelled");
        return Ok(());
    }

    let message = client.demote(&id)?;
    style::print_success(
        message
            .as_deref()
            .unwrap_or(&format!("'{}' demoted to {next}", user.username)),
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn print_user(user: &User) {
    let created = user
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    let table = style::info_table(&[
        ("ID", user.id.to_string()),
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Name", user.display_name()),
        ("Role", user.user_type.to_string()),
        ("Active", if user.active { "yes" } else { "no" }.to_string()),
        ("Created", created),
    ]);
    println!("{table}");
}
