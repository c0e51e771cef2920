//! Role catalog administration commands.

use crate::context::App;
use crate::style;
use anyhow::{bail, Result};
use dialoguer::Confirm;
use rolegate_rbac::Action;
use rolegate_types::RoleId;

pub fn list(app: &App, json: bool) -> Result<()> {
    app.authorize(Action::ListRoles, None)?;

    let roles = app.client()?.list_roles()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&roles)?);
    } else {
        style::print_listing(&style::role_table(&roles), roles.len(), "role");
    }
    Ok(())
}

pub fn show(app: &App, id: String) -> Result<()> {
    app.authorize(Action::ViewRole, None)?;

    let role = app.client()?.get_role(&RoleId::from(id))?;

    let updated = role
        .updated_at
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    let table = style::info_table(&[
        ("ID", role.id.to_string()),
        ("Name", role.name.clone()),
        (
            "Description",
            role.description.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Updated", updated),
    ]);
    println!("{table}");

    if let Some(permissions) = &role.permissions {
        if !permissions.is_empty() {
            style::print_spacer();
            style::print_listing(
                &style::permission_table(permissions),
                permissions.len(),
                "permission",
            );
        }
    }
    Ok(())
}

pub fn create(app: &App, name: String, description: String) -> Result<()> {
    app.authorize(Action::CreateRole, None)?;

    if name.trim().is_empty() {
        bail!("role name must not be empty");
    }

    let message = app.client()?.create_role(name.trim(), description.trim())?;
    style::print_success(message.as_deref().unwrap_or("Role created"));
    Ok(())
}

pub fn update(
    app: &App,
    id: String,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    app.authorize(Action::UpdateRole, None)?;

    if name.is_none() && description.is_none() {
        bail!("nothing to update; pass --name and/or --description");
    }

    let id = RoleId::from(id);
    let client = app.client()?;

    // The update endpoint wants both fields; fill the gaps from the
    // current record.
    let current = client.get_role(&id)?;
    let name = name.unwrap_or(current.name);
    let description = description
        .or(current.description)
        .unwrap_or_default();

    let message = client.update_role(&id, name.trim(), description.trim())?;
    style::print_success(message.as_deref().unwrap_or("Role updated"));
    Ok(())
}

pub fn delete(app: &App, id: String, yes: bool) -> Result<()> {
    app.authorize(Action::DeleteRole, None)?;

    let id = RoleId::from(id);
    let client = app.client()?;
    let role = client.get_role(&id)?;

    if !yes
        && !Confirm::new()
            .with_prompt(format!(
                "Delete role '{}'? Users holding it lose its permissions",
                role.name
            ))
            .default(false)
            .interact()?
    {
        style::print_warn("cancelled");
        return Ok(());
    }

    let message = client.delete_role(&id)?;
    style::print_success(message.as_deref().unwrap_or("Role deleted"));
    Ok(())
}
