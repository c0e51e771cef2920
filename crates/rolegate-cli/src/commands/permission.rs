//! Permission catalog commands (read-only).

use crate::context::App;
use crate::style;
use anyhow::Result;
use rolegate_rbac::Action;
use rolegate_types::PermissionId;

pub fn list(app: &App, json: bool) -> Result<()> {
    app.authorize(Action::ListPermissions, None)?;

    let permissions = app.client()?.list_permissions()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&permissions)?);
    } else {
        style::print_listing(
            &style::permission_table(&permissions),
            permissions.len(),
            "permission",
        );
    }
    Ok(())
}

pub fn show(app: &App, id: String) -> Result<()> {
    app.authorize(Action::ViewPermission, None)?;

    let permission = app.client()?.get_permission(&PermissionId::from(id))?;

    let created = permission
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    let table = style::info_table(&[
        ("ID", permission.id.to_string()),
        ("Name", permission.name.clone()),
        (
            "Description",
            permission
                .description
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Resource", permission.resource.clone()),
        ("Action", permission.action.clone()),
        ("Created", created),
    ]);
    println!("{table}");
    Ok(())
}
