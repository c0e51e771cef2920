//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use rolegate_client::{Permission, RoleRecord, User};

use super::colors::SemanticStyle;

fn header_cell(text: &str) -> Cell {
    if super::no_color() {
        Cell::new(text)
    } else {
        Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
    }
}

fn base_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.iter().map(|h| header_cell(h)));
    table
}

/// Creates a table of user accounts.
pub fn user_table(users: &[User]) -> Table {
    let mut table = base_table(&["ID", "Username", "Email", "Role", "Active"]);
    for user in users {
        let active = if user.active { "✓" } else { "✗" };
        table.add_row(vec![
            Cell::new(user.id.as_str()),
            Cell::new(&user.username),
            Cell::new(&user.email),
            Cell::new(user.user_type.as_str()),
            if user.active && !super::no_color() {
                Cell::new(active).fg(Color::Green)
            } else {
                Cell::new(active)
            },
        ]);
    }
    table
}

/// Creates a table of role records.
pub fn role_table(roles: &[RoleRecord]) -> Table {
    let mut table = base_table(&["ID", "Name", "Description"]);
    for role in roles {
        table.add_row(vec![
            Cell::new(role.id.as_str()),
            Cell::new(&role.name),
            Cell::new(role.description.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

/// Creates a table of permission records.
pub fn permission_table(permissions: &[Permission]) -> Table {
    let mut table = base_table(&["ID", "Name", "Resource", "Action"]);
    for permission in permissions {
        table.add_row(vec![
            Cell::new(permission.id.as_str()),
            Cell::new(&permission.name),
            Cell::new(&permission.resource),
            Cell::new(&permission.action),
        ]);
    }
    table
}

/// Creates a key-value info table (two columns: key and value).
pub fn info_table(entries: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for (key, value) in entries {
        table.add_row(vec![Cell::new(key.header()), Cell::new(value)]);
    }
    table
}

/// Prints a listing table with a row-count footer.
pub fn print_listing(table: &Table, count: usize, noun: &str) {
    println!("{table}");
    let word = if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    };
    println!("{}", format!("({count} {word})").muted());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_rbac::Role;
    use rolegate_types::UserId;

    #[test]
    fn user_table_renders_one_row_per_user() {
        let users = vec![User {
            id: UserId::new("u-1"),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: None,
            last_name: None,
            user_type: Role::Moderator,
            active: true,
            created_at: None,
        }];

        let rendered = user_table(&users).to_string();
        assert!(rendered.contains("jdoe"));
        assert!(rendered.contains("moderator"));
    }

    #[test]
    fn info_table_pairs_keys_and_values() {
        let rendered =
            info_table(&[("Username", "jdoe".to_string()), ("Role", "admin".to_string())])
                .to_string();
        assert!(rendered.contains("Username"));
        assert!(rendered.contains("admin"));
    }
}
