//! Sign-in, sign-out and account self-service commands.

use crate::context::App;
use crate::style;
use crate::style::colors::SemanticStyle;
use anyhow::{bail, Context, Result};
use dialoguer::{Input, Password};
use rolegate_rbac::Role;

/// Sign in and persist the session.
pub fn login(app: &App, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .context("failed to read email")?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("failed to read password")?;

    let client = app.client()?;
    let session = client.login(&email, &password)?;
    app.store.save(&session)?;

    style::print_success(&format!(
        "Signed in as {} ({})",
        session.user.username.header(),
        session.user.user_type.info()
    ));
    if session.user.user_type.is_at_least(Role::Moderator) {
        style::print_hint("administrative commands are available; see `rolegate --help`");
    }
    Ok(())
}

/// Sign out: invalidate the server session and clear the local one.
pub fn logout(app: &App) -> Result<()> {
    if app.session().is_none() {
        style::print_warn("already signed out");
        return Ok(());
    }

    // Clear locally even if the server call fails; the token may already
    // have expired.
    if let Err(err) = app.client()?.logout() {
        style::print_warn(&format!("server sign-out failed: {err}"));
    }
    app.store.clear()?;

    style::print_success("Signed out");
    Ok(())
}

/// Register a new account.
pub fn register(app: &App, email: String, username: String) -> Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "passwords do not match")
        .interact()
        .context("failed to read password")?;

    let message = app.client()?.register(&email, &username, &password)?;
    style::print_success(
        message
            .as_deref()
            .unwrap_or("Account created. Check your email for a verification link"),
    );
    Ok(())
}

/// Show the signed-in account.
pub fn whoami(app: &App, refresh: bool) -> Result<()> {
    let Some(session) = app.session() else {
        bail!("not signed in. Run `rolegate login` first");
    };

    let user = if refresh {
        let user = app.client()?.me()?;
        // Keep the stored snapshot current so later decisions see the
        // server's view of the role.
        app.store.save(&rolegate_client::Session {
            token: session.token.clone(),
            user: user.clone(),
        })?;
        user
    } else {
        session.user.clone()
    };

    let table = style::info_table(&[
        ("ID", user.id.to_string()),
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Name", user.display_name()),
        ("Role", user.user_type.to_string()),
        ("Active", if user.active { "yes" } else { "no" }.to_string()),
    ]);
    println!("{table}");
    Ok(())
}

/// Request a password reset email.
pub fn password_reset_request(app: &App, email: String) -> Result<()> {
    let message = app.client()?.request_password_reset(&email)?;
    style::print_success(
        message
            .as_deref()
            .unwrap_or("If the address exists, a reset email is on its way"),
    );
    Ok(())
}

/// Complete a password reset with an emailed token.
pub fn password_reset(app: &App, token: String) -> Result<()> {
    let password = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm new password", "passwords do not match")
        .interact()
        .context("failed to read password")?;

    let message = app.client()?.reset_password(&token, &password)?;
    style::print_success(message.as_deref().unwrap_or("Password updated"));
    Ok(())
}

/// Resend the account verification email.
pub fn resend_verification(app: &App, email: String) -> Result<()> {
    let message = app.client()?.resend_verification(&email)?;
    style::print_success(message.as_deref().unwrap_or("Verification email sent"));
    Ok(())
}
