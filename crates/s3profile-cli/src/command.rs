//! Subcommand execution through the profile editor.

use anyhow::{Context, bail};
use s3profile_core::{ConnectionTestOutcome, ProfileStore};
use s3profile_engine::{MainView, ProfileEditor, ReadyView};

use crate::TRACING_TARGET_COMMAND;
use crate::config::{Command, FieldArgs};

/// Prints every stored profile, one per line.
pub fn list(store: &dyn ProfileStore) {
    let profiles = store.profiles();
    if profiles.is_empty() {
        println!("No profiles.");
        return;
    }

    for profile in profiles.iter() {
        let config = &profile.config;
        println!(
            "{id}\t{origin}\t{name}\t{url}{anonymous}",
            id = config.creation_time,
            origin = profile.origin,
            name = config.friendly_name,
            url = config.url,
            anonymous = if config.is_anonymous() { "\t(anonymous)" } else { "" },
        );
    }
}

/// Runs `create`, `edit` or `test` against the editor.
pub async fn run(editor: &ProfileEditor, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::List => bail!("`list` does not edit profiles"),
        Command::Create { fields } | Command::Edit { fields, .. } => {
            let view = fill_form(editor, command, fields)?;
            let name = view.form_values.friendly_name.trim().to_owned();

            editor.submit().await.context("failed to save profile")?;
            println!("Saved profile \"{name}\".");
        }
        Command::Test { fields, .. } => {
            fill_form(editor, command, fields)?;

            let outcome = editor
                .test_connection()
                .await
                .context("failed to test the connection")?;
            editor.reset();

            match outcome {
                ConnectionTestOutcome::Success => println!("Connection succeeded."),
                ConnectionTestOutcome::Failure { error_message } => {
                    bail!("connection failed: {error_message}")
                }
            }
        }
    }

    Ok(())
}

/// Starts the session, applies the field flags and checks the result.
fn fill_form(
    editor: &ProfileEditor,
    command: &Command,
    fields: &FieldArgs,
) -> anyhow::Result<ReadyView> {
    editor
        .initialize(command.profile_identity())
        .context("cannot start editing")?;

    for change in fields.changes() {
        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            field = %change.key(),
            "Applying field flag"
        );
        editor.change_value(change)?;
    }

    let MainView::Ready(view) = editor.main() else {
        bail!("profile editor is not ready");
    };
    print_view(&view);

    if !view.is_form_submittable {
        editor.reset();
        let invalid: Vec<String> = view
            .form_values_errors
            .errors()
            .map(|(key, error)| format!("{} {error}", key.error_name()))
            .collect();
        bail!("invalid profile: {}", invalid.join(", "));
    }

    Ok(view)
}

fn print_view(view: &ReadyView) {
    let form = &view.form_values;
    let action = if view.is_editing_existing_config {
        "Editing"
    } else {
        "Creating"
    };

    println!("{action} profile \"{}\"", form.friendly_name);
    println!("  url:          {}", form.url);
    println!("  region:       {}", form.region.as_deref().unwrap_or("-"));
    println!(
        "  addressing:   {}",
        if form.path_style_access {
            "path-style"
        } else {
            "virtual-hosted"
        }
    );
    println!(
        "  credentials:  {}",
        if form.is_anonymous {
            "anonymous"
        } else {
            "access key"
        }
    );

    if let Some(examples) = &view.url_styles_examples {
        println!("  path-style:     {}", examples.path_style);
        println!("  virtual-hosted: {}", examples.virtual_hosted_style);
    }

    for (key, error) in view.form_values_errors.errors() {
        println!("  ! {key}: {error}");
    }
}
