//! Subcommands and form field flags.

use clap::{Args, Subcommand};
use s3profile_core::ProfileId;
use s3profile_engine::FormValueChange;

/// What to do with the profile store.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List stored profiles.
    List,

    /// Create a new profile.
    Create {
        #[clap(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing profile.
    Edit {
        /// Identity (creation time in milliseconds) of the profile to edit.
        id: i64,

        #[clap(flatten)]
        fields: FieldArgs,
    },

    /// Test connectivity of a new or edited profile without saving it.
    Test {
        /// Start from the stored profile with this identity.
        #[arg(long)]
        id: Option<i64>,

        #[clap(flatten)]
        fields: FieldArgs,
    },
}

impl Command {
    /// Returns the profile to start from, if any.
    pub fn profile_identity(&self) -> Option<ProfileId> {
        match self {
            Self::List | Self::Create { .. } => None,
            Self::Edit { id, .. } => Some(ProfileId::new(*id)),
            Self::Test { id, .. } => id.map(ProfileId::new),
        }
    }
}

/// Form fields to set, applied in declaration order.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Friendly name of the profile.
    #[arg(long)]
    pub name: Option<String>,

    /// Endpoint URL; `https://` is assumed without a scheme.
    #[arg(long)]
    pub url: Option<String>,

    /// Region; pass an empty string to clear it.
    #[arg(long)]
    pub region: Option<String>,

    /// Use path-style addressing (`host/bucket/key`).
    #[arg(long, conflicts_with = "virtual_hosted")]
    pub path_style: bool,

    /// Use virtual-hosted addressing (`bucket.host/key`).
    #[arg(long)]
    pub virtual_hosted: bool,

    /// Connect without credentials.
    #[arg(long, conflicts_with = "authenticated")]
    pub anonymous: bool,

    /// Connect with credentials.
    #[arg(long)]
    pub authenticated: bool,

    #[arg(long)]
    pub access_key_id: Option<String>,

    #[arg(long, env = "S3PROFILE_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    #[arg(long, env = "S3PROFILE_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,
}

impl FieldArgs {
    /// Returns the form changes the flags describe, in application order.
    ///
    /// An addressing flag comes after the URL, so it overrides whatever
    /// style the URL implies.
    pub fn changes(&self) -> Vec<FormValueChange> {
        let addressing = match (self.path_style, self.virtual_hosted) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        let anonymity = match (self.anonymous, self.authenticated) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        [
            self.name.clone().map(FormValueChange::FriendlyName),
            self.url.clone().map(FormValueChange::Url),
            self.region
                .clone()
                .map(|region| FormValueChange::Region(Some(region).filter(|r| !r.is_empty()))),
            addressing.map(FormValueChange::PathStyleAccess),
            anonymity.map(FormValueChange::IsAnonymous),
            self.access_key_id
                .clone()
                .map(|v| FormValueChange::AccessKeyId(Some(v))),
            self.secret_access_key
                .clone()
                .map(|v| FormValueChange::SecretAccessKey(Some(v))),
            self.session_token
                .clone()
                .map(|v| FormValueChange::SessionToken(Some(v).filter(|t| !t.is_empty()))),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        Harness::try_parse_from(std::iter::once("s3profile").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_changes_follow_flag_order() {
        let Command::Create { fields } = parse(&[
            "create",
            "--virtual-hosted",
            "--url",
            "minio.lab",
            "--name",
            "lab",
        ]) else {
            panic!("expected create");
        };

        assert_eq!(
            fields.changes(),
            vec![
                FormValueChange::FriendlyName("lab".into()),
                FormValueChange::Url("minio.lab".into()),
                FormValueChange::PathStyleAccess(false),
            ]
        );
    }

    #[test]
    fn test_empty_region_clears_it() {
        let fields = FieldArgs {
            region: Some(String::new()),
            ..FieldArgs::default()
        };
        assert_eq!(fields.changes(), vec![FormValueChange::Region(None)]);
    }

    #[test]
    fn test_conflicting_flags_are_rejected() {
        let result = Harness::try_parse_from(["s3profile", "create", "--anonymous", "--authenticated"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_identity() {
        assert_eq!(
            parse(&["edit", "42"]).profile_identity(),
            Some(ProfileId::new(42))
        );
        assert_eq!(parse(&["test"]).profile_identity(), None);
        assert_eq!(
            parse(&["test", "--id", "7"]).profile_identity(),
            Some(ProfileId::new(7))
        );
    }
}
