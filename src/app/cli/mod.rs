//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::adapters::ConsoleLogSink;
use crate::app::orchestrator::ExecutionContext;
use crate::domain::validation::{Field, ValidationOutcome, validate_member};
use crate::domain::{
    AppError, ConnectionProfile, DatasetTarget, FileOption, PASSWORD_ENV_VAR, Protocol,
    ZosConnection, ZosmfApiConfig,
};

#[derive(Parser)]
#[command(name = "dsput")]
#[command(version)]
#[command(
    about = "Write files into z/OS partitioned dataset members over z/OSMF",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write content into DSN(MEMBER) through the gateway
    #[clap(visible_alias = "w")]
    Write {
        /// Target dataset name (dot-separated qualifiers, up to 44 characters)
        dsn: String,
        /// Target member name (up to 8 characters)
        member: String,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        gateway: GatewayArgs,
        /// Root directory for --workspace-file resolution
        #[arg(long, default_value = ".")]
        workspace_root: PathBuf,
    },
    /// Validate a single configuration field value
    #[clap(visible_alias = "c")]
    Check {
        /// Field name: dsn, member, fileOption, localFilePath, workspacePath
        #[arg(long)]
        field: String,
        /// Value to validate
        #[arg(long, default_value = "")]
        value: String,
        /// Currently selected source option (affects the path fields)
        #[arg(long)]
        file_option: Option<String>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Read content from a local file path
    #[arg(long)]
    local_file: Option<PathBuf>,
    /// Read content from a path inside the workspace
    #[arg(long)]
    workspace_file: Option<PathBuf>,
    /// Use the given text as content
    #[arg(long)]
    content: Option<String>,
}

impl SourceArgs {
    fn into_file_option(self) -> Result<FileOption, AppError> {
        match (self.local_file, self.workspace_file, self.content) {
            (Some(path), None, None) => Ok(FileOption::Local(path)),
            (None, Some(path), None) => Ok(FileOption::Workspace(path)),
            (None, None, Some(content)) => Ok(FileOption::Inline(content)),
            _ => Err(AppError::Validation(
                "Exactly one of --local-file, --workspace-file, --content is required".to_string(),
            )),
        }
    }
}

#[derive(Args)]
struct GatewayArgs {
    /// Connection profile TOML file
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Gateway host (overrides the profile)
    #[arg(long)]
    host: Option<String>,
    /// Gateway port (overrides the profile)
    #[arg(long)]
    port: Option<u16>,
    /// Gateway user (overrides the profile)
    #[arg(long)]
    user: Option<String>,
    /// Transport scheme, http or https (overrides the profile)
    #[arg(long)]
    protocol: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Accept self-signed gateway certificates
    #[arg(long)]
    insecure: bool,
}

impl GatewayArgs {
    fn resolve(self) -> Result<(ZosConnection, ZosmfApiConfig), AppError> {
        let (profile_connection, mut api) = match self.profile {
            Some(path) => {
                let profile = ConnectionProfile::load(&path)?;
                (Some(profile.connection.clone()), profile.api)
            }
            None => (None, ZosmfApiConfig::default()),
        };

        if let Some(timeout_secs) = self.timeout_secs {
            api.timeout_secs = timeout_secs;
        }
        if self.insecure {
            api.allow_self_signed = true;
        }
        api.validate()?;

        let host = self
            .host
            .or_else(|| profile_connection.as_ref().map(|c| c.host.clone()))
            .ok_or_else(|| AppError::Configuration("Gateway host is required".to_string()))?;
        let port = self
            .port
            .or_else(|| profile_connection.as_ref().map(|c| c.port))
            .ok_or_else(|| AppError::Configuration("Gateway port is required".to_string()))?;
        let user = self
            .user
            .or_else(|| profile_connection.as_ref().map(|c| c.user.clone()))
            .ok_or_else(|| AppError::Configuration("Gateway user is required".to_string()))?;
        let protocol_key = self
            .protocol
            .or_else(|| profile_connection.as_ref().map(|c| c.protocol.clone()))
            .unwrap_or_else(|| "https".to_string());
        let protocol = Protocol::from_str(&protocol_key).ok_or_else(|| {
            AppError::Configuration(format!(
                "Unsupported protocol '{}': expected http or https",
                protocol_key
            ))
        })?;

        let password = std::env::var(PASSWORD_ENV_VAR)
            .map_err(|_| AppError::EnvironmentVariableMissing(PASSWORD_ENV_VAR.to_string()))?;

        Ok((ZosConnection { host, port, user, password, protocol }, api))
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Write { dsn, member, source, gateway, workspace_root } => {
            run_write(dsn, member, source, gateway, workspace_root).map(|_| 0)
        }
        Commands::Check { field, value, file_option } => {
            run_check(&field, &value, file_option.as_deref())
        }
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_write(
    dsn: String,
    member: String,
    source: SourceArgs,
    gateway: GatewayArgs,
    workspace_root: PathBuf,
) -> Result<(), AppError> {
    let (connection, api) = gateway.resolve()?;
    let option = source.into_file_option()?;

    if let ValidationOutcome::Warning(reason) = validate_member(&member) {
        eprintln!("⚠️  {}", reason);
    }

    let sink = ConsoleLogSink::new();
    let ctx = ExecutionContext::new(workspace_root, &sink);
    crate::write_member(connection, &api, DatasetTarget::new(dsn, member), option, &ctx)?;
    Ok(())
}

fn run_check(field: &str, value: &str, file_option: Option<&str>) -> Result<i32, AppError> {
    let field = Field::from_key(field).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown field '{}': expected one of dsn, member, fileOption, localFilePath, workspacePath",
            field
        ))
    })?;

    match crate::check_field(field, value, file_option) {
        ValidationOutcome::Ok => {
            println!("✅ {} is valid", field.key());
            Ok(0)
        }
        ValidationOutcome::Warning(reason) => {
            println!("⚠️  {}", reason);
            Ok(0)
        }
        ValidationOutcome::Error(reason) => {
            println!("❌ {}", reason);
            Ok(1)
        }
    }
}
