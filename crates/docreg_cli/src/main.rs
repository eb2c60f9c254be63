//! Command-line front end for the docs overlay.
//!
//! # Responsibility
//! - Drive `DocsService` against a SQLite store file for local inspection.
//! - Keep output plain and deterministic.
//!
//! `DOCREG_CONFIG` may name a JSON `DocsConfig` file. Logging is enabled
//! when `DOCREG_LOG_DIR` names an absolute directory; `DOCREG_LOG_LEVEL`
//! overrides the configured level.

use clap::{Parser, Subcommand, ValueEnum};
use docreg_core::db::{open_db, DbError};
use docreg_core::{
    init_logging, parse_role, role_allows, Catalog, Category, ConfigError, DocsCapability,
    DocsConfig, DocsService, DocsServiceError, DocumentId, DocumentOrigin, DocumentPatch,
    NewDocument, Role, SqliteKvStore, UpdateOutcome,
};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "docreg_cli")]
#[command(about = "Inspect and edit the Northfield docs overlay")]
struct Cli {
    /// Viewer role used to gate edit, add and delete.
    #[arg(long, global = true, value_parser = parse_role, default_value = "admin")]
    role: Role,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Ping,
    Version,
    /// Lists static catalog category names.
    Categories,
    /// Prints the merged registry.
    List { db: PathBuf },
    Show { db: PathBuf, id: String },
    Edit {
        db: PathBuf,
        id: String,
        #[arg(value_enum)]
        field: Field,
        value: String,
    },
    Add {
        db: PathBuf,
        category: String,
        title: String,
        content: Option<String>,
    },
    Delete { db: PathBuf, id: String },
    /// Drops the override of a static document.
    Reset { db: PathBuf, id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Field {
    Title,
    Content,
    Description,
}

impl Field {
    fn patch(self, value: &str) -> DocumentPatch {
        match self {
            Self::Title => DocumentPatch::title(value),
            Self::Content => DocumentPatch::content(value),
            Self::Description => DocumentPatch::description(value),
        }
    }
}

#[derive(Debug)]
enum CliError {
    Config(String),
    Denied {
        role: Role,
        capability: DocsCapability,
    },
    Db(DbError),
    Docs(DocsServiceError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "{message}"),
            Self::Denied { role, capability } => write!(
                f,
                "role `{}` may not {} documents",
                role.as_str(),
                capability_verb(*capability)
            ),
            Self::Db(err) => write!(f, "cannot open store: {err}"),
            Self::Docs(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) | Self::Denied { .. } => None,
            Self::Db(err) => Some(err),
            Self::Docs(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DocsServiceError> for CliError {
    fn from(value: DocsServiceError) -> Self {
        Self::Docs(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config);

    match run(&config, cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<DocsConfig, CliError> {
    let Ok(path) = std::env::var("DOCREG_CONFIG") else {
        return Ok(DocsConfig::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| CliError::Config(format!("cannot read config `{path}`: {err}")))?;
    Ok(DocsConfig::from_json(&raw)?)
}

fn setup_logging(config: &DocsConfig) {
    let Ok(log_dir) = std::env::var("DOCREG_LOG_DIR") else {
        return;
    };
    let level = std::env::var("DOCREG_LOG_LEVEL").unwrap_or_else(|_| config.log_level.clone());
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn run(config: &DocsConfig, cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Ping => println!("docreg_core ping={}", docreg_core::ping()),
        Commands::Version => println!("docreg_core version={}", docreg_core::core_version()),
        Commands::Categories => {
            for name in Catalog::builtin().category_names() {
                println!("{name}");
            }
        }
        Commands::List { db } => with_service(config, &db, |service| {
            print_registry(&service.registry());
            Ok(())
        })?,
        Commands::Show { db, id } => with_service(config, &db, |service| {
            let id = DocumentId::new(id);
            match (service.get_document(&id), service.document_origin(&id)) {
                (Some(document), Some(origin)) => {
                    println!("id: {}", document.id);
                    println!("origin: {}", origin_label(origin));
                    println!("title: {}", document.title);
                    println!("description: {}", document.description);
                    println!();
                    println!("{}", document.content);
                }
                _ => println!("not found: {id}"),
            }
            Ok(())
        })?,
        Commands::Edit {
            db,
            id,
            field,
            value,
        } => {
            ensure_allowed(cli.role, DocsCapability::Edit)?;
            let patch = field.patch(&value);
            with_service(config, &db, |service| {
                let id = DocumentId::new(id);
                match service.update_document(&id, &patch)? {
                    UpdateOutcome::Added => println!("updated added document {id}"),
                    UpdateOutcome::Overridden => println!("overrode {id}"),
                    UpdateOutcome::NotFound => println!("not found: {id}"),
                }
                Ok(())
            })?;
        }
        Commands::Add {
            db,
            category,
            title,
            content,
        } => {
            ensure_allowed(cli.role, DocsCapability::Add)?;
            let mut request = NewDocument::new(title);
            if let Some(content) = content {
                request = request.with_content(content);
            }
            with_service(config, &db, |service| {
                let document = service.add_document(&category, request)?;
                println!("added {} to {}", document.id, category.trim());
                Ok(())
            })?;
        }
        Commands::Delete { db, id } => {
            ensure_allowed(cli.role, DocsCapability::Delete)?;
            with_service(config, &db, |service| {
                let id = DocumentId::new(id);
                if service.delete_document(&id)? {
                    println!("deleted {id}");
                } else {
                    println!("nothing to delete for {id}");
                }
                Ok(())
            })?;
        }
        Commands::Reset { db, id } => {
            ensure_allowed(cli.role, DocsCapability::Edit)?;
            with_service(config, &db, |service| {
                let id = DocumentId::new(id);
                if service.reset_document(&id)? {
                    println!("reset {id}");
                } else {
                    println!("no override for {id}");
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn ensure_allowed(role: Role, capability: DocsCapability) -> Result<(), CliError> {
    if role_allows(role, capability) {
        Ok(())
    } else {
        Err(CliError::Denied { role, capability })
    }
}

fn with_service(
    config: &DocsConfig,
    db: &Path,
    action: impl FnOnce(&mut DocsService<SqliteKvStore<'_>>) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let mut service = DocsService::new(
        Catalog::builtin(),
        SqliteKvStore::new(&conn),
        &config.keys,
    );
    action(&mut service).map_err(|err| {
        if let CliError::Docs(DocsServiceError::Persist(store_err)) = &err {
            warn!("event=cli_persist module=cli status=error error={store_err}");
        }
        err
    })
}

fn print_registry(registry: &[Category]) {
    for category in registry {
        println!("{} ({})", category.name, category.items.len());
        for document in &category.items {
            println!("  {:<24} {}", document.id.as_str(), document.title);
        }
    }
}

fn origin_label(origin: DocumentOrigin) -> &'static str {
    match origin {
        DocumentOrigin::Static => "static",
        DocumentOrigin::Overridden => "overridden",
        DocumentOrigin::Added => "added",
    }
}

fn capability_verb(capability: DocsCapability) -> &'static str {
    match capability {
        DocsCapability::View => "view",
        DocsCapability::Edit => "edit",
        DocsCapability::Add => "add",
        DocsCapability::Delete => "delete",
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_allowed, Cli, CliError, Commands, Field};
    use clap::Parser;
    use docreg_core::{DocsCapability, Role};
    use std::path::PathBuf;

    #[test]
    fn parses_edit_with_field_value_enum() {
        let cli = Cli::try_parse_from(["docreg_cli", "edit", "docs.db", "e1", "title", "New"])
            .expect("edit should parse");

        assert_eq!(cli.role, Role::Admin);
        match cli.command {
            Commands::Edit {
                db,
                id,
                field,
                value,
            } => {
                assert_eq!(db, PathBuf::from("docs.db"));
                assert_eq!(id, "e1");
                assert_eq!(field, Field::Title);
                assert_eq!(value, "New");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_field_and_missing_arguments() {
        assert!(
            Cli::try_parse_from(["docreg_cli", "edit", "docs.db", "e1", "id", "x"]).is_err()
        );
        assert!(Cli::try_parse_from(["docreg_cli", "show", "docs.db"]).is_err());
        assert!(Cli::try_parse_from(["docreg_cli"]).is_err());
    }

    #[test]
    fn add_content_is_optional_and_role_is_global() {
        let cli = Cli::try_parse_from([
            "docreg_cli",
            "add",
            "docs.db",
            "Engines",
            "Fresh",
            "--role",
            "Editor",
        ])
        .expect("add should parse");

        assert_eq!(cli.role, Role::Editor);
        match cli.command {
            Commands::Add { content, .. } => assert_eq!(content, None),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["docreg_cli", "ping", "--role", "owner"]).is_err());
    }

    #[test]
    fn field_builds_single_field_patch() {
        let patch = Field::Description.patch("summary");
        assert_eq!(patch.description.as_deref(), Some("summary"));
        assert!(patch.title.is_none());
        assert!(patch.content.is_none());
    }

    #[test]
    fn denied_capability_names_role() {
        ensure_allowed(Role::Editor, DocsCapability::Edit).expect("editors edit");
        let err = ensure_allowed(Role::Member, DocsCapability::Add).expect_err("members cannot add");
        assert!(matches!(err, CliError::Denied { .. }));
        assert_eq!(err.to_string(), "role `member` may not add documents");
    }
}
