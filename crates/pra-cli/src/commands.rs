use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;

use pra_codec::{JsonObject, TestCaseEnvelope};
use pra_server::response::{CodeFilesData, StoredCodeData, StoredSummaryData, SummaryData};
use pra_server::{PraServer, ServerConfig};
use pra_service::StorageService;
use pra_store::FsBlobStore;

use crate::cli::*;

/// Global options that shape every command.
struct Globals {
    data_dir: Option<std::path::PathBuf>,
    bucket: Option<String>,
    format: OutputFormat,
}

impl Globals {
    fn json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// File or default config, then `PRA_*` env, then command-line flags.
    fn config(&self, file: Option<&Path>) -> anyhow::Result<ServerConfig> {
        let mut config = ServerConfig::load(file)?.apply_env()?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
        Ok(config)
    }

    /// Offline commands always work against the filesystem store.
    fn service(&self) -> anyhow::Result<StorageService> {
        let config = self.config(None)?;
        let store = FsBlobStore::open(&config.data_dir, config.bucket.as_str())
            .with_context(|| format!("cannot open store at {}", config.data_dir.display()))?;
        tracing::debug!(path = %store.base_dir().display(), "using filesystem store");
        Ok(StorageService::new(Arc::new(store)))
    }
}

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let globals = Globals {
        data_dir: cli.data_dir,
        bucket: cli.bucket,
        format: cli.format,
    };
    match cli.command {
        Command::Serve(args) => cmd_serve(&globals, args).await,
        Command::Store(args) => cmd_store(&globals, args).await,
        Command::List(args) => cmd_list(&globals, args).await,
        Command::Get(args) => cmd_get(&globals, args).await,
        Command::Summary(args) => cmd_summary(&globals, args).await,
        Command::Exists(args) => cmd_exists(&globals, args).await,
        Command::Verify(args) => cmd_verify(&globals, args).await,
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_serve(globals: &Globals, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = globals.config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    println!("PR artifact server on {} (backend: {:?})", config.bind_addr.to_string().bold(), config.backend);
    PraServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_store(globals: &Globals, args: StoreArgs) -> anyhow::Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => match args.file.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => bail!("cannot derive a file name from {}; pass --name", args.file.display()),
        },
    };
    let test_cases = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let service = globals.service()?;
    let key = service.store_code(&args.pr_id, &name, Some(&test_cases)).await?;

    if globals.json() {
        return print_json(&StoredCodeData {
            pr_id: args.pr_id,
            file_name: name,
            s3_key: key.into_string(),
        });
    }
    println!("{} Stored {} for {}", "✓".green().bold(), name.bold(), args.pr_id.yellow());
    println!("  Key: {}", key.as_str().cyan());
    Ok(())
}

async fn cmd_list(globals: &Globals, args: PrArgs) -> anyhow::Result<()> {
    let files = globals.service()?.list_code_files(&args.pr_id).await?;

    if globals.json() {
        return print_json(&CodeFilesData::new(args.pr_id, files));
    }
    println!("{} test-case file(s) for {}", files.len().to_string().bold(), args.pr_id.yellow());
    for file in &files {
        println!("  {} ({} bytes)", file.file_name.cyan(), file.test_cases.len());
    }
    Ok(())
}

async fn cmd_get(globals: &Globals, args: GetArgs) -> anyhow::Result<()> {
    let envelope = globals.service()?.get_code(&args.key).await?;

    if globals.json() {
        return print_json(&envelope);
    }
    println!("{} {}", "File:".bold(), envelope.file_name.cyan());
    println!("{}", envelope.test_cases);
    Ok(())
}

async fn cmd_summary(globals: &Globals, args: SummaryArgs) -> anyhow::Result<()> {
    let service = globals.service()?;
    match args.action {
        SummaryAction::Put { pr_id, github_url, data } => {
            let data: JsonObject =
                serde_json::from_str(&data).context("--data must be a JSON object")?;
            let key = service.store_summary(&pr_id, &github_url, Some(&data)).await?;
            if globals.json() {
                return print_json(&StoredSummaryData {
                    pr_id,
                    s3_key: key.into_string(),
                });
            }
            println!("{} Stored summary for {}", "✓".green().bold(), pr_id.yellow());
            println!("  Key: {}", key.as_str().cyan());
        }
        SummaryAction::Get { pr_id } => {
            let summary = service.get_summary(&pr_id).await?;
            if globals.json() {
                return print_json(&SummaryData {
                    pr_id,
                    summary_data: summary,
                });
            }
            println!("Summary for {}", pr_id.yellow().bold());
            println!("  GitHub: {}", summary.github_url.blue());
            println!("{}", serde_json::to_string_pretty(&summary.data)?);
        }
    }
    Ok(())
}

async fn cmd_exists(globals: &Globals, args: PrArgs) -> anyhow::Result<()> {
    let exists = globals.service()?.namespace_exists(&args.pr_id).await?;

    if globals.json() {
        return print_json(&serde_json::json!({ "prId": args.pr_id, "exists": exists }));
    }
    if exists {
        println!("{} {} has stored artifacts", "✓".green().bold(), args.pr_id.yellow());
    } else {
        println!("{} nothing stored for {}", "✗".red().bold(), args.pr_id.yellow());
    }
    Ok(())
}

async fn cmd_verify(globals: &Globals, args: VerifyArgs) -> anyhow::Result<()> {
    let test_cases = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let expected = TestCaseEnvelope::new(args.name, test_cases);
    let matched = globals.service()?.verify_code(&args.key, &expected).await;

    if globals.json() {
        print_json(&serde_json::json!({ "key": args.key, "verified": matched }))?;
    } else if matched {
        println!("{} {} matches", "✓".green().bold(), args.key.cyan());
    } else {
        println!("{} {} does not match", "✗".red().bold(), args.key.cyan());
    }
    if !matched {
        bail!("verification failed for {}", args.key);
    }
    Ok(())
}
