use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use nordata_config::{Credentials, NordataConfig};
use nordata_store::LocalObjectStore;
use nordata_transfer::{Bucket, PathSpec, TransferPair};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.root)?;
    match cli.command {
        Command::Creds => cmd_creds(),
        Command::Ls(args) => cmd_ls(&open_bucket(&config, cli.bucket.as_deref())?, args),
        Command::Download(args) => {
            cmd_download(&open_bucket(&config, cli.bucket.as_deref())?, args)
        }
        Command::Upload(args) => cmd_upload(&open_bucket(&config, cli.bucket.as_deref())?, args),
        Command::Delete(args) => cmd_delete(&open_bucket(&config, cli.bucket.as_deref())?, args),
    }
}

fn load_config(path: Option<&Path>, root: Option<PathBuf>) -> anyhow::Result<NordataConfig> {
    let mut config = match path {
        Some(path) => NordataConfig::load(path)?,
        None => NordataConfig::default(),
    };
    config.apply_env();
    if let Some(root) = root {
        config.store.root = Some(root);
    }
    debug!(profile = %config.profile.profile_name, root = ?config.store.root, "resolved config");
    Ok(config)
}

fn open_bucket(config: &NordataConfig, bucket: Option<&str>) -> anyhow::Result<Bucket> {
    let Some(name) = bucket else {
        bail!("no bucket given, pass --bucket NAME");
    };
    let Some(dir) = config.store.bucket_path(name) else {
        bail!("no store root configured, pass --root DIR or set NORDATA_STORE_ROOT");
    };
    debug!(bucket = name, dir = %dir.display(), "opening bucket");
    let store = LocalObjectStore::open(&dir)
        .with_context(|| format!("cannot open bucket {name}"))?;
    Ok(Bucket::open(Arc::new(store), config.transfer)?)
}

/// One argument is a single path; several are a list.
fn to_spec(mut paths: Vec<String>) -> PathSpec {
    if paths.len() == 1 {
        PathSpec::Single(paths.remove(0))
    } else {
        PathSpec::Many(paths)
    }
}

fn print_pairs(verb: &str, pairs: &[TransferPair]) {
    for pair in pairs {
        println!("  {} {} → {}", verb.green(), pair.source, pair.destination.bold());
    }
}

fn cmd_ls(bucket: &Bucket, args: LsArgs) -> anyhow::Result<()> {
    let keys = bucket.glob(&args.pattern)?;
    if keys.is_empty() {
        println!("No keys match {}.", args.pattern.yellow());
    }
    for key in keys {
        println!("{key}");
    }
    Ok(())
}

fn cmd_download(bucket: &Bucket, args: TransferArgs) -> anyhow::Result<()> {
    let pairs = bucket.download(&to_spec(args.sources), &to_spec(args.destinations))?;
    print_pairs("downloaded", &pairs);
    println!("{} {} object(s) from {}", "✓".green().bold(), pairs.len(), bucket.name().bold());
    Ok(())
}

fn cmd_upload(bucket: &Bucket, args: TransferArgs) -> anyhow::Result<()> {
    let pairs = bucket.upload(&to_spec(args.sources), &to_spec(args.destinations))?;
    print_pairs("uploaded", &pairs);
    println!("{} {} file(s) to {}", "✓".green().bold(), pairs.len(), bucket.name().bold());
    Ok(())
}

fn cmd_delete(bucket: &Bucket, args: DeleteArgs) -> anyhow::Result<()> {
    let deleted = bucket.delete(&to_spec(args.keys))?;
    for key in &deleted {
        println!("  {} {}", "deleted".red(), key);
    }
    println!("{} {} key(s) removed from {}", "✓".green().bold(), deleted.len(), bucket.name().bold());
    Ok(())
}

fn cmd_creds() -> anyhow::Result<()> {
    let creds = Credentials::from_env()?;
    println!("{}", creds.copy_credentials());
    Ok(())
}
