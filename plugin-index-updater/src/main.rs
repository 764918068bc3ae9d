mod args;
mod checksum;
mod error;
mod index;
mod release;

use std::error::Error as _;
use clap::Parser as _;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use crate::args::UpdaterArgs;
use crate::error::UpdaterError;
use crate::index::PluginUpdate;
use crate::release::ReleaseLocation;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_env(
            "PLUGIN_INDEX_UPDATER_LOG",
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = UpdaterArgs::parse();

    if let Err(err) = run(args) {
        tracing::error!("Error: {}", err);

        let mut src = err.source();
        while let Some(err) = src {
            tracing::error!("-> Caused by: {}", err);
            src = err.source();
        }

        std::process::exit(1);
    }
}

fn run(args: UpdaterArgs) -> Result<(), UpdaterError> {
    tracing::trace!("args = {:#?}", args);

    let mut repo_index = index::load_index(&args.index)?;

    let release = ReleaseLocation::new(args.release_repository.clone());
    let update = PluginUpdate {
        plugin_name: args.plugin_name.clone(),
        version: args.version.clone(),
        platform: args.platform.clone(),
        download_url: release.download_url(&args.version, &args.filename),
        artifact: args.artifact_path(),
        updated: chrono::Utc::now(),
    };

    let report = repo_index.apply(&update)?;

    if report.plugins_matched == 0 {
        tracing::warn!("No plugin named '{}' in index", update.plugin_name);
    } else if report.binaries_matched == 0 {
        tracing::warn!(
            "Plugin '{}' has no binary for platform '{}'",
            update.plugin_name,
            update.platform
        );
    }

    if args.strict {
        report.ensure_matched(&update)?;
    }

    if args.dry_run {
        print!("{}", index::render_index(&repo_index)?);
        return Ok(());
    }

    index::store_index(&args.index, &repo_index)?;

    tracing::info!(
        "Updated {} to {} ({} plugin(s), {} binary(ies))",
        args.index.display(),
        update.version,
        report.plugins_matched,
        report.binaries_matched
    );

    Ok(())
}
