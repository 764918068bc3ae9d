use std::path::PathBuf;
use clap::Parser;
use url::Url;

/// Update the app-autoscaler plugin entry of a CF CLI plugin repository index.
#[derive(Debug, Clone, Parser)]
pub struct UpdaterArgs {
    /// The version number
    pub version: String,

    /// The platform (linux64, osx, win64)
    pub platform: String,

    /// The plugin file name
    pub filename: String,

    #[arg(long, default_value = "cli-plugin-repo/repo-index.yml")]
    pub index: PathBuf,

    /// Directory the plugin file is read from for checksumming.
    #[arg(long, default_value = "build")]
    pub build_dir: PathBuf,

    #[arg(long, default_value = "app-autoscaler-plugin")]
    pub plugin_name: String,

    /// Repository whose GitHub releases host the plugin binaries.
    #[arg(
        long,
        default_value = "https://github.com/cloudfoundry/app-autoscaler-cli-plugin"
    )]
    pub release_repository: Url,

    /// Fail instead of silently skipping when the plugin or platform is not in the index.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print the updated index to stdout instead of writing it back.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl UpdaterArgs {
    pub fn artifact_path(&self) -> PathBuf {
        self.build_dir.join(&self.filename)
    }
}
