use url::Url;

/// Where released plugin binaries are downloaded from.
#[derive(Debug, Clone)]
pub struct ReleaseLocation {
    repository: Url,
}

impl ReleaseLocation {
    pub fn new(repository: Url) -> Self {
        Self { repository }
    }

    /// Download URL of `filename` attached to the release tagged `v<version>`.
    ///
    /// Version and filename are inserted verbatim.
    pub fn download_url(&self, version: &str, filename: &str) -> String {
        format!(
            "{}/releases/download/v{}/{}",
            self.repository.as_str().trim_end_matches('/'),
            version,
            filename
        )
    }
}
