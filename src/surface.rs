use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Somewhere to display rendered widgets.
///
/// Each region corresponds to one container element of the broadcast page.
/// Showing a widget in a region replaces whatever was displayed there before.
#[async_trait]
pub trait Surface: Send + Sync {
    async fn show(&self, region: &str, html: &str) -> io::Result<()>;
}

/// Writes every region to `<dir>/<region>.html`.
pub struct FragmentDir {
    dir: PathBuf,
}

impl FragmentDir {
    /// Creates the directory if it does not exist.
    pub async fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(FragmentDir { dir })
    }

    pub fn path_of(&self, region: &str) -> PathBuf {
        self.dir.join(format!("{}.html", region))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Surface for FragmentDir {
    async fn show(&self, region: &str, html: &str) -> io::Result<()> {
        // Write to a temporary file first, so that the page never
        // includes a half-written fragment.
        let path = self.path_of(region);
        let tmp_path = self.dir.join(format!(".{}.html.tmp", region));
        tokio::fs::write(&tmp_path, html).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}
