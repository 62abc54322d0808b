//! Filesystem descriptor resources rooted at configured search directories.
//!
//! Each search root is opened once as a capability handle, so lookups cannot
//! escape the configured directories.

use crate::extension::config::DiscoveryConfig;
use crate::extension::ports::{
    DescriptorResource, DescriptorResourceProvider, ResourceError, ResourceResult,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

#[derive(Debug)]
struct SearchRoot {
    path: Utf8PathBuf,
    dir: Arc<Dir>,
}

/// Resource provider that searches a list of directories in order.
///
/// A root that cannot be searched is logged and skipped; the resources found
/// under the remaining roots are still returned.
#[derive(Debug)]
pub struct DirectoryResourceProvider {
    roots: Vec<SearchRoot>,
}

impl DirectoryResourceProvider {
    /// Opens every search root.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unreadable`] when a root cannot be opened as a
    /// directory.
    pub fn open<I, P>(roots: I) -> ResourceResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Utf8Path>,
    {
        let roots = roots
            .into_iter()
            .map(|root| {
                let path = root.as_ref().to_owned();
                Dir::open_ambient_dir(&path, ambient_authority())
                    .map(|dir| SearchRoot {
                        dir: Arc::new(dir),
                        path: path.clone(),
                    })
                    .map_err(|err| ResourceError::unreadable(path.as_str(), err))
            })
            .collect::<ResourceResult<Vec<_>>>()?;
        Ok(Self { roots })
    }

    /// Opens the search roots listed in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unreadable`] when a root cannot be opened.
    pub fn from_config(config: &DiscoveryConfig) -> ResourceResult<Self> {
        Self::open(&config.search_roots)
    }

    /// Returns the search roots in lookup order.
    #[must_use]
    pub fn roots(&self) -> impl Iterator<Item = &Utf8Path> {
        self.roots.iter().map(|root| root.path.as_path())
    }
}

impl DescriptorResourceProvider for DirectoryResourceProvider {
    fn locate(&self, path: &str) -> ResourceResult<Vec<Box<dyn DescriptorResource>>> {
        let mut located: Vec<Box<dyn DescriptorResource>> = Vec::new();
        for root in &self.roots {
            match root.dir.metadata(path) {
                Ok(metadata) if metadata.is_file() => located.push(Box::new(FileResource {
                    location: root.path.join(path).into_string(),
                    dir: Arc::clone(&root.dir),
                    path: Utf8PathBuf::from(path),
                })),
                Ok(_) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    let failure = ResourceError::locate(root.path.join(path).into_string(), err);
                    tracing::warn!(root = %root.path, error = %failure, "skipping search root");
                }
            }
        }
        Ok(located)
    }
}

struct FileResource {
    location: String,
    dir: Arc<Dir>,
    path: Utf8PathBuf,
}

impl DescriptorResource for FileResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn open(&self) -> ResourceResult<Box<dyn BufRead + '_>> {
        let file = self
            .dir
            .open(&self.path)
            .map_err(|err| ResourceError::unreadable(self.location.as_str(), err))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
