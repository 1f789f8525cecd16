use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, trace, warn};

use crate::errors::{FlatlinkerError, Result};
use crate::storage::KeyValueStore;

/// 新建链接文件的权限
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// 数据目录不存在时的创建权限
#[cfg(unix)]
const DIR_MODE: u32 = 0o777;

/// The key cannot name an existing file: missing, or a name the filesystem rejects
/// outright (e.g. longer than its name limit).
fn is_absent(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InvalidFilename)
}

/// One file per key, directly inside `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Wrap an existing directory without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open `root` as the store, creating the directory when it is missing.
    ///
    /// A root that cannot be created, or exists but is not a directory, is a
    /// `ConfigFault`.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();

        match fs::metadata(root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(FlatlinkerError::config_fault(format!(
                    "{} exists but is not a directory",
                    root.display()
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} does not exist, creating...", root.display());
                let mut builder = fs::DirBuilder::new();
                builder.recursive(true);
                #[cfg(unix)]
                builder.mode(DIR_MODE);
                builder.create(root).await.map_err(|e| {
                    FlatlinkerError::config_fault(format!(
                        "Failed to create data folder {}: {}",
                        root.display(),
                        e
                    ))
                })?;
            }
            Err(e) => {
                return Err(FlatlinkerError::config_fault(format!(
                    "Failed to inspect data folder {}: {}",
                    root.display(),
                    e
                )));
            }
        }

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    async fn write_file(&self, key: &str, value: &str, exclusive: bool) -> Result<()> {
        let path = self.path_for(key);

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if exclusive {
            options.create_new(true);
        } else {
            options.create(true).truncate(true);
        }
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = match options.open(&path).await {
            Ok(file) => file,
            Err(e) if exclusive && e.kind() == ErrorKind::AlreadyExists => {
                return Err(FlatlinkerError::already_exists(format!(
                    "shorturl {} already exists",
                    key
                )));
            }
            Err(e) => {
                error!("Failed to open shorturl file {}: {}", path.display(), e);
                return Err(e.into());
            }
        };

        let written = async {
            file.write_all(value.trim().as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            error!("Failed to write shorturl file {}: {}", path.display(), e);
            if exclusive {
                // 独占创建失败时不留下空文件，否则该 key 会被永久占用
                if let Err(rm) = fs::remove_file(&path).await {
                    warn!("Failed to remove partial file {}: {}", path.display(), rm);
                }
            }
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        match fs::metadata(self.path_for(key)).await {
            Ok(_) => Ok(true),
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => {
                error!("Failed to stat shorturl {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<String> {
        trace!("Reading shorturl file: {}", key);
        match fs::read_to_string(self.path_for(key)).await {
            // 空文件（例如 put 截断后、写入前）不能作为跳转目标
            Ok(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            Ok(_) => Err(FlatlinkerError::not_found(format!(
                "shorturl {} is empty",
                key
            ))),
            Err(e) if is_absent(&e) => Err(FlatlinkerError::not_found(format!(
                "shorturl {} doesn't exist",
                key
            ))),
            Err(e) => {
                error!("Failed to read shorturl {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.write_file(key, value, false).await
    }

    async fn create(&self, key: &str, value: &str) -> Result<()> {
        self.write_file(key, value, true).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
