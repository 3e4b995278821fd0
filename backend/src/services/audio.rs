use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

/// Where uploaded voice notes end up. The filesystem implementation is
/// the only one today; the trait keeps handlers testable.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn save(&self, extension: &str, bytes: Vec<u8>) -> anyhow::Result<StoredAudio>;
}

#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub url: String,
    pub size: usize,
}

pub struct FsAudioStore {
    dir: PathBuf,
}

impl FsAudioStore {
    pub fn new(dir: PathBuf) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl AudioStore for FsAudioStore {
    async fn save(&self, extension: &str, bytes: Vec<u8>) -> anyhow::Result<StoredAudio> {
        let filename = format!("audio_{}.{}", Uuid::new_v4(), extension);
        let size = bytes.len();
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(StoredAudio {
            url: format!("/uploads/{}", filename),
            size,
        })
    }
}
