// src/storage.rs

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::common::{error::AppError, validation::field_error};

pub const MAX_FILES_PER_UPLOAD: usize = 5;
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Um arquivo recebido, ainda não gravado.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Regras de upload de imagens de referência.
pub fn check_upload(files: &[IncomingFile]) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(field_error("images", "required"));
    }
    if files.len() > MAX_FILES_PER_UPLOAD {
        return Err(field_error("images", "too_many_files"));
    }
    if files.iter().any(|f| extension_for(&f.content_type).is_none()) {
        return Err(field_error("images", "invalid_file_type"));
    }
    if files.iter().any(|f| f.bytes.len() > MAX_FILE_SIZE) {
        return Err(field_error("images", "file_too_large"));
    }
    Ok(())
}

/// Onde os arquivos enviados vão parar. O domínio só guarda a URL devolvida.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, file: &IncomingFile) -> Result<String, AppError>;
}

/// Grava em disco, servido em `/uploads`.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Só formatos raster. SVG fica de fora: `/uploads` é servido na mesma origem
/// da API e um SVG pode carregar script.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, file: &IncomingFile) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("não foi possível criar {}", self.root.display()))?;

        // Nome e extensão gerados aqui: o nome original nunca chega ao disco
        let extension = extension_for(&file.content_type)
            .ok_or_else(|| field_error("images", "invalid_file_type"))?;
        let name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.root.join(&name);

        tokio::fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("falha ao gravar {}", path.display()))?;

        tracing::info!(
            "🖼️ Arquivo salvo: {} ({} bytes, original {:?})",
            name,
            file.bytes.len(),
            file.file_name
        );
        Ok(format!("/uploads/{}", name))
    }
}
