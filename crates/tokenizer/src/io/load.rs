//! Model identifier resolution and loading.
//!
//! An identifier is a `tokenizer.json` file, a directory containing one, or,
//! with the `hub` feature, a HuggingFace hub repository id such as
//! `bert-base-uncased`.

use super::format::{
    SpecialTokensMap, SPECIAL_TOKENS_MAP_FILE, TOKENIZER_CONFIG_FILE, TOKENIZER_FILE,
};
use crate::model::HfModel;
use autotok_core::{ModelProvider, Result, SpecialTokens, TokenizerError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files making up one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    /// Serialized tokenizer pipeline
    pub tokenizer: PathBuf,
    /// `tokenizer_config.json`, if the model has one
    pub tokenizer_config: Option<PathBuf>,
    /// `special_tokens_map.json`, if the model has one
    pub special_tokens_map: Option<PathBuf>,
}

impl ModelFiles {
    /// Collect the files of a local model directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let tokenizer = dir.join(TOKENIZER_FILE);
        if !tokenizer.is_file() {
            return Err(TokenizerError::Load(format!(
                "No {} in {}",
                TOKENIZER_FILE,
                dir.display()
            )));
        }

        let existing = |name: &str| Some(dir.join(name)).filter(|path| path.is_file());
        Ok(Self {
            tokenizer,
            tokenizer_config: existing(TOKENIZER_CONFIG_FILE),
            special_tokens_map: existing(SPECIAL_TOKENS_MAP_FILE),
        })
    }

    /// Use `file` as the tokenizer, with metadata from its directory.
    pub fn from_tokenizer_file(file: &Path) -> Self {
        let dir = file.parent().unwrap_or_else(|| Path::new("."));
        let existing = |name: &str| Some(dir.join(name)).filter(|path| path.is_file());
        Self {
            tokenizer: file.to_path_buf(),
            tokenizer_config: existing(TOKENIZER_CONFIG_FILE),
            special_tokens_map: existing(SPECIAL_TOKENS_MAP_FILE),
        }
    }

    /// Read role tokens and additional special tokens from the metadata
    /// files; the special tokens map wins over the configuration.
    pub fn special_tokens(&self) -> Result<(SpecialTokens, Vec<String>)> {
        let mut special = SpecialTokens::default();
        let mut additional = Vec::new();

        for path in [&self.tokenizer_config, &self.special_tokens_map]
            .into_iter()
            .flatten()
        {
            let map = read_special_tokens_map(path)?;
            map.apply_to(&mut special);
            for token in map.additional() {
                if !additional.iter().any(|t: &String| t == token) {
                    additional.push(token.to_string());
                }
            }
        }

        Ok((special, additional))
    }
}

fn read_special_tokens_map(path: &Path) -> Result<SpecialTokensMap> {
    let file = File::open(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        TokenizerError::Load(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Loads [`HfModel`]s from local paths or the HuggingFace hub.
#[derive(Debug, Clone, Default)]
pub struct HfProvider {
    /// Hub revision (branch, tag or commit); `main` when unset
    revision: Option<String>,
}

impl HfProvider {
    /// Create a provider that downloads the default revision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Download `revision` instead of the default branch.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Map an identifier to the files of the model it names.
    pub fn resolve(&self, identifier: &str) -> Result<ModelFiles> {
        let path = Path::new(identifier);
        if path.is_file() {
            debug!(identifier, "resolved tokenizer file");
            return Ok(ModelFiles::from_tokenizer_file(path));
        }
        if path.is_dir() {
            debug!(identifier, "resolved model directory");
            return ModelFiles::from_dir(path);
        }
        if looks_like_path(identifier) {
            return Err(TokenizerError::Load(format!(
                "No such file or directory: {}",
                identifier
            )));
        }
        self.download(identifier)
    }

    #[cfg(feature = "hub")]
    fn download(&self, identifier: &str) -> Result<ModelFiles> {
        use hf_hub::api::sync::Api;
        use hf_hub::{Repo, RepoType};

        let api = Api::new()
            .map_err(|e| TokenizerError::Load(format!("Failed to create hub client: {}", e)))?;
        let repo = match &self.revision {
            Some(revision) => Repo::with_revision(
                identifier.to_string(),
                RepoType::Model,
                revision.clone(),
            ),
            None => Repo::model(identifier.to_string()),
        };
        let repo = api.repo(repo);

        debug!(identifier, "downloading tokenizer from hub");
        let info = repo.info().map_err(|e| {
            TokenizerError::Load(format!("Failed to list files of {}: {}", identifier, e))
        })?;
        let listed: Vec<&str> = info
            .siblings
            .iter()
            .map(|sibling| sibling.rfilename.as_str())
            .collect();

        let tokenizer = repo.get(TOKENIZER_FILE).map_err(|e| {
            TokenizerError::Load(format!("Failed to fetch {}: {}", TOKENIZER_FILE, e))
        })?;

        Ok(ModelFiles {
            tokenizer,
            tokenizer_config: fetch_listed(&listed, TOKENIZER_CONFIG_FILE, || {
                repo.get(TOKENIZER_CONFIG_FILE)
            })?,
            special_tokens_map: fetch_listed(&listed, SPECIAL_TOKENS_MAP_FILE, || {
                repo.get(SPECIAL_TOKENS_MAP_FILE)
            })?,
        })
    }

    #[cfg(not(feature = "hub"))]
    fn download(&self, identifier: &str) -> Result<ModelFiles> {
        Err(TokenizerError::Load(format!(
            "{} is not a local model and hub support is disabled",
            identifier
        )))
    }

    fn load_model(&self, identifier: &str, vocab_file: Option<&Path>) -> Result<HfModel> {
        let files = self.resolve(identifier)?;
        let (special, additional) = files.special_tokens()?;
        let model = HfModel::from_file(&files.tokenizer)?.with_special_tokens(special, additional);

        match vocab_file {
            Some(path) => model.with_vocab_file(path),
            None => Ok(model),
        }
    }
}

impl ModelProvider for HfProvider {
    type Model = HfModel;

    fn load(&self, identifier: &str, vocab_file: Option<&Path>) -> Result<HfModel> {
        self.load_model(identifier, vocab_file)
            .map_err(|e| TokenizerError::model_load(identifier, e))
    }
}

/// Fetch an optional metadata file. Only a file missing from the repository
/// listing counts as absent; a failed download of a listed file is an error.
#[cfg_attr(not(feature = "hub"), allow(dead_code))]
fn fetch_listed<F, E>(listed: &[&str], name: &str, fetch: F) -> Result<Option<PathBuf>>
where
    F: FnOnce() -> std::result::Result<PathBuf, E>,
    E: std::fmt::Display,
{
    if !listed.contains(&name) {
        debug!(name, "metadata file not in repository");
        return Ok(None);
    }
    fetch()
        .map(Some)
        .map_err(|e| TokenizerError::Load(format!("Failed to fetch {}: {}", name, e)))
}

// Hub ids never start like a filesystem path.
fn looks_like_path(identifier: &str) -> bool {
    let path = Path::new(identifier);
    path.is_absolute()
        || identifier.starts_with('.')
        || identifier.starts_with('~')
        || identifier.ends_with(".json")
}
