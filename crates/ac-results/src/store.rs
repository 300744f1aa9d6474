//! Preparation storage API.

use crate::types::PrepManifest;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct PrepStore {
    root_dir: PathBuf,
}

impl PrepStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to the case file: `<case dir>/.aerocase/preps`.
    pub fn for_case(case_path: &Path) -> ResultsResult<Self> {
        let case_dir = case_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "case path has no parent directory".to_string(),
            })?;
        let preps_dir = case_dir.join(".aerocase").join("preps");
        Self::new(preps_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn prep_dir(&self, prep_id: &str) -> PathBuf {
        self.root_dir.join(prep_id)
    }

    pub fn has_prep(&self, prep_id: &str) -> bool {
        self.prep_dir(prep_id).join("manifest.json").exists()
    }

    pub fn save_manifest(&self, manifest: &PrepManifest) -> ResultsResult<()> {
        let prep_dir = self.prep_dir(&manifest.prep_id);
        fs::create_dir_all(&prep_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(prep_dir.join("manifest.json"), manifest_json)?;
        Ok(())
    }

    pub fn load_manifest(&self, prep_id: &str) -> ResultsResult<PrepManifest> {
        let manifest_path = self.prep_dir(prep_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::PrepNotFound {
                prep_id: prep_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Manifests for one case, oldest first.
    pub fn list_preps(&self, case_name: &str) -> ResultsResult<Vec<PrepManifest>> {
        let mut preps = Vec::new();

        if !self.root_dir.exists() {
            return Ok(preps);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let prep_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&prep_id)
                    && manifest.case_name == case_name
                {
                    preps.push(manifest);
                }
            }
        }

        preps.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.prep_id.cmp(&b.prep_id))
        });
        Ok(preps)
    }

    pub fn delete_prep(&self, prep_id: &str) -> ResultsResult<()> {
        let prep_dir = self.prep_dir(prep_id);
        if prep_dir.exists() {
            fs::remove_dir_all(prep_dir)?;
        }
        Ok(())
    }
}
