//! Content-based hashing for preparation IDs.

use ac_case::CaseConfig;
use sha2::{Digest, Sha256};
use std::path::Path;

pub fn compute_prep_id(case: &CaseConfig, analysis_dir: &Path, tool_version: &str) -> String {
    let mut hasher = Sha256::new();

    let case_json = serde_json::to_string(case).unwrap_or_default();
    hasher.update(case_json.as_bytes());

    hasher.update(analysis_dir.to_string_lossy().as_bytes());

    hasher.update(tool_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let case = CaseConfig::new("cone");
        let dir = Path::new("run");

        let hash1 = compute_prep_id(&case, dir, "v1");
        let hash2 = compute_prep_id(&case, dir, "v1");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let case1 = CaseConfig::new("cone");
        let mut case2 = CaseConfig::new("cone");
        case2.boundary_layer.max_layers = 41;
        let dir = Path::new("run");

        assert_ne!(
            compute_prep_id(&case1, dir, "v1"),
            compute_prep_id(&case2, dir, "v1")
        );
        assert_ne!(
            compute_prep_id(&case1, dir, "v1"),
            compute_prep_id(&case1, Path::new("run2"), "v1")
        );
        assert_ne!(
            compute_prep_id(&case1, dir, "v1"),
            compute_prep_id(&case1, dir, "v2")
        );
    }
}
