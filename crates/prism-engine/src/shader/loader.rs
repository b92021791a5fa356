use std::path::{Path, PathBuf};

/// Where the vertex/fragment pair of a program lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub dir: PathBuf,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn loader(&self) -> ShaderLoader {
        ShaderLoader::new(&self.dir)
    }
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("shaders"),
            vertex: "default.vert.wgsl".to_string(),
            fragment: "default.frag.wgsl".to_string(),
        }
    }
}

/// Reads shader source text relative to a root directory.
#[derive(Debug, Clone)]
pub struct ShaderLoader {
    root: PathBuf,
}

impl ShaderLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the contents of `name`, or an empty string if it cannot be read.
    pub fn load(&self, name: &str) -> String {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                log::debug!("loaded shader source {} ({} bytes)", path.display(), source.len());
                source
            }
            Err(e) => {
                log::error!("failed to load shader source {}: {e}", path.display());
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_shaders() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../shaders")
    }

    #[test]
    fn loads_existing_file() {
        let loader = ShaderLoader::new(workspace_shaders());
        let src = loader.load("default.vert.wgsl");
        assert!(src.contains("@vertex"));
    }

    #[test]
    fn missing_file_yields_empty_string() {
        let loader = ShaderLoader::new(workspace_shaders());
        assert_eq!(loader.load("does-not-exist.wgsl"), "");
    }

    #[test]
    fn missing_directory_yields_empty_string() {
        let loader = ShaderLoader::new("/nonexistent/prism/shaders");
        assert_eq!(loader.load("default.frag.wgsl"), "");
    }

    #[test]
    fn default_paths_name_the_default_pair() {
        let p = ShaderPaths::new("/tmp/x");
        assert_eq!(p.dir, PathBuf::from("/tmp/x"));
        assert_eq!(p.vertex, "default.vert.wgsl");
        assert_eq!(p.fragment, "default.frag.wgsl");
        assert_eq!(p.loader().root(), Path::new("/tmp/x"));
    }
}
