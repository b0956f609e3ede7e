// Asset file lookup and loading

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Map,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Map => "maps",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Texture => &["png", "jpg", "jpeg"],
            AssetType::Map => &["txt", "map"],
        }
    }
}

/// Asset loader responsible for finding and reading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).is_file()
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !asset_type.extensions().contains(&extension.as_str()) {
            return Err(AssetError::LoadError(format!(
                "{} is not a supported {:?} file",
                name, asset_type
            )));
        }

        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Load a UTF-8 text asset
    pub fn load_text(&self, asset_type: AssetType, name: &str) -> Result<String, AssetError> {
        let bytes = self.load_bytes(asset_type, name)?;
        String::from_utf8(bytes)
            .map_err(|e| AssetError::LoadError(format!("{} is not valid UTF-8: {}", name, e)))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Texture.default_directory(), "textures");
        assert_eq!(AssetType::Map.default_directory(), "maps");
    }

    #[test]
    fn test_asset_type_extensions() {
        assert!(AssetType::Texture.extensions().contains(&"png"));
        assert!(AssetType::Map.extensions().contains(&"txt"));
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Map, "level.txt");

        assert_eq!(path, PathBuf::from("/game/assets/maps/level.txt"));
        assert_eq!(loader.base_path(), Path::new("/game/assets"));
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let loader = AssetLoader::new("assets");
        assert!(matches!(
            loader.load_bytes(AssetType::Map, "level.png"),
            Err(AssetError::LoadError(_))
        ));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("definitely/not/a/real/dir");
        assert!(!loader.exists(AssetType::Texture, "player.png"));
        assert!(matches!(
            loader.load_bytes(AssetType::Texture, "player.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
