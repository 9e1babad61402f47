//! Texture cache populated from the asset manifest.
//!
//! Loading never aborts the game: an unreadable manifest or image is logged
//! and the affected keys fall back to their placeholder fill.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use macroquad::texture::Texture2D;
use might_and_magic_core::RoomKind;
use might_and_magic_rendering::AssetKey;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Failures raised while reading the asset manifest or its images.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A file could not be read from disk.
    #[error("failed to read {path}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The manifest is not valid TOML for the expected layout.
    #[error("failed to parse asset manifest")]
    Parse(#[from] toml::de::Error),
    /// The manifest declares a version this build does not understand.
    #[error("unsupported asset manifest version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version declared by the manifest.
        found: u32,
        /// Version understood by this build.
        expected: u32,
    },
    /// A file was read but does not hold a decodable image.
    #[error("failed to decode {path}")]
    Decode {
        /// File that failed to decode.
        path: PathBuf,
        /// Underlying decoder failure.
        #[source]
        source: image::ImageError,
    },
    /// An image exceeds the dimensions a texture can hold.
    #[error("{path} is {width}x{height}; textures are limited to {max} pixels per side")]
    Oversized {
        /// Offending file.
        path: PathBuf,
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
        /// Largest supported side.
        max: u16,
    },
    /// A manifest entry names an asset that does not exist.
    #[error("unknown asset `{name}` in [{section}]")]
    UnknownKey {
        /// Manifest table holding the entry.
        section: &'static str,
        /// Offending entry name.
        name: String,
    },
    /// A room kind lists more images than rooms can select.
    #[error("room kind `{kind}` lists {found} images but only {max} are used")]
    TooManyVariants {
        /// Room kind identifier.
        kind: &'static str,
        /// Number of images listed.
        found: usize,
        /// Number of variants rooms of the kind draw from.
        max: u8,
    },
}

/// Cache of textures keyed by [`AssetKey`].
#[derive(Debug, Default)]
pub struct AssetAtlas {
    textures: HashMap<AssetKey, Texture2D>,
}

impl AssetAtlas {
    /// Loads every asset named by the manifest at `path`.
    ///
    /// Images that fail to load are skipped with a warning; only manifest
    /// level failures are returned.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Loads the manifest at `path`, logging any failure and returning an
    /// empty atlas so every key draws as a placeholder.
    #[must_use]
    pub fn load_or_placeholders(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_manifest_path(path) {
            Ok(atlas) => {
                tracing::info!(
                    manifest = %path.display(),
                    textures = atlas.texture_count(),
                    "asset manifest loaded"
                );
                atlas
            }
            Err(error) => {
                tracing::warn!(
                    manifest = %path.display(),
                    error = %error,
                    "asset manifest unavailable; drawing placeholders"
                );
                Self::default()
            }
        }
    }

    /// Returns whether the atlas holds a texture for `key`.
    #[must_use]
    pub fn contains(&self, key: AssetKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Number of textures held by the atlas.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture associated with `key`, if it loaded.
    #[must_use]
    pub fn texture(&self, key: AssetKey) -> Option<Texture2D> {
        self.textures.get(&key).copied()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(AssetKey, &Path) -> Result<Texture2D, AssetError>,
    ) -> Result<Self, AssetError> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).map_err(|source| AssetError::Read {
            path: manifest_path.to_path_buf(),
            source,
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Ok(Self::from_entries(entries, &mut loader))
    }

    fn from_entries(
        entries: Vec<(AssetKey, PathBuf)>,
        loader: &mut impl FnMut(AssetKey, &Path) -> Result<Texture2D, AssetError>,
    ) -> Self {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            match loader(key, &path) {
                Ok(texture) => {
                    let _ = textures.insert(key, texture);
                }
                Err(error) => tracing::warn!(
                    asset = ?key,
                    path = %path.display(),
                    error = %error,
                    "asset failed to load; drawing placeholder"
                ),
            }
        }
        Self { textures }
    }
}

fn default_loader(_key: AssetKey, path: &Path) -> Result<Texture2D, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let (Ok(texture_width), Ok(texture_height)) = (u16::try_from(width), u16::try_from(height))
    else {
        return Err(AssetError::Oversized {
            path: path.to_path_buf(),
            width,
            height,
            max: u16::MAX,
        });
    };
    Ok(Texture2D::from_rgba8(
        texture_width,
        texture_height,
        rgba.as_raw(),
    ))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    backgrounds: BTreeMap<String, String>,
    #[serde(default)]
    ui: BTreeMap<String, String>,
    #[serde(default)]
    rooms: BTreeMap<String, Vec<String>>,
}

/// Resolves manifest entries to paths relative to `base_path`, ordered by key.
fn parse_manifest(
    contents: &str,
    base_path: &Path,
) -> Result<Vec<(AssetKey, PathBuf)>, AssetError> {
    let manifest: Manifest = toml::from_str(contents)?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        return Err(AssetError::UnsupportedVersion {
            found: manifest.version,
            expected: SUPPORTED_MANIFEST_VERSION,
        });
    }

    let mut resolved = BTreeMap::new();
    for (name, relative_path) in manifest.backgrounds {
        let key = background_key(&name).ok_or(AssetError::UnknownKey {
            section: "backgrounds",
            name,
        })?;
        let _ = resolved.insert(key, base_path.join(relative_path));
    }

    for (name, relative_path) in manifest.ui {
        let key = ui_key(&name).ok_or(AssetError::UnknownKey { section: "ui", name })?;
        let _ = resolved.insert(key, base_path.join(relative_path));
    }

    for (name, images) in manifest.rooms {
        let Some(kind) = RoomKind::ALL.into_iter().find(|kind| kind.name() == name) else {
            return Err(AssetError::UnknownKey {
                section: "rooms",
                name,
            });
        };
        let max = kind.image_variants();
        if images.len() > usize::from(max) {
            return Err(AssetError::TooManyVariants {
                kind: kind.name(),
                found: images.len(),
                max,
            });
        }
        if images.len() < usize::from(max) {
            tracing::warn!(
                kind = kind.name(),
                listed = images.len(),
                expected = max,
                "room kind lists fewer images than variants; missing ones draw as placeholders"
            );
        }
        for (variant, relative_path) in (0_u8..).zip(images) {
            let key = AssetKey::Room { kind, variant };
            let _ = resolved.insert(key, base_path.join(relative_path));
        }
    }

    Ok(resolved.into_iter().collect())
}

fn background_key(name: &str) -> Option<AssetKey> {
    match name {
        "title" => Some(AssetKey::Title),
        "main_menu" => Some(AssetKey::MainMenu),
        "character_select" => Some(AssetKey::CharacterSelect),
        "options" => Some(AssetKey::Options),
        _ => None,
    }
}

fn ui_key(name: &str) -> Option<AssetKey> {
    match name {
        "button_face" => Some(AssetKey::ButtonFace),
        "paper" => Some(AssetKey::Paper),
        _ => None,
    }
}
