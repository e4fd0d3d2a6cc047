//! Card data and images from a local directory
//!
//! A directory of card scans stands in for the remote card service. Each
//! image file is one printing: `Lightning Bolt.png` or `Lightning Bolt [M10].jpg`.
//! An optional `cards.json` next to the images lists full card records
//! instead, with image paths relative to the directory.

use std::path::Path;

use anyhow::{Context, Result};
use proxy_deck::{Card, ImageUris};
use proxy_runtime::{CardProvider, ImageLoader, RuntimeError};

const CARDS_FILE: &str = "cards.json";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Card provider backed by a directory of images
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    cards: Vec<Card>,
}

impl DirectoryProvider {
    /// Read `cards.json` if present, otherwise index the image files
    pub async fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let manifest = dir.join(CARDS_FILE);

        let mut cards = if tokio::fs::try_exists(&manifest).await? {
            load_manifest(dir, &manifest).await?
        } else {
            scan_images(dir).await?
        };
        cards.sort_by(|a, b| a.name.cmp(&b.name).then(a.set.cmp(&b.set)));

        log::debug!("Indexed {} printings in {}", cards.len(), dir.display());
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl CardProvider for DirectoryProvider {
    async fn search(&self, term: &str) -> proxy_runtime::Result<Vec<Card>> {
        let term = term.to_lowercase();
        Ok(self
            .cards
            .iter()
            .filter(|card| card.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn fetch_named(
        &self,
        name: &str,
        set: Option<&str>,
    ) -> proxy_runtime::Result<Option<Card>> {
        Ok(self
            .cards
            .iter()
            .find(|card| {
                card.name.eq_ignore_ascii_case(name)
                    && set.is_none_or(|set| {
                        card.set
                            .as_deref()
                            .is_some_and(|own| own.eq_ignore_ascii_case(set))
                    })
            })
            .cloned())
    }

    async fn printings(&self, name: &str) -> proxy_runtime::Result<Vec<Card>> {
        Ok(self
            .cards
            .iter()
            .filter(|card| card.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

/// Reads image sources as file paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    async fn load(&self, source: &str) -> proxy_runtime::Result<Vec<u8>> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        tokio::fs::read(path)
            .await
            .map_err(|e| RuntimeError::Load(format!("{}: {}", path, e)))
    }
}

async fn load_manifest(dir: &Path, manifest: &Path) -> Result<Vec<Card>> {
    let bytes = tokio::fs::read(manifest)
        .await
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let mut cards: Vec<Card> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;

    for card in &mut cards {
        if let Some(uris) = &mut card.image_uris {
            for url in [&mut uris.normal, &mut uris.png].into_iter().flatten() {
                *url = resolve_relative(dir, url);
            }
        }
        for face in card.card_faces.iter_mut().flatten() {
            if let Some(normal) = face.image_uris.as_mut().and_then(|u| u.normal.as_mut()) {
                *normal = resolve_relative(dir, normal);
            }
        }
    }

    Ok(cards)
}

fn resolve_relative(dir: &Path, source: &str) -> String {
    if source.contains("://") || Path::new(source).is_absolute() {
        source.to_string()
    } else {
        dir.join(source).to_string_lossy().into_owned()
    }
}

async fn scan_images(dir: &Path) -> Result<Vec<Card>> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read image directory {}", dir.display()))?;

    let mut cards = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        if !is_image(&path) {
            continue;
        }
        if let Some(card) = card_from_path(&path) {
            cards.push(card);
        }
    }
    Ok(cards)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Build a card record from a `Name [SET].ext` file name
fn card_from_path(path: &Path) -> Option<Card> {
    let stem = path.file_stem()?.to_str()?;
    let (name, set) = split_stem(stem)?;

    let id = match &set {
        Some(set) => format!("{}-{}", slug(&name), set.to_lowercase()),
        None => slug(&name),
    };
    let source = path.to_string_lossy().into_owned();

    Some(Card {
        id,
        name,
        set,
        image_uris: Some(ImageUris {
            normal: Some(source),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn split_stem(stem: &str) -> Option<(String, Option<String>)> {
    let (name, set) = match stem.find('[') {
        Some(open) => {
            let rest = &stem[open + 1..];
            let set = rest
                .find(']')
                .map(|close| rest[..close].trim())
                .filter(|set| !set.is_empty())
                .map(str::to_string);
            (&stem[..open], set)
        }
        None => (stem, None),
    };

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((name.to_string(), set))
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_stem() {
        assert_eq!(
            split_stem("Lightning Bolt [M10]"),
            Some(("Lightning Bolt".to_string(), Some("M10".to_string())))
        );
        assert_eq!(split_stem("Opt"), Some(("Opt".to_string(), None)));
        assert_eq!(split_stem("Opt []"), Some(("Opt".to_string(), None)));
        assert_eq!(split_stem(" [M10]"), None);
    }

    #[test]
    fn test_card_from_path() {
        let card = card_from_path(Path::new("/cards/Lightning Bolt [M10].png")).unwrap();
        assert_eq!(card.id, "lightning-bolt-m10");
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.set.as_deref(), Some("M10"));
        assert_eq!(
            card.preferred_image_url(),
            Some("/cards/Lightning Bolt [M10].png")
        );
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.PNG")));
        assert!(is_image(Path::new("a.jpeg")));
        assert!(!is_image(Path::new("cards.json")));
        assert!(!is_image(Path::new("README")));
    }

    #[tokio::test]
    async fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Opt [XLN].png", "Opt [M19].jpg", "Lightning Bolt.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let provider = DirectoryProvider::scan(dir.path()).await.unwrap();
        assert_eq!(provider.cards().len(), 3);

        let opt = provider.fetch_named("opt", Some("xln")).await.unwrap().unwrap();
        assert_eq!(opt.id, "opt-xln");
        assert!(provider.fetch_named("Opt", Some("DOM")).await.unwrap().is_none());
        assert_eq!(provider.printings("Opt").await.unwrap().len(), 2);
        assert_eq!(provider.search("bolt").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_manifest_paths_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CARDS_FILE),
            r#"[{"id": "opt-xln", "name": "Opt", "type_line": "Instant",
                "image_uris": {"normal": "opt.png"}}]"#,
        )
        .unwrap();

        let provider = DirectoryProvider::scan(dir.path()).await.unwrap();
        let card = &provider.cards()[0];
        assert_eq!(card.type_line.as_deref(), Some("Instant"));
        let expected = dir.path().join("opt.png").to_string_lossy().into_owned();
        assert_eq!(card.preferred_image_url(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_file_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, b"bytes").unwrap();

        let loaded = FileImageLoader
            .load(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(loaded, b"bytes");

        let missing = FileImageLoader.load("/definitely/not/here.png").await;
        assert!(matches!(missing, Err(RuntimeError::Load(_))));
    }
}
