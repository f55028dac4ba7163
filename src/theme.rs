//! Themes and their assets
//!
//! A theme is picked from a closed set on the first screen. Loading it yields
//! a [`ThemeAssets`]: the play-field size, the actor's box and the palette
//! every sprite is painted with. Nothing is looked up by name after that.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::AssetError;
use crate::sim::Size;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend from `a` to `b`, `t_256` in 0..=256
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Castle,
    Forest,
    Twilight,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Castle, Theme::Forest, Theme::Twilight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Castle => "castle",
            Theme::Forest => "forest",
            Theme::Twilight => "twilight",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Castle => "Castle",
            Theme::Forest => "Forest",
            Theme::Twilight => "Twilight",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scaled to fill the play field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub size: Size,
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
    pub hills_far: Rgb,
    pub hills_near: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSprite {
    pub size: Size,
    pub body: Rgb,
    pub highlight: Rgb,
    pub wing: Rgb,
    pub beak: Rgb,
    pub eye: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSprite {
    pub edge: Rgb,
    pub body: Rgb,
    pub shine: Rgb,
    pub cap: Rgb,
}

/// On-disk description of a theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeManifest {
    pub background: Backdrop,
    pub actor: ActorSprite,
    pub obstacle: ObstacleSprite,
    /// Score and countdown digits
    pub text: Rgb,
}

/// Everything the round and the frontend need from a loaded theme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeAssets {
    pub theme: Theme,
    pub background: Backdrop,
    pub actor: ActorSprite,
    pub obstacle: ObstacleSprite,
    pub text: Rgb,
}

impl ThemeAssets {
    pub fn from_manifest(theme: Theme, manifest: ThemeManifest) -> Result<Self, AssetError> {
        let field = manifest.background.size;
        let actor = manifest.actor.size;
        if !field.is_positive() || !actor.is_positive() {
            return Err(AssetError::Invalid {
                theme,
                reason: "sprite sizes must be positive".into(),
            });
        }
        if actor.width >= field.width || actor.height >= field.height {
            return Err(AssetError::Invalid {
                theme,
                reason: format!(
                    "actor {}x{} does not fit the {}x{} field",
                    actor.width, actor.height, field.width, field.height
                ),
            });
        }
        Ok(Self {
            theme,
            background: manifest.background,
            actor: manifest.actor,
            obstacle: manifest.obstacle,
            text: manifest.text,
        })
    }

    /// Play-field size
    pub fn field(&self) -> Size {
        self.background.size
    }

    pub fn actor_size(&self) -> Size {
        self.actor.size
    }
}

/// Resolves a theme to its assets
pub trait AssetLoader {
    fn load(&self, theme: Theme) -> Result<ThemeAssets, AssetError>;
}

/// Palettes compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinThemes;

impl BuiltinThemes {
    pub fn manifest(theme: Theme) -> ThemeManifest {
        let field = Size::new(FIELD_WIDTH, FIELD_HEIGHT);
        let actor = Size::new(ACTOR_SIZE, ACTOR_SIZE);
        match theme {
            Theme::Castle => ThemeManifest {
                background: Backdrop {
                    size: field,
                    sky_top: Rgb(96, 110, 150),
                    sky_bottom: Rgb(200, 190, 200),
                    hills_far: Rgb(120, 118, 130),
                    hills_near: Rgb(92, 88, 100),
                },
                actor: ActorSprite {
                    size: actor,
                    body: Rgb(220, 60, 60),
                    highlight: Rgb(250, 110, 100),
                    wing: Rgb(170, 35, 40),
                    beak: Rgb(245, 200, 66),
                    eye: Rgb(255, 255, 255),
                },
                obstacle: ObstacleSprite {
                    edge: Rgb(70, 66, 72),
                    body: Rgb(120, 115, 120),
                    shine: Rgb(170, 165, 170),
                    cap: Rgb(55, 50, 58),
                },
                text: Rgb(255, 255, 255),
            },
            Theme::Forest => ThemeManifest {
                background: Backdrop {
                    size: field,
                    sky_top: Rgb(70, 180, 200),
                    sky_bottom: Rgb(190, 232, 245),
                    hills_far: Rgb(120, 195, 75),
                    hills_near: Rgb(95, 175, 55),
                },
                actor: ActorSprite {
                    size: actor,
                    body: Rgb(245, 200, 66),
                    highlight: Rgb(255, 225, 100),
                    wing: Rgb(215, 165, 35),
                    beak: Rgb(225, 75, 35),
                    eye: Rgb(255, 255, 255),
                },
                obstacle: ObstacleSprite {
                    edge: Rgb(74, 122, 26),
                    body: Rgb(100, 170, 40),
                    shine: Rgb(145, 215, 62),
                    cap: Rgb(60, 100, 20),
                },
                text: Rgb(255, 255, 255),
            },
            Theme::Twilight => ThemeManifest {
                background: Backdrop {
                    size: field,
                    sky_top: Rgb(20, 18, 60),
                    sky_bottom: Rgb(150, 80, 120),
                    hills_far: Rgb(45, 35, 80),
                    hills_near: Rgb(28, 22, 50),
                },
                actor: ActorSprite {
                    size: actor,
                    body: Rgb(200, 200, 230),
                    highlight: Rgb(240, 240, 255),
                    wing: Rgb(140, 130, 190),
                    beak: Rgb(240, 150, 60),
                    eye: Rgb(30, 30, 40),
                },
                obstacle: ObstacleSprite {
                    edge: Rgb(40, 40, 70),
                    body: Rgb(80, 70, 130),
                    shine: Rgb(130, 120, 190),
                    cap: Rgb(30, 25, 55),
                },
                text: Rgb(250, 230, 140),
            },
        }
    }
}

impl AssetLoader for BuiltinThemes {
    fn load(&self, theme: Theme) -> Result<ThemeAssets, AssetError> {
        ThemeAssets::from_manifest(theme, Self::manifest(theme))
    }
}

/// Reads `<dir>/<theme>.json`. A missing or malformed manifest is an error;
/// there is no fallback to the built-in palette.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    dir: PathBuf,
}

impl ManifestLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, theme: Theme) -> PathBuf {
        self.dir.join(format!("{}.json", theme.as_str()))
    }
}

impl AssetLoader for ManifestLoader {
    fn load(&self, theme: Theme) -> Result<ThemeAssets, AssetError> {
        let path = self.path_for(theme);
        let json = fs::read_to_string(&path).map_err(|source| AssetError::Read {
            path: path.clone(),
            source,
        })?;
        let manifest: ThemeManifest =
            serde_json::from_str(&json).map_err(|source| AssetError::Parse {
                path: path.clone(),
                source,
            })?;
        log::info!("Loaded theme {} from {}", theme, path.display());
        ThemeAssets::from_manifest(theme, manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flappy-chosen-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn builtin_themes_all_load() {
        for theme in Theme::ALL {
            let assets = BuiltinThemes.load(theme).unwrap();
            assert_eq!(assets.theme, theme);
            assert_eq!(assets.field(), Size::new(400.0, 600.0));
            assert_eq!(assets.actor_size(), Size::new(30.0, 30.0));
        }
    }

    #[test]
    fn theme_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Theme::Twilight).unwrap();
        assert_eq!(json, "\"twilight\"");
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Theme::Twilight);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb(0, 100, 200);
        let b = Rgb(200, 100, 0);
        assert_eq!(Rgb::lerp(a, b, 0), a);
        assert_eq!(Rgb::lerp(a, b, 256), b);
        assert_eq!(Rgb::lerp(a, b, 128), Rgb(100, 100, 100));
    }

    #[test]
    fn manifest_loader_reads_json() {
        let dir = temp_dir("ok");
        let manifest = BuiltinThemes::manifest(Theme::Castle);
        fs::write(
            dir.join("castle.json"),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();

        let assets = ManifestLoader::new(&dir).load(Theme::Castle).unwrap();
        assert_eq!(assets.background, manifest.background);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_manifest_is_a_read_error() {
        let dir = temp_dir("missing");
        let err = ManifestLoader::new(&dir).load(Theme::Forest).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn corrupt_manifest_is_a_parse_error() {
        let dir = temp_dir("corrupt");
        fs::write(dir.join("twilight.json"), "{ not json").unwrap();
        let err = ManifestLoader::new(&dir).load(Theme::Twilight).unwrap_err();
        assert!(matches!(err, AssetError::Parse { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn oversized_actor_is_rejected() {
        let mut manifest = BuiltinThemes::manifest(Theme::Forest);
        manifest.actor.size = Size::new(500.0, 30.0);
        let err = ThemeAssets::from_manifest(Theme::Forest, manifest).unwrap_err();
        assert!(matches!(err, AssetError::Invalid { .. }));
    }
}
