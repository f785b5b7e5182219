//! One-time initialization guard for the decorative page background.
//!
//! Each loader owns its own "already loaded" flag. Pages that should share a
//! background share the loader through an `Arc`; independent pages (or test
//! cases) get independent loaders.

use parking_lot::Mutex;
use tracing::debug;

pub const DEFAULT_SCENE_PROJECT: &str = "p4VdxnnHjOL82ic0CzsJ";
pub const DEFAULT_SCENE_SCRIPT: &str =
    "https://cdn.jsdelivr.net/gh/hiunicornstudio/unicornstudio.js@v1.4.34/dist/unicornStudio.umd.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundScene {
    pub project_id: String,
    pub script_url: String,
}

impl Default for BackgroundScene {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_SCENE_PROJECT.to_string(),
            script_url: DEFAULT_SCENE_SCRIPT.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct BackgroundLoader {
    scene: BackgroundScene,
    loaded: Mutex<bool>,
}

impl BackgroundLoader {
    pub fn new(scene: BackgroundScene) -> Self {
        Self {
            scene,
            loaded: Mutex::new(false),
        }
    }

    pub fn scene(&self) -> &BackgroundScene {
        &self.scene
    }

    pub fn is_loaded(&self) -> bool {
        *self.loaded.lock()
    }

    /// Runs `init` unless this loader already did. Returns `true` when this
    /// call performed the initialization. Concurrent callers block until the
    /// first one finishes, so `init` never runs twice.
    pub fn ensure_loaded<F>(&self, init: F) -> bool
    where
        F: FnOnce(&BackgroundScene),
    {
        let mut loaded = self.loaded.lock();
        if *loaded {
            debug!(project = %self.scene.project_id, "background already loaded");
            return false;
        }
        init(&self.scene);
        *loaded = true;
        true
    }
}

impl Default for BackgroundLoader {
    fn default() -> Self {
        Self::new(BackgroundScene::default())
    }
}
