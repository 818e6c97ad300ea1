use crate::config::SceneConfig;

/// Pointer cursor shown over the embedded scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Grab,
    Grabbing,
}

/// The embedded third-party 3D scene.
///
/// The scene is opaque; the only thing crossing the boundary is its "ready" signal. A scene
/// that never reports ready stays in the loading state.
#[derive(Clone, Debug)]
pub struct EmbeddedScene {
    url: String,
    title: String,
    loaded: bool,
    cursor: Cursor,
}

impl EmbeddedScene {
    pub fn new(cfg: &SceneConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            title: cfg.title.clone(),
            loaded: false,
            cursor: Cursor::Grab,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The scene reported that it finished loading.
    pub fn on_ready(&mut self) {
        if !self.loaded {
            tracing::debug!(url = %self.url, "embedded scene ready");
        }
        self.loaded = true;
    }

    pub fn pointer_down(&mut self) {
        self.cursor = Cursor::Grabbing;
    }

    pub fn pointer_up(&mut self) {
        self.cursor = Cursor::Grab;
    }

    pub fn pointer_leave(&mut self) {
        self.cursor = Cursor::Grab;
    }
}
