use log::debug;

/// Stylesheets shipped under `themes/<name>/styles.css`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Cjk,
    Colorful,
    Dark,
    Ocean,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Cjk,
        Theme::Colorful,
        Theme::Dark,
        Theme::Ocean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Cjk => "cjk",
            Theme::Colorful => "colorful",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == name)
    }

    /// Resolves a user-supplied name, falling back to [`Theme::Default`].
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                debug!("unknown theme {name:?}, using {}", Theme::Default.as_str());
                Theme::Default
            }),
            None => Theme::Default,
        }
    }

    pub fn stylesheet_href(&self) -> String {
        format!("themes/{}/styles.css", self.as_str())
    }
}
