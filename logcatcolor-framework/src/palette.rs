use crossterm::style::{Color, ContentStyle, Stylize};
use logcatcolor_parser::Level;

// indexed by `Level as usize`
const LEVEL_COLORS: [Color; 6] = [
    Color::Grey,        // verbose
    Color::DarkBlue,    // debug
    Color::DarkGreen,   // info
    Color::DarkYellow,  // warning
    Color::DarkRed,     // error
    Color::DarkMagenta, // fatal
];

pub const TAG_FG_COLOR: Color = Color::Black;
pub const TAG_BG_COLOR: Color = Color::DarkCyan;

/// level-to-color map and tag style used by a renderer
///
/// A disabled palette emits the same text without escape sequences.
#[derive(Debug, Clone)]
pub struct Palette {
    enabled: bool,
    level_colors: [Color; 6],
    tag_style: ContentStyle,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            enabled: true,
            level_colors: LEVEL_COLORS,
            tag_style: ContentStyle::new().with(TAG_FG_COLOR).on(TAG_BG_COLOR),
        }
    }

    pub fn plain() -> Self {
        Self::new().with_enabled(false)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level_color(&self, level: Level) -> Color {
        self.level_colors[level as usize]
    }

    pub fn paint_level(&self, level: Level, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.with(self.level_color(level)).to_string()
    }

    pub fn paint_tag(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        self.tag_style.apply(text).to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
