//! Window configuration.

use crate::layout::LayoutKind;
use crate::style::Style;

/// Defaults applied by a [`MainWindow`](super::MainWindow) to the widgets it
/// creates, plus window-level switches.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title passed to the backend.
    pub title: Option<String>,
    /// Let widgets that opt into throttling skip their renderer while clean.
    pub throttle_render: bool,
    /// Copied into a private style for each new widget.
    pub widget_style: Style,
    /// Copied into a private style for each new container.
    pub container_style: Style,
    /// Layout instantiated for each new container.
    pub default_layout: LayoutKind,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: None,
            throttle_render: false,
            widget_style: Style::new(),
            container_style: Style::container(),
            default_layout: LayoutKind::Free,
        }
    }
}

impl WindowConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable render throttling (builder).
    pub fn with_throttle_render(mut self, throttle: bool) -> Self {
        self.throttle_render = throttle;
        self
    }

    /// Set the default widget style (builder).
    pub fn with_widget_style(mut self, style: Style) -> Self {
        self.widget_style = style;
        self
    }

    /// Set the default container style (builder).
    pub fn with_container_style(mut self, style: Style) -> Self {
        self.container_style = style;
        self
    }

    /// Set the default container layout (builder).
    pub fn with_default_layout(mut self, layout: LayoutKind) -> Self {
        self.default_layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;

    #[test]
    fn defaults() {
        let c = WindowConfig::default();
        assert!(c.title.is_none());
        assert!(!c.throttle_render);
        assert_eq!(c.widget_style.margin, Spacing::all(5));
        assert_eq!(c.default_layout, LayoutKind::Free);
    }

    #[test]
    fn builder_chain() {
        let c = WindowConfig::new()
            .with_title("demo")
            .with_throttle_render(true)
            .with_default_layout(LayoutKind::Vertical)
            .with_widget_style(Style::new().with_margin(Spacing::ZERO));
        assert_eq!(c.title.as_deref(), Some("demo"));
        assert!(c.throttle_render);
        assert_eq!(c.default_layout, LayoutKind::Vertical);
        assert_eq!(c.widget_style.margin, Spacing::ZERO);
    }
}
