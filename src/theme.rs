use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Styles used when drawing a single calendar list cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Theme {
    pub(crate) base: Style,
    pub(crate) month_title: Style,
    pub(crate) weekday: Style,
    pub(crate) arrow: Style,
    pub(crate) disabled_arrow: Style,
    pub(crate) today: Style,
    pub(crate) extra_day: Style,
    pub(crate) disabled_day: Style,
    pub(crate) selected_day: Style,
    pub(crate) dot: Style,
    pub(crate) placeholder: Style,
}

impl Theme {
    pub(crate) const DEFAULT: Theme = Theme {
        base: BASE_STYLE,
        month_title: BASE_STYLE.add_modifier(Modifier::BOLD),
        weekday: BASE_STYLE.add_modifier(Modifier::BOLD),
        arrow: BASE_STYLE.fg(Color::LightCyan),
        disabled_arrow: BASE_STYLE.fg(Color::DarkGray),
        today: Style::new().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        extra_day: BASE_STYLE.fg(Color::DarkGray),
        disabled_day: Style::new()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        selected_day: Style::new().add_modifier(Modifier::REVERSED),
        dot: Style::new().fg(Color::LightBlue),
        placeholder: BASE_STYLE.fg(Color::Gray).add_modifier(Modifier::ITALIC),
    };
}

