mod grid;
pub(crate) mod month;
mod widget;
pub(crate) use self::month::{adjacent_month, Direction};
pub(crate) use self::widget::{ArrowState, MonthView, MONTH_HEIGHT};

#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect()
        })
        .collect()
}
