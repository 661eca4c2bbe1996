use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::Series, quantity::Percent};

pub fn build_series_table(series: &Series) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Time", "SoC", "Remaining", "Watts out", "Watts in"]);
    for observation in series {
        let time = Cell::new(observation.time_label());
        table.add_row(vec![
            if observation.is_on_the_hour() { time } else { time.add_attribute(Attribute::Dim) },
            Cell::new(observation.state_of_charge).set_alignment(CellAlignment::Right).fg(
                if observation.state_of_charge < Percent(20.0) {
                    Color::Red
                } else if observation.state_of_charge < Percent(50.0) {
                    Color::DarkYellow
                } else {
                    Color::Green
                },
            ),
            Cell::new(observation.remaining_time).set_alignment(CellAlignment::Right),
            Cell::new(observation.power_out).set_alignment(CellAlignment::Right),
            Cell::new(observation.power_in).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
