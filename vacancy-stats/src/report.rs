use std::collections::BTreeMap;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

use crate::stats::LanguageStats;

const HEADER: [&str; 4] = [
    "Язык программирования",
    "Вакансий найдено",
    "Вакансий обработано",
    "Средняя зарплата",
];

const COLUMN_ALIGNMENTS: [CellAlignment; 4] = [
    CellAlignment::Left,
    CellAlignment::Center,
    CellAlignment::Center,
    CellAlignment::Right,
];

/// Render per-language statistics as a bordered table with a caption line,
/// best-paying language first. Rows with equal averages keep the order of
/// the stats mapping.
pub fn format_table(stats: &BTreeMap<String, LanguageStats>, title: &str) -> String {
    let mut rows: Vec<(&String, &LanguageStats)> = stats.iter().collect();
    rows.sort_by(|(_, a), (_, b)| b.average_salary.cmp(&a.average_salary));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(HEADER.to_vec());
    for (column, alignment) in table.column_iter_mut().zip(COLUMN_ALIGNMENTS) {
        column.set_cell_alignment(alignment);
    }
    for (language, stats) in rows {
        table.add_row(vec![
            Cell::new(language),
            Cell::new(stats.vacancies_found),
            Cell::new(stats.vacancies_processed),
            Cell::new(stats.average_salary),
        ]);
    }
    format!("{}\n{}", title, table)
}
