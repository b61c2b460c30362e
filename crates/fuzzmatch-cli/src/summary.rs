use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fuzzmatch_map::{ScoreBreakdown, ScoreRule};
use fuzzmatch_model::ResultRow;
use fuzzmatch_report::format_score;

use fuzzmatch_cli::pipeline::MatchReport;

pub fn print_match_summary(report: &MatchReport, top: usize) {
    let results = &report.outcome.results;
    let assignment = &report.outcome.assignment;
    println!("Input: {}", report.source.display());
    if report.is_written() {
        println!("Output: {}", report.output.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(format!("{} labels", results.headers.left)),
        Cell::new(report.input.left.len()),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} labels", results.headers.right)),
        Cell::new(report.input.right.len()),
    ]);
    table.add_row(vec![
        Cell::new("Matches found"),
        Cell::new(results.match_count())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Perfect matches"),
        count_cell(assignment.perfect_count(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("From threshold sweep"),
        count_cell(assignment.threshold_count(), Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new(format!("Unmatched {}", results.headers.left)),
        count_cell(assignment.unmatched_left.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new(format!("Unmatched {}", results.headers.right)),
        count_cell(assignment.unmatched_right.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Mean score"),
        assignment
            .mean_score()
            .map_or_else(|| dim_cell("-"), |mean| Cell::new(format_score(mean))),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        dim_cell(format!(
            "load {} ms, match {} ms, write {} ms",
            report.timings.load.as_millis(),
            report.timings.matching.as_millis(),
            report.timings.write.as_millis()
        )),
    ]);
    println!("{table}");

    let best: Vec<&ResultRow> = results.matched().take(top).collect();
    if !best.is_empty() {
        println!("Top {} matches:", best.len());
        println!("{}", rows_table(report, &best, true));
    }

    let perfect: Vec<&ResultRow> = results.perfect_matches().collect();
    if !perfect.is_empty() {
        println!("Perfect matches (100% score):");
        println!("{}", rows_table(report, &perfect, false));
    }

    if let Some(error) = &report.write_error {
        eprintln!("error: {error}");
        eprintln!("Results were computed but not written to {}", report.output.display());
    }
}

fn rows_table(report: &MatchReport, rows: &[&ResultRow], with_score: bool) -> Table {
    let headers = &report.outcome.results.headers;
    let annotated = with_score && headers.annotation.is_some();

    let mut header = vec![header_cell(&headers.left), header_cell(&headers.right)];
    if with_score {
        header.push(header_cell(&headers.score));
    }
    if let Some(label) = headers.annotation.as_deref().filter(|_| annotated) {
        header.push(header_cell(label));
    }

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    if with_score {
        align_column(&mut table, 2, CellAlignment::Right);
    }
    for row in rows {
        let mut cells = vec![Cell::new(&row.left_value), Cell::new(&row.right_value)];
        if with_score {
            cells.push(score_cell(row.score));
        }
        if annotated {
            cells.push(
                row.annotation
                    .as_deref()
                    .map_or_else(|| dim_cell("-"), Cell::new),
            );
        }
        table.add_row(cells);
    }
    table
}

pub fn print_columns(headers: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, header) in headers.iter().enumerate() {
        let name = if header.is_empty() {
            dim_cell("(unnamed)")
        } else {
            Cell::new(header)
        };
        table.add_row(vec![dim_cell(format!("#{}", index + 1)), name]);
    }
    println!("{table}");
}

pub fn print_breakdown(left: &str, right: &str, breakdown: &ScoreBreakdown) {
    println!("{left:?} vs {right:?}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Component"), header_cell("Score")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if let Some(parts) = &breakdown.components {
        for (name, value) in [
            ("ratio", parts.ratio),
            ("partial ratio", parts.partial),
            ("token sort ratio", parts.token_sort),
            ("token set ratio", parts.token_set),
        ] {
            table.add_row(vec![Cell::new(name), Cell::new(format_score(value))]);
        }
    }
    table.add_row(vec![
        Cell::new(format!("score ({})", breakdown.rule))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        score_cell(breakdown.score).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if breakdown.rule != ScoreRule::EmptyInput {
        println!("{}", breakdown.explain());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format_score(score));
    if score >= 100.0 {
        cell.fg(Color::Green)
    } else if score >= 80.0 {
        cell
    } else {
        cell.fg(Color::Yellow)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
