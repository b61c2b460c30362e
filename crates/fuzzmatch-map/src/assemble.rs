//! Turns an assignment into the ranked result set.

use fuzzmatch_model::{Assignment, MatchOptions, ResultRow, ResultSet, RowKind};

use crate::engine::MatchRequest;

/// Builds the result set: matches by descending score (ties by left
/// position), then unmatched left labels, then, when enabled, unmatched
/// right labels.
///
/// Annotations are joined on the left position and never influence order.
pub fn assemble(
    assignment: &Assignment,
    request: &MatchRequest<'_>,
    options: &MatchOptions,
) -> ResultSet {
    let mut matches = assignment.matches.clone();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.left.cmp(&b.left)));

    let sentinel = options.unmatched_label.as_str();
    let mut rows = Vec::with_capacity(
        matches.len() + assignment.unmatched_left.len() + assignment.unmatched_right.len(),
    );

    rows.extend(matches.iter().map(|m| ResultRow {
        kind: RowKind::Matched,
        left_index: Some(m.left),
        right_index: Some(m.right),
        left_value: request.left_value(m.left).to_string(),
        right_value: request.right_value(m.right).to_string(),
        score: m.score,
        annotation: request.annotation(m.left),
    }));

    rows.extend(assignment.unmatched_left.iter().map(|&left| ResultRow {
        kind: RowKind::UnmatchedLeft,
        left_index: Some(left),
        right_index: None,
        left_value: request.left_value(left).to_string(),
        right_value: sentinel.to_string(),
        score: 0.0,
        annotation: request.annotation(left),
    }));

    if options.report_unmatched_right {
        rows.extend(assignment.unmatched_right.iter().map(|&right| ResultRow {
            kind: RowKind::UnmatchedRight,
            left_index: None,
            right_index: Some(right),
            left_value: sentinel.to_string(),
            right_value: request.right_value(right).to_string(),
            score: 0.0,
            annotation: None,
        }));
    }

    ResultSet {
        headers: request.headers.clone(),
        rows,
    }
}
