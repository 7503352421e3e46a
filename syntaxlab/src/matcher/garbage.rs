//! Grouping of rejected characters into contiguous runs

use crate::utils::Span;
use serde::Serialize;

/// A maximal run of adjacent rejected characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GarbageRun {
    pub span: Span,
    pub fragment: String,
}

/// Group `(window index, char)` pairs into runs of consecutive indices.
///
/// `base` is the absolute offset of window index 0. Input must be ordered by index;
/// runs come back in the same left-to-right order.
pub fn group_garbage(base: usize, garbage: &[(usize, char)]) -> Vec<GarbageRun> {
    let mut runs: Vec<GarbageRun> = Vec::new();

    for &(index, ch) in garbage {
        let offset = base + index;
        match runs.last_mut() {
            Some(run) if run.span.end + 1 == offset => {
                run.span.end = offset;
                run.fragment.push(ch);
            }
            _ => runs.push(GarbageRun {
                span: Span::point(offset),
                fragment: ch.to_string(),
            }),
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_split_on_gaps() {
        let runs = group_garbage(10, &[(0, '#'), (1, '$'), (3, '!'), (6, '?'), (7, '?')]);
        assert_eq!(
            runs,
            vec![
                GarbageRun {
                    span: Span::new(10, 11),
                    fragment: "#$".to_string()
                },
                GarbageRun {
                    span: Span::point(13),
                    fragment: "!".to_string()
                },
                GarbageRun {
                    span: Span::new(16, 17),
                    fragment: "??".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_garbage_no_runs() {
        assert!(group_garbage(0, &[]).is_empty());
    }
}
