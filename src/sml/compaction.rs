//! Run compaction
//!
//! One forward pass over the runs. Empty runs are dropped; a run whose state
//! equals the last kept run's state is folded into it. Literal runs are joined
//! by plain concatenation, other runs by appending their words.

use crate::sml::document::{Document, Run};

/// Merge adjacent equal-state runs and drop empty ones.
pub fn compact(document: Document) -> Document {
    let before = document.len();
    let mut kept: Vec<Run> = Vec::with_capacity(before);

    for run in document.runs {
        if run.is_empty() {
            continue;
        }
        if let Some(last) = kept.last_mut() {
            if last.state == run.state {
                merge_into(last, run);
                continue;
            }
        }
        kept.push(run);
    }

    log::debug!(
        target: "sml.compaction",
        "compacted {} runs into {}",
        before,
        kept.len()
    );
    Document::from_runs(kept)
}

fn merge_into(last: &mut Run, run: Run) {
    if last.state.literal {
        match (last.tokens.first_mut(), run.tokens.into_iter().next()) {
            (Some(head), Some(tail)) => head.push_str(&tail),
            (None, Some(tail)) => last.tokens.push(tail),
            (_, None) => {}
        }
    } else {
        last.tokens.extend(run.tokens);
    }
}
