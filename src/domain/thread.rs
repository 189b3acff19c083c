//! Thread chunking: splitting a full-mode post into a sequence of
//! length-bounded messages.
//!
//! Venue blocks are packed whole so no venue's movie list is fragmented
//! mid-list; a single block longer than the effective limit falls back to
//! a line-by-line split. Chunk sizes are uneven by design.

use crate::domain::social::ComposedPost;

/// Default per-message character limit.
pub const DEFAULT_CHUNK_LIMIT: usize = 280;
/// Characters reserved at the end of each chunk for the `"(i/N)"` counter.
pub const COUNTER_RESERVE: usize = 10;
/// Marker between chunks in the combined thread artifact.
pub const THREAD_BOUNDARY: &str = "\n\n⸻\n\n";

/// Split a full-mode post into counter-suffixed chunks, each at most
/// `limit` characters including its counter.
///
/// The first chunk carries the header block alone and the last carries
/// the footer block alone; venue blocks are packed greedily in between.
pub fn chunk(post: &ComposedPost, limit: usize) -> Vec<String> {
    let effective = limit.saturating_sub(COUNTER_RESERVE).max(1);

    let mut bodies: Vec<String> = vec![post.header.clone()];
    bodies.extend(pack_blocks(&post.venue_blocks, effective));
    bodies.push(post.footer.clone());

    let total = bodies.len();
    bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| format!("{} ({}/{})", body, i + 1, total))
        .collect()
}

/// Join chunks into the combined thread artifact.
pub fn join_thread(chunks: &[String]) -> String {
    chunks.join(THREAD_BOUNDARY)
}

/// Greedily pack whole blocks into bodies of at most `effective` chars,
/// joining co-packed blocks with a blank line. An oversize block is split
/// at line boundaries instead.
fn pack_blocks(blocks: &[String], effective: usize) -> Vec<String> {
    let mut bodies: Vec<String> = Vec::new();
    let mut current = String::new();

    for block in blocks {
        if block.chars().count() > effective {
            if !current.is_empty() {
                bodies.push(std::mem::take(&mut current));
            }
            bodies.extend(split_lines(block, effective));
            continue;
        }

        let candidate_len = if current.is_empty() {
            block.chars().count()
        } else {
            current.chars().count() + 2 + block.chars().count()
        };
        if candidate_len <= effective {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(block);
        } else {
            bodies.push(std::mem::take(&mut current));
            current.push_str(block);
        }
    }
    if !current.is_empty() {
        bodies.push(current);
    }
    bodies
}

/// Line-level fallback for a block that alone exceeds the limit. Lines
/// are packed greedily; a single line over the limit is emitted as its
/// own body (degraded, but lines are the finest split granularity).
fn split_lines(block: &str, effective: usize) -> Vec<String> {
    let mut bodies: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in block.lines() {
        let candidate_len = if current.is_empty() {
            line.chars().count()
        } else {
            current.chars().count() + 1 + line.chars().count()
        };
        if candidate_len <= effective {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        } else {
            if !current.is_empty() {
                bodies.push(std::mem::take(&mut current));
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        bodies.push(current);
    }
    bodies
}
