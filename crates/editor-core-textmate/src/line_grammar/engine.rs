use super::rules::{MatchRule, RegionRule, Rule};
use super::stack::StackFrame;
use crate::error::GrammarError;
use crate::grammar::EngineToken;
use regex::Captures;
use std::sync::Arc;

/// Tokenize one line starting from `stack`, returning the tokens and the end stack.
pub(crate) fn tokenize_line(
    root_rules: &[Rule],
    stack: Arc<StackFrame>,
    line: &str,
) -> Result<(Vec<EngineToken>, Arc<StackFrame>), GrammarError> {
    let mut stack = stack;
    let mut sink = TokenSink::default();

    let line_len = line.len();
    let mut pos = 0usize;

    // Prevent infinite loops with zero-width matches; keep a generous bound.
    let mut iterations = 0usize;
    let max_iterations = (line_len + 1).saturating_mul(32).max(128);

    // Stack in effect before the most recent zero-width `begin`, and where it matched.
    let mut zero_width_push: Option<(usize, Arc<StackFrame>)> = None;

    while pos <= line_len {
        iterations += 1;
        if iterations > max_iterations {
            return Err(GrammarError::IterationLimit);
        }

        let Some(found) = find_next_match(root_rules, &stack, line, pos) else {
            sink.push(pos, line_len, &stack.content_scopes);
            break;
        };

        // Content before the match.
        sink.push(pos, found.start, &stack.content_scopes);

        let stack_before = stack.clone();
        match &found.kind {
            MatchKind::End => {
                sink.push(found.start, found.end, &stack.delimiter_scopes);
                if let Some(parent) = stack.parent.clone() {
                    stack = parent;
                }
            }
            MatchKind::Begin(region) => {
                let pushed = StackFrame::push(&stack, region);
                sink.push(found.start, found.end, &pushed.delimiter_scopes);
                stack = pushed;
            }
            MatchKind::Match(rule) => {
                emit_match(&mut sink, rule, &found.captures, &stack.content_scopes);
            }
        }

        let zero_width = found.start == found.end;
        // A zero-width `end` closing a region opened zero-width at the same offset leaves the
        // stack where it was, same as a zero-width match.
        let no_progress = zero_width
            && (Arc::ptr_eq(&stack_before, &stack)
                || zero_width_push
                    .as_ref()
                    .is_some_and(|(at, frame)| *at == found.end && Arc::ptr_eq(frame, &stack)));

        zero_width_push = match found.kind {
            MatchKind::Begin(_) if zero_width => Some((found.end, stack_before)),
            _ if zero_width => zero_width_push,
            _ => None,
        };

        if no_progress {
            // Step over one char so the next search starts somewhere new. Nothing left to
            // consume at end of line.
            zero_width_push = None;
            if found.end >= line_len {
                break;
            }
            let step = line[found.end..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            sink.push(found.end, found.end + step, &stack.content_scopes);
            pos = found.end + step;
        } else {
            pos = found.end;
        }
    }

    let tokens = sink.finish(line, &stack.content_scopes);
    Ok((tokens, stack))
}

enum MatchKind {
    End,
    Begin(Arc<RegionRule>),
    Match(Arc<MatchRule>),
}

struct FoundMatch {
    start: usize,
    end: usize,
    kind: MatchKind,
    captures: Vec<Option<(usize, usize)>>,
}

/// Leftmost match among the active rules. Ties go to the open region's `end` pattern, then to
/// rules in definition order.
fn find_next_match(
    root_rules: &[Rule],
    stack: &StackFrame,
    line: &str,
    from: usize,
) -> Option<FoundMatch> {
    let mut best: Option<FoundMatch> = None;

    let active_rules = match &stack.region {
        Some(region) => {
            if let Some(m) = region.end.find_at(line, from) {
                best = Some(FoundMatch {
                    start: m.start(),
                    end: m.end(),
                    kind: MatchKind::End,
                    captures: Vec::new(),
                });
            }
            region.patterns.as_slice()
        }
        None => root_rules,
    };

    for rule in active_rules {
        let candidate = match rule {
            Rule::Match(m) => m.regex.captures_at(line, from).map(|caps| {
                let whole = caps.get(0).map_or((from, from), |g| (g.start(), g.end()));
                FoundMatch {
                    start: whole.0,
                    end: whole.1,
                    kind: MatchKind::Match(m.clone()),
                    captures: capture_spans(&caps),
                }
            }),
            Rule::Region(r) => r.begin.find_at(line, from).map(|m| FoundMatch {
                start: m.start(),
                end: m.end(),
                kind: MatchKind::Begin(r.clone()),
                captures: Vec::new(),
            }),
        };

        let Some(candidate) = candidate else {
            continue;
        };

        // Since we iterate in definition order, keep the first one on ties.
        if best.as_ref().is_none_or(|b| candidate.start < b.start) {
            best = Some(candidate);
        }
    }

    best
}

fn capture_spans(caps: &Captures<'_>) -> Vec<Option<(usize, usize)>> {
    caps.iter()
        .map(|g| g.map(|g| (g.start(), g.end())))
        .collect()
}

fn emit_match(
    sink: &mut TokenSink,
    rule: &MatchRule,
    captures: &[Option<(usize, usize)>],
    content_scopes: &[String],
) {
    let Some(Some((start, end))) = captures.first().copied() else {
        return;
    };

    let mut base = content_scopes.to_vec();
    base.extend(rule.scope.iter().cloned());

    let mut groups: Vec<(usize, usize, &str)> = rule
        .captures
        .iter()
        .filter_map(|(group, scope)| {
            captures
                .get(*group)
                .copied()
                .flatten()
                .map(|(s, e)| (s, e, scope.as_str()))
        })
        .collect();
    groups.sort_by_key(|&(s, e, _)| (s, std::cmp::Reverse(e)));

    let mut cursor = start;
    for (s, e, scope) in groups {
        // Nested or overlapping captures are covered by the earlier group.
        if s < cursor || s >= e {
            continue;
        }
        sink.push(cursor, s, &base);
        let mut scoped = base.clone();
        scoped.push(scope.to_string());
        sink.push(s, e, &scoped);
        cursor = e;
    }
    sink.push(cursor, end, &base);
}

/// Collects byte-range segments and turns them into char-offset tokens.
#[derive(Default)]
struct TokenSink {
    segments: Vec<(usize, usize, Vec<String>)>,
}

impl TokenSink {
    fn push(&mut self, start: usize, end: usize, scopes: &[String]) {
        if start >= end {
            return;
        }

        if let Some(last) = self.segments.last_mut()
            && last.1 == start
            && last.2 == scopes
        {
            last.1 = end;
            return;
        }

        self.segments.push((start, end, scopes.to_vec()));
    }

    fn finish(self, line: &str, end_scopes: &[String]) -> Vec<EngineToken> {
        if self.segments.is_empty() {
            return vec![EngineToken {
                start_offset: 0,
                end_offset: 0,
                scopes: end_scopes.to_vec(),
            }];
        }

        let mut tokens = Vec::with_capacity(self.segments.len());
        let mut offset = line[..self.segments[0].0].chars().count();
        for (start, end, scopes) in self.segments {
            let len = line[start..end].chars().count();
            tokens.push(EngineToken {
                start_offset: offset,
                end_offset: offset + len,
                scopes,
            });
            offset += len;
        }
        tokens
    }
}
