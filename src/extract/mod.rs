pub mod environment;
pub mod fallback;
pub mod guards;
pub mod matrix;
pub mod options;
pub mod parameters;
pub mod post;

use crate::core::{Extraction, FeatureSet};
use once_cell::sync::Lazy;
use regex::Regex;

static PIPELINE_STRUCTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\bpipeline\s*\{|\bstage\s*\(").unwrap());

/// Extracts a typed feature set from a source pipeline script.
///
/// Total over its input domain: malformed or non-pipeline input yields
/// default-empty fields and a low confidence, never a failure. When the
/// primary pass finds no recognizable pipeline structure, a coarser
/// fallback tokenizer takes over and records unparsed regions.
pub fn extract(script: &str) -> Extraction {
    if PIPELINE_STRUCTURE.is_match(script) {
        primary_pass(script)
    } else {
        fallback::tokenize(script)
    }
}

/// Primary pass: independent per-construct sub-extractors, each scanning
/// the whole script for its own block keyword.
fn primary_pass(script: &str) -> Extraction {
    let (environment, credential_bindings) = environment::extract(script);
    let (timeout, retry, retention) = options::extract(script);
    let features = FeatureSet {
        parameters: parameters::extract(script),
        environment,
        matrix: matrix::extract(script),
        timeout,
        retry,
        post_actions: post::extract(script),
        retention,
        credential_bindings,
        guards: guards::extract_guards(script),
        parallel_stages: guards::extract_parallel_stages(script),
    };
    Extraction {
        features,
        confidence: 1.0,
        unparsed: Vec::new(),
    }
}

/// A brace-delimited block located in the source text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Block<'a> {
    pub body: &'a str,
    pub start_line: usize,
    pub end_line: usize,
}

/// Locates every `keyword { ... }` block, returning the body between the
/// braces. Brace matching is a depth count over raw characters; the source
/// DSL is a superset of a general scripting language, so this is a
/// heuristic, not a grammar.
pub(crate) fn find_blocks<'a>(content: &'a str, keyword: &str) -> Vec<Block<'a>> {
    let opener = Regex::new(&format!(r"\b{}\s*(?:\([^)]*\)\s*)?\{{", regex::escape(keyword)))
        .expect("block keyword is a fixed identifier");
    let mut blocks = Vec::new();
    for m in opener.find_iter(content) {
        let brace = m.end() - 1;
        if let Some(close) = matching_brace(content, brace) {
            let body = &content[brace + 1..close];
            let start_line = line_of(content, brace);
            let end_line = line_of(content, close);
            blocks.push(Block {
                body,
                start_line,
                end_line,
            });
        }
    }
    blocks
}

/// First `keyword { ... }` block, if any.
pub(crate) fn find_block<'a>(content: &'a str, keyword: &str) -> Option<Block<'a>> {
    find_blocks(content, keyword).into_iter().next()
}

/// Index of the `}` matching the `{` at `open`, ignoring braces inside
/// single- or double-quoted strings.
pub(crate) fn matching_brace(content: &str, open: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let c = bytes[i];
        match quote {
            Some(q) => {
                if c == b'\\' {
                    i += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                b'\'' | b'"' => quote = Some(c),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// 1-based line number of a byte offset.
pub(crate) fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Strips one layer of matching quotes.
pub(crate) fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2 {
        let first = v.as_bytes()[0];
        let last = v.as_bytes()[v.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            return &v[1..v.len() - 1];
        }
    }
    v
}
