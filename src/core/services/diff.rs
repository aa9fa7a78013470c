//! Inline HTML diff
//!
//! Both inputs are split into tags, words and whitespace runs. Each distinct
//! token is interned to one private-use character so the token sequences can
//! be diffed as strings by `dissimilar`. The result keeps the structure of
//! the new document: deleted words are wrapped in `<del>`, deleted tags are
//! dropped, inserted words are wrapped in `<ins>` and inserted tags are kept.
//!
//! The output is a pure function of the two inputs.

use std::collections::HashMap;

use dissimilar::Chunk;

/// Private-use code point ranges used as the token alphabet
const SYMBOL_RANGES: [(u32, u32); 3] =
    [(0xE000, 0xF8FF), (0xF_0000, 0xF_FFFD), (0x10_0000, 0x10_FFFD)];

/// Render `old` → `new` as one HTML document with `<del>`/`<ins>` spans
#[must_use]
pub fn html_diff(old: &str, new: &str) -> String {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);

    let mut alphabet = Alphabet::default();
    let mut out = Renderer::default();

    let (Some(a), Some(b)) = (alphabet.encode(&old_tokens), alphabet.encode(&new_tokens)) else {
        // Too many distinct tokens to intern: show everything as replaced.
        out.delete(&old_tokens);
        out.insert(&new_tokens);
        return out.finish();
    };

    for chunk in dissimilar::diff(&a, &b) {
        match chunk {
            Chunk::Equal(s) => out.equal(&alphabet.decode(s)),
            Chunk::Delete(s) => out.delete(&alphabet.decode(s)),
            Chunk::Insert(s) => out.insert(&alphabet.decode(s)),
        }
    }
    out.finish()
}

/// Split HTML into tag, word and whitespace tokens
///
/// Concatenating the tokens gives back the input.
#[must_use]
pub fn tokenize(html: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = html;
    while let Some(first) = rest.chars().next() {
        let len = if first == '<' {
            tag_len(rest).unwrap_or_else(|| word_len(rest))
        } else if first.is_ascii_whitespace() {
            rest.find(|c: char| !c.is_ascii_whitespace()).unwrap_or(rest.len())
        } else {
            word_len(rest)
        };
        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }
    tokens
}

/// Length of the tag at the start of `s`; `>` inside quoted values does not end it
fn tag_len(s: &str) -> Option<usize> {
    let mut quote = None;
    for (idx, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (None, '>') => return Some(idx + 1),
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            _ => {},
        }
    }
    None
}

fn word_len(s: &str) -> usize {
    s.char_indices()
        .skip(1)
        .find(|&(_, c)| c == '<' || c.is_ascii_whitespace())
        .map_or(s.len(), |(idx, _)| idx)
}

fn is_tag(token: &str) -> bool {
    token.starts_with('<') && token.ends_with('>')
}

fn symbol(index: usize) -> Option<char> {
    let mut index = u32::try_from(index).ok()?;
    for (start, end) in SYMBOL_RANGES {
        let size = end - start + 1;
        if index < size {
            return char::from_u32(start + index);
        }
        index -= size;
    }
    None
}

#[derive(Default)]
struct Alphabet<'a> {
    symbols: HashMap<&'a str, char>,
    tokens: HashMap<char, &'a str>,
}

impl<'a> Alphabet<'a> {
    fn encode(&mut self, tokens: &[&'a str]) -> Option<String> {
        let mut encoded = String::with_capacity(tokens.len() * 3);
        for &token in tokens {
            let sym = if let Some(&sym) = self.symbols.get(token) {
                sym
            } else {
                let sym = symbol(self.symbols.len())?;
                self.symbols.insert(token, sym);
                self.tokens.insert(sym, token);
                sym
            };
            encoded.push(sym);
        }
        Some(encoded)
    }

    fn decode(&self, encoded: &str) -> Vec<&'a str> {
        encoded.chars().filter_map(|c| self.tokens.get(&c).copied()).collect()
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
}

impl Renderer {
    fn equal(&mut self, tokens: &[&str]) {
        for token in tokens {
            self.out.push_str(token);
        }
    }

    fn delete(&mut self, tokens: &[&str]) {
        let text: String = tokens.iter().filter(|t| !is_tag(t)).copied().collect();
        self.wrap("del", &text);
    }

    fn insert(&mut self, tokens: &[&str]) {
        let mut text = String::new();
        for &token in tokens {
            if is_tag(token) {
                self.wrap("ins", &text);
                text.clear();
                self.out.push_str(token);
            } else {
                text.push_str(token);
            }
        }
        self.wrap("ins", &text);
    }

    /// Wrap the words of `text` in `marker`, keeping outer whitespace outside
    fn wrap(&mut self, marker: &str, text: &str) {
        let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
        if trimmed.is_empty() {
            if marker == "ins" {
                self.out.push_str(text);
            }
            return;
        }
        let start = text.len() - text.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
        let end = start + trimmed.len();
        if marker == "ins" {
            self.out.push_str(&text[..start]);
        }
        self.out.push('<');
        self.out.push_str(marker);
        self.out.push('>');
        self.out.push_str(trimmed);
        self.out.push_str("</");
        self.out.push_str(marker);
        self.out.push('>');
        if marker == "ins" {
            self.out.push_str(&text[end..]);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
