// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::fs::read;
use std::path::Path;
use std::time::Instant;

/// The extension of a deck's backing data file.
pub const DATA_EXTENSION: &str = "data";

/// The card texts of a single deck, indexed by integer key.
pub struct DeckMap {
    entries: HashMap<i64, String>,
}

impl DeckMap {
    /// Parse the contents of a data file. Each line is `<key>\t<text>`.
    /// Lines without a tab carry no text and are skipped. A key that appears
    /// twice keeps the text of its last occurrence. Keys must be plain
    /// integers: anything else, padding included, is key zero.
    pub fn parse(contents: &str) -> Self {
        let mut entries = HashMap::new();
        for line in contents.lines() {
            if let Some((key, text)) = line.split_once('\t') {
                entries.insert(key.parse::<i64>().unwrap_or(0), text.to_string());
            }
        }
        Self { entries }
    }

    /// Load the deck at `path`. Returns `None` if the file can't be read.
    pub fn load(path: &Path) -> Option<Self> {
        let start = Instant::now();
        let bytes = match read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Deck file {} unavailable: {e}", path.display());
                return None;
            }
        };
        let deck = Self::parse(&String::from_utf8_lossy(&bytes));
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Loaded {} entries from {} in {duration}ms.",
            deck.len(),
            path.display()
        );
        Some(deck)
    }

    pub fn get(&self, key: i64) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an integer key leniently: surrounding whitespace is ignored, and
/// the leading run of digits (with an optional sign) is used. Text with no
/// leading digits is key zero.
pub fn parse_key(text: &str) -> i64 {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
