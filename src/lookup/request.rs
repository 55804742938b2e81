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

use crate::lookup::deck::parse_key;

/// A single `<deck>.<suffix>\t<key>` request read from the pipe.
#[derive(Debug, PartialEq)]
pub struct CardRequest {
    pub deck: String,
    pub key: i64,
}

impl CardRequest {
    /// Parsing never fails: a line without a tab is a deck reference with
    /// key zero, and a malformed key is also zero.
    pub fn parse(line: &str) -> Self {
        let (deck, key) = match line.split_once('\t') {
            Some((deck, key)) => (deck, parse_key(key)),
            None => (line, 0),
        };
        Self {
            deck: deck.trim().to_string(),
            key,
        }
    }

    /// The name of the backing deck. Callers append a suffix after the first
    /// `.` to tell apart the sides of a card, but both sides share one file.
    pub fn deck_name(&self) -> &str {
        match self.deck.split_once('.') {
            Some((name, _)) => name,
            None => &self.deck,
        }
    }
}
