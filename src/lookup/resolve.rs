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
use std::path::PathBuf;

use crate::lookup::deck::DATA_EXTENSION;
use crate::lookup::deck::DeckMap;

/// Resolves deck keys into card text. Decks are loaded the first time they
/// are referenced and stay resident for the life of the process.
pub struct Lookup {
    directory: PathBuf,
    /// `None` records a deck whose data file could not be opened, so that
    /// it is not retried.
    decks: HashMap<String, Option<DeckMap>>,
}

impl Lookup {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            decks: HashMap::new(),
        }
    }

    /// The text for `key` in `deck`, or the empty string if the deck has no
    /// data file or the key is absent. A miss is not an error.
    pub fn resolve(&mut self, deck: &str, key: i64) -> String {
        let directory = &self.directory;
        let entry = self.decks.entry(deck.to_string()).or_insert_with(|| {
            let path = directory.join(format!("{deck}.{DATA_EXTENSION}"));
            DeckMap::load(&path)
        });
        match entry {
            Some(map) => map.get(key).unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    /// The number of decks referenced so far, including missing ones.
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }
}
