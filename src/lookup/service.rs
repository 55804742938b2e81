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

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use crate::config::LookupConfig;
use crate::error::Fallible;
use crate::lookup::request::CardRequest;
use crate::lookup::resolve::Lookup;

/// Answers one request per pipe open, until the pipe yields a blank line or
/// can no longer be opened.
pub struct LookupService {
    fifo: PathBuf,
    interval: Duration,
    lookup: Lookup,
}

impl LookupService {
    pub fn new(config: LookupConfig) -> Self {
        Self {
            fifo: config.fifo,
            interval: config.interval,
            lookup: Lookup::new(config.directory),
        }
    }

    /// Run the request loop, writing one answer line per request to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Fallible<()> {
        log::debug!("Polling {} for requests.", self.fifo.display());
        while let Some(line) = self.read_request() {
            let request = CardRequest::parse(&line);
            log::debug!("Request for key {} in {}.", request.key, request.deck);
            let text = self.lookup.resolve(request.deck_name(), request.key);
            writeln!(out, "{text}")?;
            out.flush()?;
            // Throttle so the writer has time to close its end before the
            // pipe is reopened.
            sleep(self.interval);
        }
        log::debug!(
            "Lookup service stopped after loading {} decks.",
            self.lookup.deck_count()
        );
        Ok(())
    }

    /// Open the pipe, read a single line, and close the pipe again. Returns
    /// `None` when the loop should stop.
    fn read_request(&self) -> Option<String> {
        let file = match File::open(&self.fifo) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Cannot open {}: {e}", self.fifo.display());
                return None;
            }
        };
        let mut reader = BufReader::new(file);
        let mut buffer = Vec::new();
        if let Err(e) = reader.read_until(b'\n', &mut buffer) {
            log::warn!("Failed to read from {}: {e}", self.fifo.display());
            return None;
        }
        drop(reader);
        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            log::debug!("Received a blank line.");
            None
        } else {
            Some(line.to_string())
        }
    }
}
