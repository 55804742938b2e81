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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;

pub const DEFAULT_PORT: u16 = 6969;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The text of the navigation links and of the goodbye page.
#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    pub fail: String,
    pub pass: String,
    pub show: String,
    pub quit: String,
    pub goodbye: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            fail: "fail".to_string(),
            pass: "pass".to_string(),
            show: "show".to_string(),
            quit: "quit".to_string(),
            goodbye: "Goodbye!".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served under `/_/`.
    pub assets: PathBuf,
    pub labels: Labels,
    /// Open the browser once the server is listening.
    pub open: bool,
}

impl ServerConfig {
    pub fn new(assets: PathBuf) -> Self {
        Self {
            port: DEFAULT_PORT,
            assets,
            labels: Labels::default(),
            open: false,
        }
    }

    /// Overlay the values set in a configuration file.
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(assets) = file.assets {
            self.assets = assets;
        }
        if let Some(open) = file.open {
            self.open = open;
        }
        let labels = file.labels;
        let targets = [
            (labels.fail, &mut self.labels.fail),
            (labels.pass, &mut self.labels.pass),
            (labels.show, &mut self.labels.show),
            (labels.quit, &mut self.labels.quit),
            (labels.goodbye, &mut self.labels.goodbye),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

/// The contents of a TOML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub port: Option<u16>,
    pub assets: Option<PathBuf>,
    pub open: Option<bool>,
    #[serde(default)]
    pub labels: LabelsFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsFile {
    pub fail: Option<String>,
    pub pass: Option<String>,
    pub show: Option<String>,
    pub quit: Option<String>,
    pub goodbye: Option<String>,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> Fallible<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn read(path: &Path) -> Fallible<Self> {
        log::debug!("Reading configuration from {}", path.display());
        let contents = read_to_string(path)?;
        Self::parse(&contents)
    }
}

#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// The named pipe requests are read from.
    pub fifo: PathBuf,
    /// Directory holding the `<deck>.data` files.
    pub directory: PathBuf,
    /// Delay between answering a request and reopening the pipe.
    pub interval: Duration,
}
