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

use std::env::current_dir;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::ConfigFile;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::config::LookupConfig;
use crate::config::ServerConfig;
use crate::error::Fallible;
use crate::lookup::service::LookupService;
use crate::review::driver::Driver;
use crate::review::server::start_server;

/// Review flashcards in the browser, one card at a time. Cards are read
/// from standard input as `front<TAB>back` lines, and each outcome is
/// written to standard output.
#[derive(Parser)]
#[command(name = "oboeru", version, long_about = None)]
pub struct ServeArgs {
    /// Port number.
    #[arg(short, long)]
    port: Option<u16>,
    /// Fail label.
    #[arg(short = 'F', long)]
    fail: Option<String>,
    /// Pass label.
    #[arg(short = 'P', long)]
    pass: Option<String>,
    /// Show label.
    #[arg(short = 'S', long)]
    show: Option<String>,
    /// Quit label.
    #[arg(short = 'Q', long)]
    quit: Option<String>,
    /// Text to display before quitting.
    #[arg(short = 'q', long)]
    goodbye: Option<String>,
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory served under `/_/`. Defaults to the working directory.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Open the browser once the server is listening.
    #[arg(long)]
    open: bool,
}

impl ServeArgs {
    /// Defaults, then the configuration file, then the flags.
    pub fn into_config(self) -> Fallible<ServerConfig> {
        let mut config = ServerConfig::new(current_dir()?);
        if let Some(path) = &self.config {
            config.merge(ConfigFile::read(path)?);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(assets) = self.assets {
            config.assets = assets;
        }
        if self.open {
            config.open = true;
        }
        let overrides = [
            (self.fail, &mut config.labels.fail),
            (self.pass, &mut config.labels.pass),
            (self.show, &mut config.labels.show),
            (self.quit, &mut config.labels.quit),
            (self.goodbye, &mut config.labels.goodbye),
        ];
        for (value, target) in overrides {
            if let Some(value) = value {
                *target = value;
            }
        }
        Ok(config)
    }
}

pub async fn serve(args: ServeArgs) -> Fallible<()> {
    let config = args.into_config()?;
    start_server(config, Driver::stdio()).await
}

/// Answer `deck.suffix<TAB>key` requests read from a named pipe with the
/// matching text from `deck.data`, one line per request on standard output.
#[derive(Parser)]
#[command(name = "oboerudata", version, long_about = None)]
pub struct LookupArgs {
    /// Path to the named pipe.
    fifo: PathBuf,
    /// Directory holding the deck data files. Defaults to the working
    /// directory.
    #[arg(short, long)]
    directory: Option<PathBuf>,
    /// Milliseconds to wait before reopening the pipe.
    #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    interval: u64,
}

impl LookupArgs {
    pub fn into_config(self) -> Fallible<LookupConfig> {
        let directory = match self.directory {
            Some(directory) => directory,
            None => current_dir()?,
        };
        Ok(LookupConfig {
            fifo: self.fifo,
            directory,
            interval: Duration::from_millis(self.interval),
        })
    }
}

pub fn lookup(args: LookupArgs) -> Fallible<()> {
    let config = args.into_config()?;
    let mut service = LookupService::new(config);
    service.run(&mut stdout().lock())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::config::DEFAULT_PORT;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_serve_defaults() -> Fallible<()> {
        let config = ServeArgs::try_parse_from(["oboeru"]).unwrap().into_config()?;
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.assets, current_dir()?);
        assert_eq!(config.labels.fail, "fail");
        assert_eq!(config.labels.goodbye, "Goodbye!");
        assert!(!config.open);
        Ok(())
    }

    #[test]
    fn test_serve_flags() -> Fallible<()> {
        let args = ServeArgs::try_parse_from([
            "oboeru", "-p", "8080", "-F", "だめ", "-P", "よし", "-S", "答え", "-Q", "やめる", "-q",
            "またね", "--open",
        ])
        .unwrap();
        let config = args.into_config()?;
        assert_eq!(config.port, 8080);
        assert_eq!(config.labels.fail, "だめ");
        assert_eq!(config.labels.pass, "よし");
        assert_eq!(config.labels.show, "答え");
        assert_eq!(config.labels.quit, "やめる");
        assert_eq!(config.labels.goodbye, "またね");
        assert!(config.open);
        Ok(())
    }

    /// Flags take precedence over the configuration file.
    #[test]
    fn test_serve_config_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("oboeru.toml");
        write(
            &path,
            "port = 7000\n[labels]\nshow = \"reveal\"\npass = \"ok\"\n",
        )?;
        let path = path.display().to_string();
        let args = ServeArgs::try_parse_from(["oboeru", "-c", &path, "-P", "good"]).unwrap();
        let config = args.into_config()?;
        assert_eq!(config.port, 7000);
        assert_eq!(config.labels.show, "reveal");
        assert_eq!(config.labels.pass, "good");
        Ok(())
    }

    #[test]
    fn test_serve_invalid_port() {
        assert!(ServeArgs::try_parse_from(["oboeru", "-p", "http"]).is_err());
    }

    #[test]
    fn test_lookup_args() -> Fallible<()> {
        let args = LookupArgs::try_parse_from(["oboerudata", "/tmp/fifo"]).unwrap();
        let config = args.into_config()?;
        assert_eq!(config.fifo, PathBuf::from("/tmp/fifo"));
        assert_eq!(config.directory, current_dir()?);
        assert_eq!(config.interval, Duration::from_millis(50));
        Ok(())
    }

    #[test]
    fn test_lookup_args_options() -> Fallible<()> {
        let args =
            LookupArgs::try_parse_from(["oboerudata", "-d", "/decks", "-i", "10", "/tmp/fifo"])
                .unwrap();
        let config = args.into_config()?;
        assert_eq!(config.directory, PathBuf::from("/decks"));
        assert_eq!(config.interval, Duration::from_millis(10));
        Ok(())
    }

    /// Exactly one positional argument.
    #[test]
    fn test_lookup_args_count() {
        assert!(LookupArgs::try_parse_from(["oboerudata"]).is_err());
        assert!(LookupArgs::try_parse_from(["oboerudata", "a", "b"]).is_err());
    }
}
