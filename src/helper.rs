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

use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::task::Context;
use std::task::Poll;
use std::thread::sleep;
use std::time::Duration;
use std::time::Instant;

use tempfile::tempdir;
use tokio::io::AsyncWrite;

use crate::error::Fallible;

/// Create a fresh directory under the system temp directory. The directory
/// is kept after the handle is dropped, so tests can pass the path around.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// An output stream whose contents can be inspected from elsewhere, standing
/// in for standard output.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Block until at least `count` lines have been written.
    pub fn wait_for_lines(&self, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.contents().matches('\n').count() < count {
            assert!(Instant::now() < deadline, "timed out waiting for output");
            sleep(Duration::from_millis(1));
        }
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl AsyncWrite for Capture {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(dir.is_dir());
        assert_ne!(dir, create_tmp_directory()?);
        Ok(())
    }

    #[test]
    fn test_capture() -> Fallible<()> {
        let capture = Capture::default();
        let mut writer = capture.clone();
        writeln!(writer, "pass")?;
        capture.wait_for_lines(1);
        assert_eq!(capture.contents(), "pass\n");
        Ok(())
    }
}
