// Copyright 2026 Sqlfold Contributors
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

//! Query session
//!
//! The session carries query-time settings into evaluation. The clock is
//! fixed at construction so every CURRENT_TIMESTAMP read within one
//! session agrees. All times are UTC.

use chrono::Utc;

/// Opaque carrier for query-time settings
#[derive(Debug, Clone)]
pub struct Session {
    start_time: i64,
}

impl Session {
    /// Create a session whose clock reads the current wall time
    pub fn new() -> Self {
        Session {
            start_time: Utc::now().timestamp(),
        }
    }

    /// Create a session with a fixed clock reading, in epoch seconds
    pub fn with_start_time(start_time: i64) -> Self {
        Session { start_time }
    }

    /// The session clock reading, in epoch seconds
    pub fn start_time(&self) -> i64 {
        self.start_time
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let session = Session::with_start_time(1_700_000_000);
        assert_eq!(session.start_time(), 1_700_000_000);
        assert_eq!(session.start_time(), session.start_time());
    }
}
