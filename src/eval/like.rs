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

//! LIKE pattern compilation
//!
//! Translates SQL LIKE patterns into anchored regexes: `%` matches any
//! sequence, `_` matches a single character, and an optional escape
//! character makes the following character literal.

use regex::Regex;

use crate::core::{Error, Result};

/// Returns true if the pattern contains an unescaped wildcard
///
/// A wildcard-free pattern without an escape clause degenerates LIKE to
/// plain equality.
pub fn has_wildcards(pattern: &str) -> bool {
    pattern.contains('%') || pattern.contains('_')
}

/// Compile a LIKE pattern into an anchored regex
///
/// The escape, when present, must be a single character.
pub fn like_to_regex(pattern: &str, escape: Option<&str>) -> Result<Regex> {
    let escape_char = match escape {
        None => None,
        Some(escape) => {
            let mut chars = escape.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "escape must be a single character, got '{}'",
                        escape
                    )))
                }
            }
        }
    };

    let mut regex_pattern = String::with_capacity(pattern.len() * 2 + 2);
    regex_pattern.push('^');

    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if Some(ch) == escape_char {
            match chars.next() {
                Some(next) => regex_pattern.push_str(&regex::escape(&next.to_string())),
                None => {
                    return Err(Error::invalid_argument(
                        "LIKE pattern ends with the escape character".to_string(),
                    ))
                }
            }
        } else {
            match ch {
                '%' => regex_pattern.push_str(".*"),
                '_' => regex_pattern.push('.'),
                _ => regex_pattern.push_str(&regex::escape(&ch.to_string())),
            }
        }
    }
    regex_pattern.push('$');

    Regex::new(&regex_pattern)
        .map_err(|e| Error::invalid_argument(format!("invalid LIKE pattern '{}': {}", pattern, e)))
}
