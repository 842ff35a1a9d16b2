// Copyright 2025 JiangLong.
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

/// Credentials attached to every request.
///
/// A non-empty token wins; otherwise a non-empty username selects HTTP
/// basic auth.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme<'a> {
    Bearer(&'a str),
    Basic { username: &'a str, password: &'a str },
    Anonymous,
}

impl Credentials {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            token: String::new(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn scheme(&self) -> AuthScheme<'_> {
        if !self.token.is_empty() {
            AuthScheme::Bearer(&self.token)
        } else if !self.username.is_empty() {
            AuthScheme::Basic {
                username: &self.username,
                password: &self.password,
            }
        } else {
            AuthScheme::Anonymous
        }
    }
}

// Never print secrets.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scheme = match self.scheme() {
            AuthScheme::Bearer(_) => "bearer",
            AuthScheme::Basic { .. } => "basic",
            AuthScheme::Anonymous => "anonymous",
        };
        f.debug_struct("Credentials")
            .field("scheme", &scheme)
            .field("username", &self.username)
            .finish()
    }
}
