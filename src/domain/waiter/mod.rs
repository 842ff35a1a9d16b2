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

//! Waiting on asynchronous operations
//!
//! Mutations return immediately with a pending resource. The pieces here
//! pull the resource's self-reference out of the mutation response, classify
//! the state of the fetched resource, and poll until it settles.

pub mod outcome;
pub mod poller;
pub mod reference;
pub mod state;

pub use self::outcome::WaitOutcome;
pub use self::poller::Poller;
pub use self::reference::{extract_reference, ResourceReference};
pub use self::state::{classify_state, failure_detail, LifecycleState, TerminalTest};
