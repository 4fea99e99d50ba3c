// Copyright 2024 Meld Labs
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

//! The query service: the operator surface over cluster metadata and row
//! storage.
//!
//! A request arrives as an expression tree; [`operators::OperatorFactory`]
//! compiles it (checking arity and option names up front) into an operator
//! that evaluates against a [`sessions::QueryContext`].

pub mod configs;
pub mod datastreams;
pub mod operators;
pub mod sessions;
pub mod storages;
pub mod values;
