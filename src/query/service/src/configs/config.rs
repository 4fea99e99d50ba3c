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

use lazy_static::lazy_static;

lazy_static! {
    pub static ref MELD_COMMIT_VERSION: String = {
        let semver = option_env!("CARGO_PKG_VERSION");
        let git_sha = option_env!("MELD_GIT_SHA");
        match (semver, git_sha) {
            (Some(v1), Some(v2)) => format!("{}-{}", v1, v2),
            (Some(v1), None) => v1.to_string(),
            _ => String::new(),
        }
    };
}

macro_rules! env_helper {
    ($config:expr, $field:tt, $field_type: ty, $env:expr) => {
        let env_var = std::env::var_os($env)
            .unwrap_or($config.$field.to_string().into())
            .into_string()
            .expect(format!("cannot convert {} to string", $env).as_str());
        $config.$field = env_var
            .parse::<$field_type>()
            .expect(format!("cannot convert {} to {}", $env, stringify!($field_type)).as_str());
    };
}

const LOG_LEVEL: &str = "MELD_LOG_LEVEL";
const NODE_NAME: &str = "MELD_NODE_NAME";
const DEFAULT_DATABASE: &str = "MELD_DEFAULT_DATABASE";

/// Node-local settings of the query service.
///
/// `default_database` names the ambient database operators fall back to when
/// no positional database argument was given; empty means unset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub node_name: String,
    pub default_database: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            log_level: "INFO".to_string(),
            node_name: "meld-local".to_string(),
            default_database: "".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden from the environment.
    pub fn load_from_env() -> Config {
        let mut config = Config::default();
        env_helper!(config, log_level, String, LOG_LEVEL);
        env_helper!(config, node_name, String, NODE_NAME);
        env_helper!(config, default_database, String, DEFAULT_DATABASE);
        config
    }
}
