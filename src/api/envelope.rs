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

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Decode a response body. The server wraps every payload in an object with
/// a `success` flag; failures carry `error` (or `message`). Some error paths
/// omit the flag and only send `error`, so a missing flag counts as success
/// only when there is no error and the status is 2xx.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Fallible<T> {
    let value: Value = serde_json::from_str(body)?;
    let Some(object) = value.as_object() else {
        return Err(ErrorReport::network());
    };
    let message = object
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| object.get("message").and_then(Value::as_str));
    match object.get("success").and_then(Value::as_bool) {
        Some(true) => {}
        Some(false) => {
            return Err(ErrorReport::protocol(message.unwrap_or("request failed.")));
        }
        None => {
            if let Some(message) = object.get("error").and_then(Value::as_str) {
                return Err(ErrorReport::protocol(message));
            }
            if !(200..300).contains(&status) {
                return Err(ErrorReport::protocol(format!(
                    "request failed with status {status}."
                )));
            }
        }
    }
    let payload: T = serde_json::from_value(value)?;
    Ok(payload)
}
