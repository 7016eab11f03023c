use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored user record.
///
/// The five profile fields are optional and untyped: whatever subset the
/// caller sent is kept as-is, strings or not. Unrecognized fields supplied
/// on creation ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Creation body. Any shape is accepted; `id` is never taken from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Update body. Only the five profile fields are recognized and any JSON
/// value is assigned as-is; absent or `null` fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub mobile: Option<Value>,
    #[serde(default)]
    pub city: Option<Value>,
}

impl User {
    pub fn from_input(id: String, input: UserInput) -> Self {
        let UserInput { first_name, last_name, email, mobile, city, mut extra } = input;
        extra.remove("id");
        Self { id, first_name, last_name, email, mobile, city, extra }
    }
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
            && self.city.is_none()
    }

    pub fn apply_to(self, user: &mut User) {
        if let Some(v) = self.first_name { user.first_name = Some(v); }
        if let Some(v) = self.last_name { user.last_name = Some(v); }
        if let Some(v) = self.email { user.email = Some(v); }
        if let Some(v) = self.mobile { user.mobile = Some(v); }
        if let Some(v) = self.city { user.city = Some(v); }
    }
}
