//! 响应信封
//!
//! 服务端返回 DTO 数组时附带成功标记与错误列表：
//! `{ "isRequestSuccessful": true, "errors": [], "entities": [ ... ] }`
//!
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    is_request_successful: bool,
    #[serde(default)]
    #[builder(default)]
    errors: Vec<String>,
    /// 带 `"@type"` 的 DTO 对象
    #[serde(default)]
    #[builder(default)]
    entities: Vec<Value>,
}

impl ResponseEnvelope {
    pub fn success(entities: Vec<Value>) -> Self {
        Self::builder()
            .is_request_successful(true)
            .entities(entities)
            .build()
    }

    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder()
            .is_request_successful(false)
            .errors(errors.into_iter().map(Into::into).collect())
            .build()
    }

    pub fn is_request_successful(&self) -> bool {
        self.is_request_successful
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn entities(&self) -> &[Value] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Value> {
        self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseEnvelope;
    use serde_json::json;

    #[test]
    fn failure_envelope_uses_camel_case_keys() {
        let env = ResponseEnvelope::failure(["project not found"]);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "isRequestSuccessful": false,
                "errors": ["project not found"],
                "entities": []
            })
        );
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let env: ResponseEnvelope =
            serde_json::from_value(json!({ "isRequestSuccessful": true })).unwrap();
        assert!(env.is_request_successful());
        assert!(env.errors().is_empty());
        assert!(env.entities().is_empty());
    }
}
