use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Success envelope: `{success: true, message?, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { success: true, message: None, data: Some(data) }
    }

    pub fn with_message<M: Into<String>>(message: M, data: T) -> Self {
        ApiResponse { success: true, message: Some(message.into()), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn message_only<M: Into<String>>(message: M) -> Self {
        ApiResponse { success: true, message: Some(message.into()), data: None }
    }
}

/// Serializes a record for the API, exposing `_id: {"$oid": ..}` as a plain `id` string.
pub fn api_json<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value).map(flatten_object_ids)
}

fn flatten_object_ids(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(flatten_object_ids).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, field) in map {
                if key == "_id" {
                    let id = match field {
                        Value::Object(mut oid) => oid.remove("$oid").unwrap_or(Value::Null),
                        other => other,
                    };
                    out.insert("id".to_string(), id);
                } else {
                    out.insert(key, flatten_object_ids(field));
                }
            }
            Value::Object(out)
        }
        other => other,
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let (page, limit) = (self.page(), self.limit());
        let total = items.len();
        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let items = items.into_iter().skip(skip).take(limit as usize).collect();
        Page { items, total, page, limit }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_object_ids() {
        let value = json!([{ "_id": { "$oid": "65a1b2c3d4e5f60718293a4b" }, "name": "Ana" }]);
        let flattened = flatten_object_ids(value);
        assert_eq!(flattened, json!([{ "id": "65a1b2c3d4e5f60718293a4b", "name": "Ana" }]));
    }

    #[test]
    fn test_pagination_bounds() {
        let pagination = Pagination { page: Some(0), limit: Some(1000) };
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), MAX_PAGE_SIZE);

        let page = Pagination { page: Some(2), limit: Some(2) }.apply(vec![1, 2, 3, 4, 5]);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_pagination_past_end_is_empty() {
        let page = Pagination { page: Some(9), limit: Some(10) }.apply(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }
}
