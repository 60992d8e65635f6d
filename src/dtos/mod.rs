pub mod categorydtos;
pub mod chatdtos;
pub mod jobdtos;
pub mod userdtos;

use serde::{Deserialize, Serialize};

//Response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationQuery {
    pub fn limit_offset(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(50).min(100) as i64;
        let page = self.page.unwrap_or(1).max(1) as i64;
        (limit, (page - 1) * limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_caps() {
        let q = PaginationQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.limit_offset(), (50, 0));

        let q = PaginationQuery {
            page: Some(3),
            limit: Some(500),
        };
        assert_eq!(q.limit_offset(), (100, 200));
    }
}
