use serde::{Deserialize, Serialize};

/// Position of a user inside one department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub dept_id: i64,
    pub position: String,
    pub weight: i32,
    /// Larger sorts first.
    pub sort_id: i32,
}

/// User record from `/cgi/user/get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub gender: i32,
    pub user_id: String,
    pub name: String,
    pub mobile: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "dept")]
    pub dept_ids: Vec<i64>,
    pub dept_detail: Vec<Department>,
}
