//! Vendor API paths and query keys.

pub const GET_TOKEN: &str = "/cgi/gettoken";
pub const SEND_MSG: &str = "/cgi/msg/send";
pub const UPLOAD_MEDIA: &str = "/cgi/media/upload";
pub const DOWNLOAD_MEDIA: &str = "/cgi/media/get";
pub const SEARCH_MEDIA: &str = "/cgi/media/search";
pub const GET_USER: &str = "/cgi/user/get";

pub const QUERY_ACCESS_TOKEN: &str = "accessToken";
pub const QUERY_USER_ID: &str = "userId";

/// Where the vendor posts callbacks unless configured otherwise.
pub const DEFAULT_CALLBACK_PATH: &str = "/receive/youdu/msg";
