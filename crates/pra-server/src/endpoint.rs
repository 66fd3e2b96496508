//! Route paths, relative to [`API_PREFIX`].

pub const API_PREFIX: &str = "/api/v1";

pub const STORE_CODE: &str = "/store";
pub const STORE_CODE_FOR_PR: &str = "/store/:pr_id";
pub const STORE_SUMMARY_FOR_PR: &str = "/store/summary/:pr_id";
pub const STORE_SUMMARY: &str = "/summary/store";
pub const RETRIEVE_SUMMARY: &str = "/summary/retrieve";
pub const RETRIEVE_SUMMARY_FOR_PR: &str = "/summary/retrieve/:pr_id";
pub const RETRIEVE_CODE: &str = "/retrieve";
pub const RETRIEVE_CODE_FOR_PR: &str = "/retrieve/:pr_id";
pub const HEALTH: &str = "/health";
