use serde::Serialize;

pub const MAX_CODE_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCode {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub is_active: bool,
}
