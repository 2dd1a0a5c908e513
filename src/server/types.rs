use crate::extraction::TrademarkText;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct InferenceRequest {
    /// Base64-encoded image, forwarded without decoding.
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResponse {
    pub words_in_mark: String,
    pub chinese_character: String,
    pub descr_of_device: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<TrademarkText> for InferenceResponse {
    fn from(text: TrademarkText) -> Self {
        Self {
            words_in_mark: text.words_in_mark,
            chinese_character: text.chinese_character,
            descr_of_device: text.descr_of_device,
        }
    }
}
