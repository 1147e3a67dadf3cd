use std::collections::HashMap;

use ews::types::response::ResponseMessage;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMessages {
    pub response_messages: Vec<ResponseMessage>,
}

/// `{"Body": {"<Operation>Response": {"ResponseMessages": [...]}}}`
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response {
    pub body: HashMap<String, ResponseMessages>,
}

impl Response {
    pub fn new(operation: &str, response_messages: Vec<ResponseMessage>) -> Self {
        let mut body = HashMap::with_capacity(1);
        body.insert(
            format!("{}Response", operation),
            ResponseMessages { response_messages },
        );
        Response { body }
    }

    pub fn messages(&self, operation: &str) -> Option<&[ResponseMessage]> {
        self.body
            .get(&format!("{}Response", operation))
            .map(|messages| messages.response_messages.as_slice())
    }
}
