use actix_web::{
    http::{header::ContentType, StatusCode},
    web, HttpResponse,
};
use ews::{
    mailbox::Mailbox,
    types::{
        common::DateTimePrecision,
        request::{
            CreateItemRequest, DeleteItemRequest, FindItemRequest, GetItemRequest,
            MarkAllItemsAsReadRequest, RelocateItemRequest, UpdateItemRequest,
        },
        response::ResponseMessage,
    },
};
use store::tracing::{debug, error};

use crate::EWSServer;

use super::{response::Response, ProblemDetails};

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_precision: Option<DateTimePrecision>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    CreateItem(CreateItemRequest),
    GetItem(GetItemRequest),
    UpdateItem(UpdateItemRequest),
    DeleteItem(DeleteItemRequest),
    CopyItem(RelocateItemRequest),
    MoveItem(RelocateItemRequest),
    MarkAllItemsAsRead(MarkAllItemsAsReadRequest),
    FindItem(FindItemRequest),
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<RequestHeader>,
    pub body: Operation,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateItem(_) => "CreateItem",
            Operation::GetItem(_) => "GetItem",
            Operation::UpdateItem(_) => "UpdateItem",
            Operation::DeleteItem(_) => "DeleteItem",
            Operation::CopyItem(_) => "CopyItem",
            Operation::MoveItem(_) => "MoveItem",
            Operation::MarkAllItemsAsRead(_) => "MarkAllItemsAsRead",
            Operation::FindItem(_) => "FindItem",
        }
    }

    /// Number of response slots the operation produces.
    pub fn len(&self) -> usize {
        match self {
            Operation::CreateItem(request) => request.items.len(),
            Operation::GetItem(request) => request.item_ids.len(),
            Operation::UpdateItem(request) => request.item_changes.len(),
            Operation::DeleteItem(request) => request.item_ids.len(),
            Operation::CopyItem(request) | Operation::MoveItem(request) => request.item_ids.len(),
            Operation::MarkAllItemsAsRead(request) => request.folder_ids.len(),
            Operation::FindItem(request) => request.parent_folder_ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn execute(self, mailbox: &Mailbox, precision: DateTimePrecision) -> Vec<ResponseMessage> {
        match self {
            Operation::CreateItem(request) => mailbox.create_items(request),
            Operation::GetItem(request) => mailbox.get_items(request, precision),
            Operation::UpdateItem(request) => mailbox.update_items(request),
            Operation::DeleteItem(request) => mailbox.delete_items(request),
            Operation::CopyItem(request) => mailbox.copy_items(request),
            Operation::MoveItem(request) => mailbox.move_items(request),
            Operation::MarkAllItemsAsRead(request) => mailbox.mark_all_items_as_read(request),
            Operation::FindItem(request) => mailbox.find_items(request, precision),
        }
    }
}

pub async fn handle_ews_request(
    request: web::Bytes,
    core: web::Data<EWSServer>,
) -> Result<HttpResponse, ProblemDetails> {
    let config = &core.mailbox.config;
    if request.len() > config.max_size_request {
        return Err(ProblemDetails::request_too_large(config.max_size_request));
    }

    let request = serde_json::from_slice::<Request>(&request).map_err(|err| {
        debug!("Failed to parse request: {}", err);
        ProblemDetails::invalid_request(format!("Failed to parse request: {}", err))
    })?;
    if request.body.len() > config.max_items_per_request {
        return Err(ProblemDetails::too_many_items(config.max_items_per_request));
    }

    let precision = request
        .header
        .and_then(|header| header.date_time_precision)
        .unwrap_or(config.date_time_precision);
    let operation = request.body;
    let name = operation.name();
    let mailbox = core.mailbox.clone();
    let response_messages = core
        .spawn_worker(move || operation.execute(&mailbox, precision))
        .await
        .map_err(|err| {
            error!("Failed to process {} request: {}", name, err);
            ProblemDetails::internal_server_error()
        })?;

    Ok(HttpResponse::build(StatusCode::OK)
        .insert_header(ContentType::json())
        .json(Response::new(name, response_messages)))
}
